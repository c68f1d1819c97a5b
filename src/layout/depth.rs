// Depth classification via bidirectional breadth-first traversal.
//
// Every note gets a signed integer depth relative to the anchor note:
// - forward references (outgoing edges) increase depth by 1 per hop
// - backward references (incoming edges) decrease depth by 1 per hop
// - the anchor itself is depth 0
//
// First assignment wins: a note reached by both passes keeps whichever depth
// was discovered first. The note graph may contain cycles, so this tie-break
// is a deliberate policy rather than an accident; ring placement downstream
// depends on the resulting depths staying stable for a fixed snapshot.

use std::collections::{HashMap, VecDeque};

use super::adjacency::Adjacency;
use crate::graph::{GraphSnapshot, NoteId};

/// Signed depth per note, plus the order in which depths were assigned.
///
/// The assignment order is the iteration order for ring placement, so it is
/// part of the contract, not an implementation detail.
#[derive(Debug, Clone)]
pub struct DepthMap {
    depths: HashMap<NoteId, i32>,
    order: Vec<NoteId>,
    anchor: Option<NoteId>,
}

impl DepthMap {
    /// Depth of a note. Notes absent from the map read as 0.
    pub fn depth(&self, nid: NoteId) -> i32 {
        self.depths.get(&nid).copied().unwrap_or(0)
    }

    /// The anchor note, if the snapshot was non-empty.
    pub fn anchor(&self) -> Option<NoteId> {
        self.anchor
    }

    /// Notes in first-assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (NoteId, i32)> + '_ {
        self.order.iter().map(|&nid| (nid, self.depth(nid)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Pick the anchor note: case-insensitive id match against `anchor_name`,
/// else the first note in the snapshot.
pub fn find_anchor(snapshot: &GraphSnapshot, anchor_name: &str) -> Option<NoteId> {
    snapshot
        .notes
        .iter()
        .find(|n| n.id.eq_ignore_ascii_case(anchor_name))
        .or_else(|| snapshot.notes.first())
        .map(|n| n.nid)
}

/// Classify every note in the snapshot into a signed depth.
///
/// An empty snapshot yields an empty map. Notes unreachable from the anchor
/// in either direction default to depth 0, which co-locates them with the
/// anchor's ring; that collapse is the documented degenerate case, so it is
/// surfaced as a warning instead of silently overlapping.
pub fn classify_depths(
    snapshot: &GraphSnapshot,
    adjacency: &Adjacency,
    anchor_name: &str,
) -> DepthMap {
    let mut map = DepthMap {
        depths: HashMap::new(),
        order: Vec::with_capacity(snapshot.notes.len()),
        anchor: None,
    };

    let Some(anchor) = find_anchor(snapshot, anchor_name) else {
        return map;
    };
    map.anchor = Some(anchor);
    assign(&mut map, anchor, 0);

    // Forward pass: follow outgoing edges, depth = parent + 1.
    bfs(&mut map, anchor, 1, |nid| adjacency.outgoing(nid));

    // Backward pass: follow incoming edges, depth = parent - 1.
    bfs(&mut map, anchor, -1, |nid| adjacency.incoming(nid));

    // Anything still unvisited is disconnected from the anchor.
    for note in &snapshot.notes {
        if !map.depths.contains_key(&note.nid) {
            log::warn!(
                "note '{}' is unreachable from the anchor, defaulting to depth 0",
                note.id
            );
            assign(&mut map, note.nid, 0);
        }
    }

    map
}

fn assign(map: &mut DepthMap, nid: NoteId, depth: i32) {
    map.depths.insert(nid, depth);
    map.order.push(nid);
}

fn bfs<'a>(
    map: &mut DepthMap,
    anchor: NoteId,
    step: i32,
    neighbors: impl Fn(NoteId) -> &'a [NoteId],
) {
    let mut queue: VecDeque<NoteId> = VecDeque::new();
    queue.push_back(anchor);

    while let Some(current) = queue.pop_front() {
        let next_depth = map.depth(current) + step;
        for &neighbor in neighbors(current) {
            if map.depths.contains_key(&neighbor) {
                continue;
            }
            assign(map, neighbor, next_depth);
            queue.push_back(neighbor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeInput, EdgeKind, NodeGroup, NoteInput};

    fn note(id: &str) -> NoteInput {
        NoteInput { id: id.to_string(), group: NodeGroup::Forward, pos: None }
    }

    fn based_on(source: &str, target: &str) -> EdgeInput {
        EdgeInput {
            source: source.to_string(),
            target: target.to_string(),
            kind: EdgeKind::BasedOn,
        }
    }

    fn classify(snapshot: &GraphSnapshot) -> DepthMap {
        let adjacency = Adjacency::from_snapshot(snapshot);
        classify_depths(snapshot, &adjacency, "core")
    }

    #[test]
    fn test_anchor_is_depth_zero() {
        let snapshot = GraphSnapshot::from_parts(
            vec![note("Core"), note("A")],
            vec![based_on("Core", "A")],
        );
        let map = classify(&snapshot);

        assert_eq!(map.anchor(), Some(NoteId(0)));
        assert_eq!(map.depth(NoteId(0)), 0);
    }

    #[test]
    fn test_anchor_match_is_case_insensitive() {
        let snapshot = GraphSnapshot::from_parts(vec![note("Other"), note("CORE")], vec![]);
        let map = classify(&snapshot);

        assert_eq!(map.anchor(), Some(NoteId(1)));
    }

    #[test]
    fn test_missing_anchor_falls_back_to_first_note() {
        let snapshot = GraphSnapshot::from_parts(vec![note("X"), note("Y")], vec![]);
        let map = classify(&snapshot);

        assert_eq!(map.anchor(), Some(NoteId(0)));
    }

    #[test]
    fn test_forward_hops_increase_depth() {
        // Core -> A -> B
        let snapshot = GraphSnapshot::from_parts(
            vec![note("Core"), note("A"), note("B")],
            vec![based_on("Core", "A"), based_on("A", "B")],
        );
        let map = classify(&snapshot);

        assert_eq!(map.depth(NoteId(1)), 1);
        assert_eq!(map.depth(NoteId(2)), 2);
    }

    #[test]
    fn test_backward_hops_decrease_depth() {
        // B -> A -> Core
        let snapshot = GraphSnapshot::from_parts(
            vec![note("Core"), note("A"), note("B")],
            vec![based_on("A", "Core"), based_on("B", "A")],
        );
        let map = classify(&snapshot);

        assert_eq!(map.depth(NoteId(1)), -1);
        assert_eq!(map.depth(NoteId(2)), -2);
    }

    #[test]
    fn test_shortest_path_wins() {
        // Core -> A -> B and Core -> B: B is one forward hop away.
        let snapshot = GraphSnapshot::from_parts(
            vec![note("Core"), note("A"), note("B")],
            vec![based_on("Core", "A"), based_on("A", "B"), based_on("Core", "B")],
        );
        let map = classify(&snapshot);

        assert_eq!(map.depth(NoteId(2)), 1);
    }

    #[test]
    fn test_forward_discovery_wins_over_backward() {
        // A is both a forward child and a backward parent of Core. The
        // forward pass runs first, so its assignment sticks.
        let snapshot = GraphSnapshot::from_parts(
            vec![note("Core"), note("A")],
            vec![based_on("Core", "A"), based_on("A", "Core")],
        );
        let map = classify(&snapshot);

        assert_eq!(map.depth(NoteId(1)), 1);
    }

    #[test]
    fn test_unreachable_notes_default_to_zero() {
        let snapshot = GraphSnapshot::from_parts(
            vec![note("Core"), note("A"), note("Island")],
            vec![based_on("Core", "A")],
        );
        let map = classify(&snapshot);

        assert_eq!(map.depth(NoteId(2)), 0);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_empty_snapshot_yields_empty_map() {
        let snapshot = GraphSnapshot::from_parts(vec![], vec![]);
        let map = classify(&snapshot);

        assert!(map.is_empty());
        assert_eq!(map.anchor(), None);
    }

    #[test]
    fn test_single_note_snapshot() {
        let snapshot = GraphSnapshot::from_parts(vec![note("Core")], vec![]);
        let map = classify(&snapshot);

        assert_eq!(map.len(), 1);
        assert_eq!(map.depth(NoteId(0)), 0);
    }
}
