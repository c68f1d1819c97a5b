// Layout core for the reference graph.
//
// Goals:
// - Deterministic where possible: depth classification and ring assignment
//   are pure functions of the snapshot; only new-note placement samples.
// - Full rebuild: every pass recomputes the complete position map from its
//   inputs, nothing is patched in place across passes.
// - Best effort: bounded retries and documented fallbacks, never a failed
//   layout.
//
// Submodules:
// - adjacency: directed outgoing/incoming views
// - depth: bidirectional BFS depth classification
// - rings: depth map -> ring coordinates
// - spatial_grid: O(1) proximity detection
// - placement: collision-avoiding placement for free notes
// - curvature: per-edge bend values

use std::collections::{HashMap, HashSet};

use rand::Rng;

pub mod adjacency;
pub mod curvature;
pub mod depth;
pub mod placement;
pub mod rings;
pub mod spatial_grid;

use adjacency::Adjacency;
pub use curvature::{CurvatureParams, edge_curvature};
pub use depth::{DepthMap, classify_depths, find_anchor};
pub use placement::{PlacementParams, place_near};
pub use rings::assign_rings;
pub use spatial_grid::SpatialGrid;

use crate::graph::{GraphSnapshot, NoteId, Point};

/// Layout tunables.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Note id (matched case-insensitively) that anchors the radial layout.
    pub anchor_name: String,
    /// Radius step between consecutive depth rings.
    pub ring_spacing: f64,
    /// Cell size for the spatial grid used during placement.
    pub cell_size: f64,
    pub placement: PlacementParams,
    pub curvature: CurvatureParams,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            anchor_name: "core".to_string(),
            ring_spacing: 100.0,
            cell_size: 50.0,
            placement: PlacementParams::default(),
            curvature: CurvatureParams::default(),
        }
    }
}

/// Complete layout for one snapshot.
#[derive(Debug, Clone)]
pub struct LayoutResult {
    /// Final coordinate for every note in the snapshot.
    pub positions: HashMap<NoteId, Point>,
    /// Signed depth per note.
    pub depths: DepthMap,
    /// One curvature value per snapshot edge, in edge order.
    pub curvatures: Vec<f64>,
}

/// Compute a full layout for the snapshot.
///
/// Position sources, in order:
/// 1. notes in `anchored` take their ring coordinate from the depth map
/// 2. free notes with a persisted position (keyed by note id) keep it
/// 3. free notes with a coordinate already on the note record keep that
/// 4. everything else is placed near its first positioned neighbor by the
///    placement solver, against a spatial grid seeded with all finalized
///    positions
///
/// Only step 4 consumes randomness; callers needing reproducible output
/// pass a seeded `rng`.
pub fn layout_graph(
    snapshot: &GraphSnapshot,
    anchored: &HashSet<String>,
    persisted: &HashMap<String, Point>,
    cfg: &LayoutConfig,
    rng: &mut impl Rng,
) -> LayoutResult {
    let adjacency = Adjacency::from_snapshot(snapshot);
    let depths = classify_depths(snapshot, &adjacency, &cfg.anchor_name);
    let ring_positions = assign_rings(&depths, cfg.ring_spacing);

    let mut positions: HashMap<NoteId, Point> = HashMap::with_capacity(snapshot.notes.len());
    let mut grid: SpatialGrid<NoteId> = SpatialGrid::new(cfg.cell_size);
    let mut pending: Vec<NoteId> = Vec::new();

    for note in &snapshot.notes {
        let finalized = if anchored.contains(&note.id) {
            ring_positions.get(&note.nid).copied()
        } else {
            persisted.get(&note.id).copied().or(note.pos)
        };

        match finalized {
            Some(p) => {
                grid.insert(p.x, p.y, note.nid);
                positions.insert(note.nid, p);
            }
            None => pending.push(note.nid),
        }
    }

    for nid in pending {
        let parent = choose_parent(nid, &adjacency, &positions, &depths);
        let parent_pos = resolve_parent_pos(
            parent,
            snapshot,
            anchored,
            persisted,
            &ring_positions,
            &positions,
        );
        let placed = place_near(parent_pos, &grid, &cfg.placement, rng);
        grid.insert(placed.x, placed.y, nid);
        positions.insert(nid, placed);
    }

    let curvatures = snapshot
        .edges
        .iter()
        .map(|edge| edge_curvature(snapshot, &positions, edge, &cfg.curvature))
        .collect();

    LayoutResult { positions, depths, curvatures }
}

/// Pick the reference parent for an unplaced note: the first neighbor (in
/// edge declaration order, outgoing before incoming) that already has a
/// finalized position, else the anchor.
fn choose_parent(
    nid: NoteId,
    adjacency: &Adjacency,
    positions: &HashMap<NoteId, Point>,
    depths: &DepthMap,
) -> Option<NoteId> {
    adjacency
        .outgoing(nid)
        .iter()
        .chain(adjacency.incoming(nid))
        .find(|candidate| positions.contains_key(candidate))
        .copied()
        .or_else(|| depths.anchor())
}

/// Resolve the parent's coordinates: anchored ring position, else persisted,
/// else an already-known coordinate, else the origin.
fn resolve_parent_pos(
    parent: Option<NoteId>,
    snapshot: &GraphSnapshot,
    anchored: &HashSet<String>,
    persisted: &HashMap<String, Point>,
    ring_positions: &HashMap<NoteId, Point>,
    positions: &HashMap<NoteId, Point>,
) -> Point {
    let Some(parent) = parent else {
        return Point::ORIGIN;
    };
    let Some(note) = snapshot.notes.get(parent.0) else {
        return Point::ORIGIN;
    };

    if anchored.contains(&note.id) {
        if let Some(&p) = ring_positions.get(&parent) {
            return p;
        }
    }
    if let Some(&p) = persisted.get(&note.id) {
        return p;
    }
    if let Some(&p) = positions.get(&parent) {
        return p;
    }
    note.pos.unwrap_or(Point::ORIGIN)
}
