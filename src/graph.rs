//! Graph snapshot types for the reference graph of notes.
//!
//! A snapshot is an ordered list of notes plus an ordered list of directed
//! reference edges. Notes and edges are immutable inputs to the layout core;
//! the core only computes coordinates associated with them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A 2D coordinate in layout space.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Index into `GraphSnapshot::notes`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NoteId(pub usize);

/// Role of a note relative to the anchor, carried through to the renderer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeGroup {
    Anchor,
    Forward,
    Backward,
}

/// Direction type of a reference edge.
///
/// `BasedOn` points from a note to the note it builds on (forward direction);
/// `CitedBy` points from a note to one that cites it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    BasedOn,
    CitedBy,
}

/// A note in the graph.
#[derive(Debug, Clone, Serialize)]
pub struct Note {
    pub nid: NoteId,
    /// Unique identifier (the note's title).
    pub id: String,
    pub group: NodeGroup,
    /// Coordinate already known to the caller, if any (e.g. from a drag).
    pub pos: Option<Point>,
}

/// A directed reference between two notes.
#[derive(Debug, Clone, Serialize)]
pub struct RefEdge {
    pub from: NoteId,
    pub to: NoteId,
    pub kind: EdgeKind,
}

/// Raw node record as supplied by the host, endpoints still by string id.
#[derive(Debug, Clone, Deserialize)]
pub struct NoteInput {
    pub id: String,
    pub group: NodeGroup,
    #[serde(default)]
    pub pos: Option<Point>,
}

/// Raw edge record as supplied by the host.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeInput {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
}

/// An immutable snapshot of the note graph.
#[derive(Debug, Clone, Serialize)]
pub struct GraphSnapshot {
    pub notes: Vec<Note>,
    pub edges: Vec<RefEdge>,
}

impl GraphSnapshot {
    /// Resolve raw string endpoints into a snapshot.
    ///
    /// Duplicate note ids keep the first occurrence. Edges whose endpoints
    /// don't resolve are dropped rather than failing the whole snapshot.
    pub fn from_parts(notes: Vec<NoteInput>, edges: Vec<EdgeInput>) -> Self {
        let mut by_id: HashMap<String, NoteId> = HashMap::new();
        let mut resolved_notes: Vec<Note> = Vec::with_capacity(notes.len());

        for input in notes {
            if by_id.contains_key(&input.id) {
                log::warn!("duplicate note id '{}', keeping first", input.id);
                continue;
            }
            let nid = NoteId(resolved_notes.len());
            by_id.insert(input.id.clone(), nid);
            resolved_notes.push(Note {
                nid,
                id: input.id,
                group: input.group,
                pos: input.pos,
            });
        }

        let mut resolved_edges: Vec<RefEdge> = Vec::with_capacity(edges.len());
        for input in edges {
            match (by_id.get(&input.source), by_id.get(&input.target)) {
                (Some(&from), Some(&to)) => {
                    resolved_edges.push(RefEdge { from, to, kind: input.kind });
                }
                _ => {
                    log::warn!(
                        "edge '{}' -> '{}' references unknown note, dropping",
                        input.source,
                        input.target
                    );
                }
            }
        }

        Self { notes: resolved_notes, edges: resolved_edges }
    }

    /// Look up a note index by its string id.
    pub fn note_by_id(&self, id: &str) -> Option<NoteId> {
        self.notes.iter().find(|n| n.id == id).map(|n| n.nid)
    }
}
