// Adjacency views for depth classification.
//
// Builds two directed views over the snapshot's edges:
// 1. outgoing: who each note points to (forward traversal)
// 2. incoming: who points to each note (backward traversal)
//
// Both preserve edge declaration order so traversal is deterministic.

use crate::graph::{GraphSnapshot, NoteId};

/// Directed adjacency for a snapshot.
#[derive(Debug, Clone)]
pub struct Adjacency {
    /// For each note (by index), the notes it points to.
    outgoing: Vec<Vec<NoteId>>,
    /// For each note (by index), the notes pointing to it.
    incoming: Vec<Vec<NoteId>>,
}

impl Adjacency {
    /// Build adjacency from a snapshot's edges.
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> Self {
        let n = snapshot.notes.len();
        let mut outgoing: Vec<Vec<NoteId>> = vec![Vec::new(); n];
        let mut incoming: Vec<Vec<NoteId>> = vec![Vec::new(); n];

        for edge in &snapshot.edges {
            outgoing[edge.from.0].push(edge.to);
            incoming[edge.to.0].push(edge.from);
        }

        Self { outgoing, incoming }
    }

    /// Notes the given note points to, in edge declaration order.
    pub fn outgoing(&self, nid: NoteId) -> &[NoteId] {
        self.outgoing.get(nid.0).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Notes pointing to the given note, in edge declaration order.
    pub fn incoming(&self, nid: NoteId) -> &[NoteId] {
        self.incoming.get(nid.0).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Total degree (in + out) for a note.
    pub fn degree(&self, nid: NoteId) -> usize {
        self.outgoing(nid).len() + self.incoming(nid).len()
    }
}
