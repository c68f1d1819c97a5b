// Edge curvature resolution.
//
// Decides whether a straight edge between two placed notes would pass
// through a third note, and if so, which way and how strongly to bow the
// rendered path around it. Returns on the FIRST interfering note in
// snapshot order rather than the most-occluding one; the renderer only
// needs the edge to visibly clear something, and a single pass keeps the
// per-redraw cost linear.

use std::collections::HashMap;

use crate::graph::{GraphSnapshot, NoteId, Point, RefEdge};

/// Tunables for curvature resolution.
#[derive(Debug, Clone)]
pub struct CurvatureParams {
    /// Edges shorter than this render straight, there is no room to bow.
    pub min_edge_length: f64,
    /// Fraction of the segment near each endpoint where interference is
    /// ignored; arrowheads and note glyphs already occupy that space.
    pub endpoint_margin: f64,
    /// Perpendicular distance below which a note counts as interfering.
    pub clearance: f64,
    /// Curvature applied for any interference at all.
    pub base_curvature: f64,
    /// Extra curvature scaled by how tight the interference is.
    pub distance_curvature: f64,
}

impl Default for CurvatureParams {
    fn default() -> Self {
        Self {
            min_edge_length: 2.0,
            endpoint_margin: 0.18,
            clearance: 18.0,
            base_curvature: 0.10,
            distance_curvature: 0.06,
        }
    }
}

/// Signed curvature for one edge given finalized positions.
///
/// 0.0 means render straight. A positive value bows the path toward the
/// geometric left of the source->target vector, negative toward the right.
/// Either endpoint missing from the position map yields 0.0.
pub fn edge_curvature(
    snapshot: &GraphSnapshot,
    positions: &HashMap<NoteId, Point>,
    edge: &RefEdge,
    params: &CurvatureParams,
) -> f64 {
    let (Some(&s), Some(&t)) = (positions.get(&edge.from), positions.get(&edge.to)) else {
        return 0.0;
    };

    let dx = t.x - s.x;
    let dy = t.y - s.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq < params.min_edge_length * params.min_edge_length {
        return 0.0;
    }

    let clearance_sq = params.clearance * params.clearance;

    for note in &snapshot.notes {
        if note.nid == edge.from || note.nid == edge.to {
            continue;
        }
        let Some(&n) = positions.get(&note.nid) else {
            continue;
        };

        // Parametric projection of n onto the line through s and t:
        // b <= 0 is behind the source, b >= 1 is past the target.
        let b = ((n.x - s.x) * dx + (n.y - s.y) * dy) / len_sq;
        if b <= params.endpoint_margin || b >= 1.0 - params.endpoint_margin {
            continue;
        }

        let proj_x = s.x + b * dx;
        let proj_y = s.y + b * dy;
        let dist_sq = (n.x - proj_x) * (n.x - proj_x) + (n.y - proj_y) * (n.y - proj_y);
        if dist_sq >= clearance_sq {
            continue;
        }

        // Which side of the edge the note is on decides the bow direction.
        let cross = dx * (n.y - s.y) - dy * (n.x - s.x);
        let sign = if cross >= 0.0 { 1.0 } else { -1.0 };
        let tightness = (1.0 - dist_sq.sqrt() / params.clearance).max(0.0);
        return (params.base_curvature + params.distance_curvature * tightness) * sign;
    }

    0.0
}
