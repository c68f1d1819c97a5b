// Radial ring assignment.
//
// Converts a depth map into concrete coordinates: one ring per distinct
// depth value, notes spread evenly by angle within their ring. Rings for
// depth +k and -k share the same radius, but negative rings are rotated by
// half an angular step so the two sides never line up in the same column.

use std::collections::{BTreeMap, HashMap};
use std::f64::consts::{PI, TAU};

use super::depth::DepthMap;
use crate::graph::{NoteId, Point};

/// Compute ring coordinates for every note in the depth map.
///
/// Ring radius is `|depth| * ring_spacing`; the anchor's ring has radius 0,
/// so the anchor lands on the origin. Iteration order within a ring is the
/// depth map's first-assignment order, which makes the whole assignment
/// deterministic for a fixed snapshot.
pub fn assign_rings(depths: &DepthMap, ring_spacing: f64) -> HashMap<NoteId, Point> {
    let mut rings: BTreeMap<i32, Vec<NoteId>> = BTreeMap::new();
    for (nid, depth) in depths.iter() {
        rings.entry(depth).or_default().push(nid);
    }

    let mut positions: HashMap<NoteId, Point> = HashMap::with_capacity(depths.len());
    for (&depth, members) in &rings {
        let radius = depth.unsigned_abs() as f64 * ring_spacing;
        let n = members.len().max(1) as f64;
        // Negative rings get a half-step offset to avoid sharing angular
        // columns with their positive counterparts.
        let phase = if depth < 0 { PI / n } else { 0.0 };

        for (i, &nid) in members.iter().enumerate() {
            let angle = TAU * i as f64 / n + phase;
            positions.insert(nid, Point::new(radius * angle.cos(), radius * angle.sin()));
        }
    }

    positions
}
