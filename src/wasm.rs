//! WASM bindings for the refgraph-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.
//! The frontend sends a JSON graph snapshot and gets back positioned notes
//! plus per-edge curvature, ready to draw.

use std::collections::{HashMap, HashSet};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use serde_json::to_string;
use wasm_bindgen::prelude::*;

use crate::graph::{EdgeInput, GraphSnapshot, NoteInput, Point};
use crate::layout::{LayoutConfig, layout_graph};
use crate::output::{EdgeOutput, GraphOutput, NoteOutput};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    pub fn console_log(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn console_error(s: &str);
}

/// The layout request sent by the frontend.
#[derive(Debug, Deserialize)]
struct LayoutRequest {
    nodes: Vec<NoteInput>,
    edges: Vec<EdgeInput>,
    /// Note ids whose position must come from the ring assignment.
    #[serde(default)]
    anchored: Vec<String>,
    /// Previously persisted free-form positions, keyed by note id.
    #[serde(default)]
    positions: HashMap<String, Point>,
    /// Optional RNG seed for reproducible placement.
    #[serde(default)]
    seed: Option<u64>,
}

#[wasm_bindgen]
pub fn layout_graph_json(input: &str) -> String {
    let request: LayoutRequest = match serde_json::from_str(input) {
        Ok(request) => request,
        Err(e) => {
            console_error(&format!("Error parsing layout request: {e}"));
            let output = GraphOutput::from_error(e.to_string());
            return to_string(&output).unwrap_or_else(|_| "{}".to_string());
        }
    };

    let snapshot = GraphSnapshot::from_parts(request.nodes, request.edges);
    let anchored: HashSet<String> = request.anchored.into_iter().collect();
    let cfg = LayoutConfig::default();

    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let result = layout_graph(&snapshot, &anchored, &request.positions, &cfg, &mut rng);

    let nodes: Vec<NoteOutput> = snapshot
        .notes
        .iter()
        .map(|note| {
            let pos = result.positions.get(&note.nid).copied().unwrap_or(Point::ORIGIN);
            NoteOutput {
                id: note.id.clone(),
                group: note.group,
                x: pos.x,
                y: pos.y,
                depth: result.depths.depth(note.nid),
                anchored: anchored.contains(&note.id),
            }
        })
        .collect();

    let edges: Vec<EdgeOutput> = snapshot
        .edges
        .iter()
        .zip(&result.curvatures)
        .map(|(edge, &curvature)| EdgeOutput {
            source: snapshot.notes[edge.from.0].id.clone(),
            target: snapshot.notes[edge.to.0].id.clone(),
            kind: edge.kind,
            curvature,
        })
        .collect();

    let output = GraphOutput { nodes, edges, error: None };
    to_string(&output).unwrap_or_else(|_| "{}".to_string())
}
