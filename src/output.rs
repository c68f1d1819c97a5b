//! Output types for renderer consumption.
//!
//! These structs are serialized to JSON and handed to the frontend that
//! draws the graph view.

use serde::Serialize;

use crate::graph::{EdgeKind, NodeGroup};

/// A positioned note ready for the renderer.
#[derive(Debug, Clone, Serialize)]
pub struct NoteOutput {
    pub id: String,
    pub group: NodeGroup,
    pub x: f64,
    pub y: f64,
    /// Signed ring depth relative to the anchor.
    pub depth: i32,
    /// Whether this note's position came from the ring assignment.
    pub anchored: bool,
}

/// An edge with its resolved curvature.
#[derive(Debug, Clone, Serialize)]
pub struct EdgeOutput {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    /// 0.0 renders straight; sign is the bend direction.
    pub curvature: f64,
}

/// Error information for the hosting editor.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub message: String,
}

/// The combined output sent to the renderer.
#[derive(Debug, Clone, Serialize)]
pub struct GraphOutput {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<NoteOutput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<EdgeOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl GraphOutput {
    pub fn from_error(message: String) -> Self {
        Self { nodes: vec![], edges: vec![], error: Some(ErrorInfo { message }) }
    }
}
