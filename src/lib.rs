pub mod graph;
pub mod layout;
pub mod output;
pub mod wasm;

pub use graph::{EdgeInput, EdgeKind, GraphSnapshot, NodeGroup, Note, NoteId, NoteInput, Point, RefEdge};
pub use layout::{LayoutConfig, LayoutResult, edge_curvature, layout_graph};
