mod component;
mod render;
mod state;
mod types;

pub use component::ForceGraphCanvas;
pub use types::{
	EdgeStyle, GraphClick, GraphData, GraphLink, GraphNode, NodeColor, NodeFont, NodeShape,
};

/// Class carried by every graph canvas element.
pub const CANVAS_CLASS: &str = "force-graph-canvas";
