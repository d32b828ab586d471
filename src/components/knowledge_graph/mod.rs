//! Adapter between the loaded records and the graph canvas.

mod component;
mod interaction;
mod model;

pub use component::KnowledgeGraph;
