pub mod config;
pub mod error;
pub mod graph;
pub mod html;
pub mod models;
pub mod render;
pub mod view;

pub use config::{RunConfig, VisualConfig};
pub use error::KgvizError;
pub use graph::{map_document, map_records, parse_records};
pub use html::render_document;
pub use models::{
    Entity, GraphEdge, GraphModel, GraphNode, Relationship, SourceRecord, Strength,
};
pub use render::{render_graph, RenderEdge, RenderGraph, RenderNode};
pub use view::{node_type_options, ElementView, ViewState};
