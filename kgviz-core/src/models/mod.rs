pub mod graph;
pub mod record;

pub use graph::{GraphEdge, GraphModel, GraphNode};
pub use record::{Entity, Relationship, SourceRecord, Strength};
