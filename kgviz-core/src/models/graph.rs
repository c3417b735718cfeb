use serde::Serialize;

use super::record::Strength;

/// Raw node as produced by the mapper. Duplicate ids are possible.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub unconnected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    /// `source->target`
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub strength: Strength,
}

impl GraphEdge {
    pub fn key(source: &str, target: &str) -> String {
        format!("{}->{}", source, target)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphModel {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}
