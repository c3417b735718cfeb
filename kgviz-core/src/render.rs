//! Visual attribute assembly for the generated page.
//!
//! Turns the raw mapper output into the arrays embedded in the document:
//! duplicates collapse (first occurrence wins), every node gets a fixed
//! position on a circle, sizes and colors come from [`VisualConfig`].

use std::collections::HashSet;
use std::f64::consts::PI;

use serde::Serialize;

use crate::config::VisualConfig;
use crate::models::{GraphEdge, GraphModel, Strength};

/// Radius of the initial circular layout.
pub const LAYOUT_RADIUS: f64 = 100.0;

/// Unconnected nodes are drawn this much larger.
pub const UNCONNECTED_SIZE_FACTOR: f64 = 1.5;

/// Edge size grows by `strength / STRENGTH_DIVISOR`.
pub const STRENGTH_DIVISOR: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    pub id: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub unconnected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub color: String,
    pub size: f64,
    pub strength: Strength,
}

/// Renderer-ready graph: unique nodes and edges with visual attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderGraph {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
}

/// Position of the `index`-th of `count` nodes on the layout circle.
pub fn circle_position(index: usize, count: usize) -> (f64, f64) {
    if count == 0 {
        return (LAYOUT_RADIUS, 0.0);
    }
    let angle = index as f64 / count as f64 * 2.0 * PI;
    (angle.cos() * LAYOUT_RADIUS, angle.sin() * LAYOUT_RADIUS)
}

pub fn node_size(unconnected: bool, config: &VisualConfig) -> f64 {
    if unconnected {
        config.node.default_size * UNCONNECTED_SIZE_FACTOR
    } else {
        config.node.default_size
    }
}

pub fn node_color(unconnected: bool, config: &VisualConfig) -> &str {
    if unconnected {
        &config.unconnected_color
    } else {
        &config.node.default_color
    }
}

/// Invalid (and zero) strength leaves the default size untouched.
pub fn edge_size(strength: Strength, config: &VisualConfig) -> f64 {
    match strength.value() {
        Some(s) if s != 0 => config.edge.default_size + s as f64 / STRENGTH_DIVISOR,
        _ => config.edge.default_size,
    }
}

/// Build the render model.
///
/// Positions use the node's index in the raw list and the raw node count,
/// so a duplicate still occupies its slot on the circle even though only
/// the first occurrence is drawn.
pub fn render_graph(graph: &GraphModel, config: &VisualConfig) -> RenderGraph {
    let count = graph.nodes.len();

    let mut seen_nodes = HashSet::with_capacity(count);
    let mut nodes = Vec::with_capacity(count);
    for (idx, n) in graph.nodes.iter().enumerate() {
        if !seen_nodes.insert(n.id.as_str()) {
            continue;
        }
        let (x, y) = circle_position(idx, count);
        nodes.push(RenderNode {
            id: n.id.clone(),
            label: n.label.clone(),
            x,
            y,
            size: node_size(n.unconnected, config),
            color: node_color(n.unconnected, config).to_string(),
            node_type: n.node_type.clone(),
            description: n.description.clone(),
            unconnected: n.unconnected,
        });
    }

    let mut seen_edges = HashSet::with_capacity(graph.edges.len());
    let mut edges = Vec::with_capacity(graph.edges.len());
    for e in &graph.edges {
        let key = GraphEdge::key(&e.source, &e.target);
        if !seen_edges.insert(key.clone()) {
            continue;
        }
        edges.push(RenderEdge {
            id: key,
            source: e.source.clone(),
            target: e.target.clone(),
            label: e.label.clone(),
            color: config.edge.default_color.clone(),
            size: edge_size(e.strength, config),
            strength: e.strength,
        });
    }

    tracing::debug!(
        raw_nodes = count,
        nodes = nodes.len(),
        raw_edges = graph.edges.len(),
        edges = edges.len(),
        "Assembled render graph"
    );

    RenderGraph { nodes, edges }
}

// ============================================================================
// TESTS
// ============================================================================
