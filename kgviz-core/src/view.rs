//! Client view-state: filters and neighbor highlighting.
//!
//! Mirrors the script embedded by [`crate::html`] so the interaction rules
//! can be exercised without a browser. Visibility and color of every
//! element are derived from three inputs: the selected node type, the
//! minimum edge strength and the clicked node.

use std::collections::HashSet;

use crate::config::VisualConfig;
use crate::render::{node_color, RenderEdge, RenderGraph, RenderNode};

/// Derived presentation of a single node or edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementView {
    pub hidden: bool,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub visible_node_type: Option<String>,
    /// `0` disables the strength filter.
    pub min_edge_strength: i64,
    pub selected_node: Option<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty selection clears the type filter.
    pub fn select_type(&mut self, node_type: impl Into<String>) {
        let t = node_type.into();
        self.visible_node_type = if t.is_empty() { None } else { Some(t) };
    }

    pub fn set_min_strength(&mut self, min: i64) {
        self.min_edge_strength = min;
    }

    /// Click on a node.
    pub fn select_node(&mut self, id: impl Into<String>) {
        self.selected_node = Some(id.into());
    }

    /// Click on empty canvas.
    pub fn clear_selection(&mut self) {
        self.selected_node = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The selected node plus everything sharing an edge with it.
    fn highlighted<'a>(&self, graph: &'a RenderGraph) -> Option<HashSet<&'a str>> {
        let selected = self.selected_node.as_deref()?;
        let mut set = HashSet::new();
        for e in &graph.edges {
            if e.source == selected {
                set.insert(e.target.as_str());
            }
            if e.target == selected {
                set.insert(e.source.as_str());
            }
        }
        if let Some(n) = graph.nodes.iter().find(|n| n.id == selected) {
            set.insert(n.id.as_str());
        }
        Some(set)
    }

    pub fn node_hidden(&self, node: &RenderNode) -> bool {
        match self.visible_node_type.as_deref() {
            None => false,
            Some(t) => !node.node_type.as_deref().is_some_and(|nt| nt.contains(t)),
        }
    }

    pub fn edge_hidden(&self, edge: &RenderEdge) -> bool {
        if self.min_edge_strength <= 0 {
            return false;
        }
        match edge.strength.value() {
            Some(s) => s < self.min_edge_strength,
            None => true,
        }
    }

    pub fn node_view(
        &self,
        node: &RenderNode,
        graph: &RenderGraph,
        config: &VisualConfig,
    ) -> ElementView {
        let lit = match self.highlighted(graph) {
            None => true,
            Some(set) => set.contains(node.id.as_str()),
        };
        let color = if lit {
            node_color(node.unconnected, config)
        } else {
            config.dim_color.as_str()
        };
        ElementView {
            hidden: self.node_hidden(node),
            color: color.to_string(),
        }
    }

    pub fn edge_view(&self, edge: &RenderEdge, config: &VisualConfig) -> ElementView {
        let incident = match self.selected_node.as_deref() {
            None => true,
            Some(sel) => edge.source == sel || edge.target == sel,
        };
        let color = if incident {
            &config.edge.default_color
        } else {
            &config.dim_color
        };
        ElementView {
            hidden: self.edge_hidden(edge),
            color: color.clone(),
        }
    }
}

/// Distinct entries of the comma-separated node types, in first-seen order.
pub fn node_type_options(graph: &RenderGraph) -> Vec<String> {
    let mut options: Vec<String> = Vec::new();
    for t in graph.nodes.iter().filter_map(|n| n.node_type.as_deref()) {
        for part in t.split(',').map(str::trim) {
            if !part.is_empty() && !options.iter().any(|o| o == part) {
                options.push(part.to_string());
            }
        }
    }
    options
}
