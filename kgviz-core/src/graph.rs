//! Graph mapper: source records to a raw node/edge model
//!
//! - Each entity record appends one node, duplicates included
//! - Each relationship record appends one edge keyed `source->target`
//! - Nodes whose id never appears as an edge endpoint are flagged `unconnected`
//!
//! Uniqueness is enforced later, by the renderer.

use std::collections::HashSet;

use serde_json::Value;

use crate::models::{Entity, GraphEdge, GraphModel, GraphNode, Relationship, SourceRecord};

/// Walk a source document and pull out its tagged records in order.
///
/// An item carrying both an `entity` and a `relationship` yields both.
/// Items with neither, and non-array documents, yield nothing.
pub fn parse_records(document: &Value) -> Vec<SourceRecord> {
    let Some(items) = document.as_array() else {
        return vec![];
    };

    let mut records = Vec::with_capacity(items.len());
    for item in items {
        if let Some(entity) = item.get("entity").filter(|v| is_truthy(v)) {
            records.push(SourceRecord::Entity(Entity::from_value(entity)));
        }
        if let Some(rel) = item.get("relationship").filter(|v| is_truthy(v)) {
            records.push(SourceRecord::Relationship(Relationship::from_value(rel)));
        }
    }
    records
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Core mapping (pure, no I/O)
pub fn map_records(records: &[SourceRecord]) -> GraphModel {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    for record in records {
        match record {
            SourceRecord::Entity(e) => nodes.push(GraphNode {
                id: e.name.clone(),
                label: e.name.clone(),
                node_type: e.entity_type.clone(),
                description: e.description.clone(),
                unconnected: false,
            }),
            SourceRecord::Relationship(r) => edges.push(GraphEdge {
                id: GraphEdge::key(&r.source_entity, &r.target_entity),
                source: r.source_entity.clone(),
                target: r.target_entity.clone(),
                label: r.description.clone(),
                strength: r.strength,
            }),
        }
    }

    let connected = connected_ids(&edges);
    for node in &mut nodes {
        node.unconnected = !connected.contains(node.id.as_str());
    }

    GraphModel { nodes, edges }
}

pub fn map_document(document: &Value) -> GraphModel {
    map_records(&parse_records(document))
}

/// Every id referenced as the source or target of some edge
pub fn connected_ids(edges: &[GraphEdge]) -> HashSet<&str> {
    edges
        .iter()
        .flat_map(|e| [e.source.as_str(), e.target.as_str()])
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
