//! Edge inference
//!
//! Declarations carry no usable relationships, so edges are guessed from
//! node names: an implicit "Users" actor talks to an entry node, and the
//! entry node talks to a data node. The match order below is relied on by
//! existing diagrams and must not change:
//!
//! 1. entry: first name containing `webapp`, or `web` without `sql`
//! 2. entry fallback: first node drawn as a VM
//! 3. data: first name containing `sqldb` or `sql`

use std::fmt;

use tracing::debug;

use super::synthesizer::{DiagramNode, VisualKind};

/// Label of the implicit external actor
pub const USERS_ACTOR: &str = "Users";
/// Label of the actor-to-entry edge
pub const HTTP_LABEL: &str = "HTTP/HTTPS";
/// Label of the entry-to-data edge
pub const SQL_LABEL: &str = "SQL";

/// Start of an inferred edge
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EdgeEndpoint {
    /// The implicit "Users" actor
    Users,
    /// A synthesized node, by name
    Node(String),
}

impl fmt::Display for EdgeEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeEndpoint::Users => write!(f, "{}", USERS_ACTOR),
            EdgeEndpoint::Node(name) => write!(f, "{}", name),
        }
    }
}

/// A guessed connection between two diagram elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredEdge {
    pub source: EdgeEndpoint,
    /// Target node name
    pub target: String,
    pub label: String,
}

impl InferredEdge {
    pub fn new(source: EdgeEndpoint, target: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            source,
            target: target.into(),
            label: label.into(),
        }
    }
}

fn is_web_name(name: &str) -> bool {
    name.contains("webapp") || (name.contains("web") && !name.contains("sql"))
}

fn is_sql_name(name: &str) -> bool {
    name.contains("sqldb") || name.contains("sql")
}

/// Node receiving user traffic, if any
pub fn select_entry_node(nodes: &[DiagramNode]) -> Option<&DiagramNode> {
    nodes
        .iter()
        .find(|n| is_web_name(&n.name))
        .or_else(|| nodes.iter().find(|n| n.kind == VisualKind::Vm))
}

/// Node holding persistent data, if any
pub fn select_data_node(nodes: &[DiagramNode]) -> Option<&DiagramNode> {
    nodes.iter().find(|n| is_sql_name(&n.name))
}

/// Infer at most two edges from nodes in traversal order
pub fn infer_edges(nodes: &[DiagramNode]) -> Vec<InferredEdge> {
    let mut edges = Vec::with_capacity(2);

    let Some(entry) = select_entry_node(nodes) else {
        debug!("No entry node, no edges inferred");
        return edges;
    };
    edges.push(InferredEdge::new(EdgeEndpoint::Users, &entry.name, HTTP_LABEL));

    if let Some(data) = select_data_node(nodes) {
        edges.push(InferredEdge::new(
            EdgeEndpoint::Node(entry.name.clone()),
            &data.name,
            SQL_LABEL,
        ));
    }

    debug!(entry = %entry.name, edge_count = edges.len(), "Edges inferred");
    edges
}
