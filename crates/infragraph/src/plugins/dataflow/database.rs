//! Data-flow diagram database

use std::fmt;

use anyhow::Result;

use crate::core::Database;

/// Role of a data-flow element, chosen from its name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowNodeKind {
    /// Persistent store (database, file store)
    DataStore,
    /// User or system outside the modelled boundary
    ExternalEntity,
    /// Produced document or report
    Document,
    /// Anything that transforms data
    Process,
}

impl FlowNodeKind {
    /// Pick a kind from substrings of the lower-cased element name
    ///
    /// Tested in order: store, external entity, document. `db` is a plain
    /// substring test, so names such as `feedback` count as stores.
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

        if has(&["database", "store", "db"]) {
            FlowNodeKind::DataStore
        } else if has(&["user", "actor"]) {
            FlowNodeKind::ExternalEntity
        } else if has(&["report", "document"]) {
            FlowNodeKind::Document
        } else {
            FlowNodeKind::Process
        }
    }

    pub fn dot_shape(&self) -> &'static str {
        match self {
            FlowNodeKind::DataStore => "cylinder",
            FlowNodeKind::ExternalEntity => "parallelogram",
            FlowNodeKind::Document => "note",
            FlowNodeKind::Process => "box",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FlowNodeKind::DataStore => "data_store",
            FlowNodeKind::ExternalEntity => "external_entity",
            FlowNodeKind::Document => "document",
            FlowNodeKind::Process => "process",
        }
    }
}

impl fmt::Display for FlowNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowNode {
    pub name: String,
    pub kind: FlowNodeKind,
}

impl FlowNode {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = FlowNodeKind::from_name(&name);
        Self { name, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowEdge {
    pub source: String,
    pub target: String,
    pub label: String,
}

/// Data-flow diagram database
///
/// Nodes are unique by name and kept in first-appearance order.
#[derive(Debug, Default)]
pub struct DataFlowDatabase {
    nodes: Vec<FlowNode>,
    edges: Vec<FlowEdge>,
}

impl DataFlowDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node unless one with the same name exists; returns true if added
    pub fn ensure_node(&mut self, name: &str) -> bool {
        if self.get_node(name).is_some() {
            return false;
        }
        self.nodes.push(FlowNode::new(name));
        true
    }

    pub fn node_slice(&self) -> &[FlowNode] {
        &self.nodes
    }

    pub fn edge_slice(&self) -> &[FlowEdge] {
        &self.edges
    }
}

impl Database for DataFlowDatabase {
    type Node = FlowNode;
    type Edge = FlowEdge;

    fn add_node(&mut self, node: Self::Node) -> Result<()> {
        if self.get_node(&node.name).is_none() {
            self.nodes.push(node);
        }
        Ok(())
    }

    fn add_edge(&mut self, edge: Self::Edge) -> Result<()> {
        if self.get_node(&edge.source).is_none() || self.get_node(&edge.target).is_none() {
            anyhow::bail!(
                "edge {} -> {} references an unknown node",
                edge.source,
                edge.target
            );
        }
        self.edges.push(edge);
        Ok(())
    }

    fn get_node(&self, id: &str) -> Option<&Self::Node> {
        self.nodes.iter().find(|n| n.name == id)
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.nodes.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Self::Edge> {
        self.edges.iter()
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
