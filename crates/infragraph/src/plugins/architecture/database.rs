//! Architecture diagram database
//!
//! Holds the grouped resources, synthesized nodes and inferred edges of one
//! architecture diagram.

use anyhow::Result;

use super::grouper::ClusterGroup;
use super::inference::InferredEdge;
use super::synthesizer::DiagramNode;
use crate::core::Database;

/// Architecture diagram database
#[derive(Debug, Default)]
pub struct ArchitectureDatabase {
    groups: ClusterGroup,
    nodes: Vec<DiagramNode>,
    edges: Vec<InferredEdge>,
}

impl ArchitectureDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the grouped resources the nodes were synthesized from
    pub fn set_groups(&mut self, groups: ClusterGroup) {
        self.groups = groups;
    }

    /// Grouped resources, including those that produced no node
    pub fn groups(&self) -> &ClusterGroup {
        &self.groups
    }

    /// Insert a node, or replace the node with the same name
    ///
    /// A replaced node keeps its position in traversal order. Returns true
    /// if an existing node was overwritten.
    pub fn upsert_node(&mut self, node: DiagramNode) -> bool {
        match self.nodes.iter_mut().find(|n| n.name == node.name) {
            Some(existing) => {
                *existing = node;
                true
            }
            None => {
                self.nodes.push(node);
                false
            }
        }
    }

    /// Nodes in traversal order
    pub fn node_slice(&self) -> &[DiagramNode] {
        &self.nodes
    }

    /// Inferred edges
    pub fn edge_slice(&self) -> &[InferredEdge] {
        &self.edges
    }
}

impl Database for ArchitectureDatabase {
    type Node = DiagramNode;
    type Edge = InferredEdge;

    fn add_node(&mut self, node: Self::Node) -> Result<()> {
        self.upsert_node(node);
        Ok(())
    }

    fn add_edge(&mut self, edge: Self::Edge) -> Result<()> {
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
        self.groups = ClusterGroup::default();
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
