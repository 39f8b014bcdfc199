//! Core database trait for diagram data storage
//!
//! This trait defines the interface for storing synthesized diagram data.
//! Each diagram kind implements this with its own node and edge data types.

use anyhow::Result;

/// Core trait for diagram databases
///
/// A database holds the nodes and edges a parser synthesized for one
/// diagram. It is created fresh for every generation call and dropped
/// once the diagram has been emitted.
pub trait Database: Send + Sync {
    /// The node data type for this database
    type Node: Clone + Send + Sync;

    /// The edge data type for this database
    type Edge: Clone + Send + Sync;

    /// Add a node to the database
    fn add_node(&mut self, node: Self::Node) -> Result<()>;

    /// Add an edge to the database
    fn add_edge(&mut self, edge: Self::Edge) -> Result<()>;

    /// Get a node by ID
    fn get_node(&self, id: &str) -> Option<&Self::Node>;

    /// Iterate over all nodes
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Iterate over all edges
    fn edges(&self) -> impl Iterator<Item = &Self::Edge>;

    /// Clear all data from the database
    fn clear(&mut self);

    /// Get the number of nodes
    fn node_count(&self) -> usize;

    /// Get the number of edges
    fn edge_count(&self) -> usize;

    /// Returns true if the database holds no nodes
    fn is_empty(&self) -> bool {
        self.node_count() == 0
    }
}
