//! Business-process diagram database

use anyhow::Result;

use super::definition::ElementKind;
use crate::core::Database;

/// A step placed in a lane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessElement {
    pub name: String,
    pub lane: String,
    pub kind: ElementKind,
}

/// Directed connection between two elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceFlow {
    pub source: String,
    pub target: String,
    /// Condition label; `None` for plain `next` links
    pub label: Option<String>,
}

/// Business-process diagram database
#[derive(Debug, Default)]
pub struct ProcessDatabase {
    lanes: Vec<String>,
    elements: Vec<ProcessElement>,
    flows: Vec<SequenceFlow>,
}

impl ProcessDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a lane; duplicate names are kept once
    pub fn add_lane(&mut self, name: &str) {
        if !self.has_lane(name) {
            self.lanes.push(name.to_string());
        }
    }

    pub fn has_lane(&self, name: &str) -> bool {
        self.lanes.iter().any(|l| l == name)
    }

    pub fn lanes(&self) -> &[String] {
        &self.lanes
    }

    /// Elements of one lane in insertion order
    pub fn lane_elements<'a>(&'a self, lane: &'a str) -> impl Iterator<Item = &'a ProcessElement> {
        self.elements.iter().filter(move |e| e.lane == lane)
    }

    pub fn flow_slice(&self) -> &[SequenceFlow] {
        &self.flows
    }
}

impl Database for ProcessDatabase {
    type Node = ProcessElement;
    type Edge = SequenceFlow;

    /// Elements are unique by name; a later step replaces the earlier one
    fn add_node(&mut self, node: Self::Node) -> Result<()> {
        if !self.has_lane(&node.lane) {
            anyhow::bail!("lane '{}' is not defined", node.lane);
        }
        match self.elements.iter_mut().find(|e| e.name == node.name) {
            Some(existing) => *existing = node,
            None => self.elements.push(node),
        }
        Ok(())
    }

    fn add_edge(&mut self, edge: Self::Edge) -> Result<()> {
        self.flows.push(edge);
        Ok(())
    }

    fn get_node(&self, id: &str) -> Option<&Self::Node> {
        self.elements.iter().find(|e| e.name == id)
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.elements.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Self::Edge> {
        self.flows.iter()
    }

    fn clear(&mut self) {
        self.lanes.clear();
        self.elements.clear();
        self.flows.clear();
    }

    fn node_count(&self) -> usize {
        self.elements.len()
    }

    fn edge_count(&self) -> usize {
        self.flows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(name: &str, lane: &str) -> ProcessElement {
        ProcessElement {
            name: name.to_string(),
            lane: lane.to_string(),
            kind: ElementKind::Task,
        }
    }

    #[test]
    fn test_element_needs_known_lane() {
        let mut db = ProcessDatabase::new();
        db.add_lane("Shop");
        assert!(db.add_node(element("Pack", "Shop")).is_ok());
        assert!(db.add_node(element("Pay", "Bank")).is_err());
        assert_eq!(db.node_count(), 1);
    }

    #[test]
    fn test_lane_elements_and_duplicates() {
        let mut db = ProcessDatabase::new();
        db.add_lane("A");
        db.add_lane("B");
        db.add_lane("A");
        db.add_node(element("x", "A")).unwrap();
        db.add_node(element("y", "B")).unwrap();
        db.add_node(element("x", "B")).unwrap();

        assert_eq!(db.lanes(), ["A", "B"]);
        assert_eq!(db.node_count(), 2);
        assert_eq!(db.lane_elements("A").count(), 0);
        let in_b: Vec<_> = db.lane_elements("B").map(|e| e.name.as_str()).collect();
        assert_eq!(in_b, vec!["x", "y"]);
    }
}
