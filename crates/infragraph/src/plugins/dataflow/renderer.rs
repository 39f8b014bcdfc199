use anyhow::Result;
use tracing::debug;

use super::database::DataFlowDatabase;
use crate::core::{Direction, DotEdge, DotGraph, DotNode, Renderer};

/// Renders a [`DataFlowDatabase`] as a flat DOT graph
pub struct DataFlowRenderer {
    title: String,
    direction: Direction,
}

impl DataFlowRenderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            direction: Direction::LeftRight,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

impl Renderer<DataFlowDatabase> for DataFlowRenderer {
    type Output = DotGraph;

    fn render(&self, database: &DataFlowDatabase) -> Result<DotGraph> {
        let mut graph = DotGraph::new(&self.title)
            .with_attr("rankdir", self.direction.rankdir())
            .with_attr("fontsize", "12")
            .with_attr("bgcolor", "white")
            .with_attr("pad", "0.5")
            .with_node_default("style", "filled")
            .with_node_default("fillcolor", "#F4F6F7")
            .with_node_default("fontname", "Sans-Serif")
            .with_edge_default("fontname", "Sans-Serif")
            .with_edge_default("fontsize", "11");

        for node in database.node_slice() {
            graph.add_node(
                DotNode::new(&node.name)
                    .with_attr("label", &node.name)
                    .with_attr("shape", node.kind.dot_shape()),
            );
        }
        for edge in database.edge_slice() {
            graph.add_edge(
                DotEdge::new(&edge.source, &edge.target).with_attr("label", &edge.label),
            );
        }

        debug!(nodes = graph.node_count(), edges = graph.edges.len(), "Rendered data-flow graph");
        Ok(graph)
    }

    fn name(&self) -> &'static str {
        "dataflow-dot"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        "dot"
    }
}
