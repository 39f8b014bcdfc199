//! Business-process rendering
//!
//! Lanes become DOT clusters stacked along the flow direction. Each element
//! is drawn with the shape of its BPMN kind.

use anyhow::Result;
use tracing::debug;

use super::database::ProcessDatabase;
use super::definition::ElementKind;
use crate::core::dot::slug;
use crate::core::{Direction, DotCluster, DotEdge, DotGraph, DotNode, Renderer};

pub struct ProcessRenderer {
    title: String,
    direction: Direction,
}

impl ProcessRenderer {
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

fn fill_color(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::StartEvent => "#D5F5E3",
        ElementKind::EndEvent => "#FADBD8",
        ElementKind::ExclusiveGateway => "#FCF3CF",
        ElementKind::Task | ElementKind::Subprocess => "#D6EAF8",
    }
}

impl Renderer<ProcessDatabase> for ProcessRenderer {
    type Output = DotGraph;

    fn render(&self, database: &ProcessDatabase) -> Result<DotGraph> {
        let mut graph = DotGraph::new(&self.title)
            .with_attr("rankdir", self.direction.rankdir())
            .with_attr("fontsize", "14")
            .with_attr("bgcolor", "white")
            .with_attr("pad", "0.5")
            .with_attr("nodesep", "0.5")
            .with_node_default("fontname", "Sans-Serif")
            .with_node_default("fontsize", "11")
            .with_edge_default("fontname", "Sans-Serif")
            .with_edge_default("fontsize", "10");

        for (index, lane) in database.lanes().iter().enumerate() {
            let mut cluster = DotCluster::new(format!("lane_{}_{}", index, slug(lane)), lane)
                .with_attr("style", "rounded")
                .with_attr("color", "#5D6D7E");
            for element in database.lane_elements(lane) {
                let label = match element.kind {
                    // events carry their name outside the small circle
                    ElementKind::StartEvent | ElementKind::EndEvent => "",
                    _ => element.name.as_str(),
                };
                let mut node = DotNode::new(&element.name)
                    .with_attr("label", label)
                    .with_attr("shape", element.kind.dot_shape())
                    .with_attr("style", element.kind.dot_style())
                    .with_attr("fillcolor", fill_color(element.kind));
                if label.is_empty() {
                    node = node.with_attr("xlabel", &element.name);
                }
                cluster.add_node(node);
            }
            graph.add_cluster(cluster);
        }

        for flow in database.flow_slice() {
            let mut edge = DotEdge::new(&flow.source, &flow.target);
            if let Some(label) = &flow.label {
                edge = edge.with_attr("label", label);
            }
            graph.add_edge(edge);
        }

        debug!(
            lanes = graph.clusters.len(),
            elements = graph.node_count(),
            flows = graph.edges.len(),
            "Rendered process graph"
        );
        Ok(graph)
    }

    fn name(&self) -> &'static str {
        "bpmn-dot"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        "dot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Parser;
    use crate::plugins::bpmn::{ProcessDefinition, ProcessParser, ProcessStep};

    #[test]
    fn test_lanes_as_clusters() {
        let def = ProcessDefinition::new(
            &["Sales Team", "Warehouse"],
            vec![
                ProcessStep::new("Start", "Sales Team", "start").then("Pick"),
                ProcessStep::new("Pick", "Warehouse", "subprocess").branch("Start", "retry"),
            ],
        );
        let mut db = ProcessDatabase::new();
        ProcessParser::new().parse(&def, &mut db).unwrap();
        let graph = ProcessRenderer::new("Fulfilment").render(&db).unwrap();

        assert_eq!(graph.clusters.len(), 2);
        assert_eq!(graph.clusters[0].id, "lane_0_sales_team");
        assert_eq!(graph.clusters[1].label, "Warehouse");

        let start = graph.find_node("Start").unwrap();
        assert_eq!(start.attr("shape"), Some("circle"));
        assert_eq!(start.attr("xlabel"), Some("Start"));
        assert_eq!(graph.find_node("Pick").unwrap().attr("style"), Some("rounded,filled,bold"));

        assert!(graph.edges[0].attr("label").is_none());
        assert_eq!(graph.edges[1].attr("label"), Some("retry"));
    }

    #[test]
    fn test_empty_lane_still_drawn() {
        let def = ProcessDefinition::new(&["A", "B"], vec![ProcessStep::new("x", "A", "task")]);
        let mut db = ProcessDatabase::new();
        ProcessParser::new().parse(&def, &mut db).unwrap();
        let graph = ProcessRenderer::new("t").render(&db).unwrap();
        assert_eq!(graph.clusters.len(), 2);
        assert!(graph.clusters[1].nodes.is_empty());
    }
}
