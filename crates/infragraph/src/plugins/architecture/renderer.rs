//! Architecture diagram rendering
//!
//! Produces the DOT description for an architecture diagram. Network,
//! compute and app nodes sit inside labelled clusters; storage, database
//! and monitoring nodes are drawn at top level. The "Users" actor is always
//! drawn, even when no edge reaches it.

use anyhow::Result;
use tracing::{debug, span, Level};

use super::classifier::Category;
use super::database::ArchitectureDatabase;
use super::inference::{EdgeEndpoint, USERS_ACTOR};
use super::synthesizer::DiagramNode;
use crate::core::{Direction, DotCluster, DotEdge, DotGraph, DotNode, Renderer};

/// Node ID of the implicit actor, kept apart from resource names
pub const USERS_NODE_ID: &str = "actor:Users";

/// Renders an [`ArchitectureDatabase`] as a left-to-right DOT graph
pub struct ArchitectureRenderer {
    title: String,
    direction: Direction,
}

impl ArchitectureRenderer {
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

    fn base_graph(&self) -> DotGraph {
        DotGraph::new(&self.title)
            .with_attr("splines", "ortho")
            .with_attr("nodesep", "0.6")
            .with_attr("ranksep", "0.9")
            .with_attr("fontsize", "12")
            .with_attr("bgcolor", "white")
            .with_attr("pad", "0.5")
            .with_attr("rankdir", self.direction.rankdir())
            .with_node_default("style", "filled")
            .with_node_default("fontname", "Sans-Serif")
            .with_node_default("fontsize", "13")
            .with_edge_default("color", "#7B8894")
            .with_edge_default("fontcolor", "#2D3436")
            .with_edge_default("fontname", "Sans-Serif")
            .with_edge_default("fontsize", "13")
    }
}

fn dot_node(node: &DiagramNode) -> DotNode {
    DotNode::new(&node.name)
        .with_attr("label", &node.label)
        .with_attr("shape", node.kind.dot_shape())
        .with_attr("fillcolor", node.kind.fill_color())
        .with_attr("tooltip", format!("{}: {}", node.kind, node.resource_type))
}

fn endpoint_id(endpoint: &EdgeEndpoint) -> &str {
    match endpoint {
        EdgeEndpoint::Users => USERS_NODE_ID,
        EdgeEndpoint::Node(name) => name,
    }
}

impl Renderer<ArchitectureDatabase> for ArchitectureRenderer {
    type Output = DotGraph;

    fn render(&self, database: &ArchitectureDatabase) -> Result<DotGraph> {
        let render_span = span!(Level::DEBUG, "render_architecture");
        let _enter = render_span.enter();

        let mut graph = self.base_graph();

        for category in Category::ALL {
            let members = database
                .node_slice()
                .iter()
                .filter(|n| n.category == category);

            match category.cluster_label() {
                Some(label) => {
                    let mut cluster = DotCluster::new(category.as_str(), label);
                    for node in members {
                        cluster.add_node(dot_node(node));
                    }
                    if !cluster.nodes.is_empty() {
                        graph.add_cluster(cluster);
                    }
                }
                None => {
                    for node in members {
                        graph.add_node(dot_node(node));
                    }
                }
            }
        }

        graph.add_node(
            DotNode::new(USERS_NODE_ID)
                .with_attr("label", USERS_ACTOR)
                .with_attr("shape", "egg")
                .with_attr("fillcolor", "#FFFFFF"),
        );

        for edge in database.edge_slice() {
            graph.add_edge(
                DotEdge::new(endpoint_id(&edge.source), &edge.target)
                    .with_attr("label", &edge.label),
            );
        }

        debug!(
            clusters = graph.clusters.len(),
            nodes = graph.node_count(),
            edges = graph.edges.len(),
            "Rendered architecture graph"
        );
        Ok(graph)
    }

    fn name(&self) -> &'static str {
        "architecture-dot"
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
    use crate::plugins::architecture::ArchitectureParser;

    fn render(input: &str) -> DotGraph {
        let mut db = ArchitectureDatabase::new();
        ArchitectureParser::new().parse(input, &mut db).unwrap();
        ArchitectureRenderer::new("Req_Arch_001: Demo")
            .render(&db)
            .unwrap()
    }

    #[test]
    fn test_clusters_and_top_level_nodes() {
        let graph = render(
            r#"
resource "azurerm_linux_virtual_machine" "vm1" {}
resource "azurerm_service_plan" "shop" {}
resource "azurerm_mssql_database" "sqldb1" {}
"#,
        );

        let labels: Vec<_> = graph.clusters.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Compute", "App Services"]);
        assert_eq!(graph.clusters[1].nodes[0].attr("label"), Some("shop-plan"));

        // sqldb1 at top level, then the actor
        let top: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(top, vec!["sqldb1", USERS_NODE_ID]);
        assert_eq!(graph.attr("rankdir"), Some("LR"));
        assert_eq!(graph.attr("splines"), Some("ortho"));
        assert_eq!(graph.attr("label"), Some("Req_Arch_001: Demo"));
    }

    #[test]
    fn test_edges_reference_actor_id() {
        let graph = render(
            r#"
resource "azurerm_linux_virtual_machine" "vm1" {}
resource "azurerm_mssql_database" "sqldb1" {}
"#,
        );
        assert_eq!(graph.edges.len(), 2);
        assert_eq!(graph.edges[0].from, USERS_NODE_ID);
        assert_eq!(graph.edges[0].to, "vm1");
        assert_eq!(graph.edges[0].attr("label"), Some("HTTP/HTTPS"));
        assert_eq!(graph.edges[1].from, "vm1");
        assert_eq!(graph.edges[1].attr("label"), Some("SQL"));
    }

    #[test]
    fn test_actor_drawn_without_edges() {
        let graph = render(r#"resource "azurerm_storage_account" "data1" {}"#);
        assert!(graph.clusters.is_empty());
        assert!(graph.edges.is_empty());
        assert!(graph.find_node(USERS_NODE_ID).is_some());
        assert_eq!(graph.find_node("data1").unwrap().attr("shape"), Some("cylinder"));
    }

    #[test]
    fn test_renderer_metadata() {
        let renderer = ArchitectureRenderer::new("t").with_direction(Direction::TopDown);
        assert_eq!(renderer.format(), "dot");
        assert_eq!(renderer.base_graph().attr("rankdir"), Some("TB"));
    }
}
