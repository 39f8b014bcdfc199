//! Architecture parser
//!
//! Runs the synthesis stages over declaration text: extract, classify and
//! group, synthesize nodes, infer edges.

use anyhow::Result;
use tracing::{debug, info, span, trace, Level};

use super::database::ArchitectureDatabase;
use super::extractor::{extract_resources, has_resources};
use super::grouper::ClusterGroup;
use super::inference::infer_edges;
use super::synthesizer::synthesize_nodes;
use crate::core::{Database, Parser};

/// Parser from Terraform-like declaration text
pub struct ArchitectureParser;

impl ArchitectureParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ArchitectureParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<ArchitectureDatabase> for ArchitectureParser {
    type Input = str;

    fn parse(&self, input: &str, database: &mut ArchitectureDatabase) -> Result<()> {
        let parse_span = span!(Level::INFO, "parse_architecture", input_len = input.len());
        let _enter = parse_span.enter();

        let resources = extract_resources(input);
        trace!(resource_count = resources.len(), "Extracted resources");

        let groups = ClusterGroup::from_resources(&resources);
        debug!(
            categories = ?groups.categories().collect::<Vec<_>>(),
            "Grouped resources"
        );

        for node in synthesize_nodes(&groups) {
            if database.upsert_node(node) {
                debug!("Duplicate resource name overwrote an earlier node");
            }
        }
        database.set_groups(groups);

        for edge in infer_edges(database.node_slice()) {
            database.add_edge(edge)?;
        }

        info!(
            resources = resources.len(),
            nodes = database.node_count(),
            edges = database.edge_count(),
            "Architecture synthesized"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "architecture"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn can_parse(&self, input: &str) -> bool {
        has_resources(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::architecture::{Category, EdgeEndpoint, VisualKind};

    #[test]
    fn test_parse_full_stack() {
        let input = r#"
resource "azurerm_subnet" "app-snet" {}
resource "azurerm_linux_virtual_machine" "vm1" {}
resource "azurerm_service_plan" "shop" {}
resource "azurerm_storage_account" "blobs" {}
resource "azurerm_mssql_database" "sqldb1" {}
resource "azurerm_application_insights" "ai" {}
resource "azurerm_resource_group" "rg" {}
"#;
        let parser = ArchitectureParser::new();
        let mut db = ArchitectureDatabase::new();
        parser.parse(input, &mut db).unwrap();

        let names: Vec<_> = db.nodes().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["app-snet", "vm1", "shop", "blobs", "sqldb1", "ai"]);
        assert_eq!(db.get_node("shop").unwrap().label, "shop-plan");
        assert_eq!(db.groups().len(), 7);
        assert_eq!(db.groups().get(Category::Other).unwrap()[0].name, "rg");

        let edges: Vec<_> = db.edges().collect();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].source, EdgeEndpoint::Users);
        assert_eq!(edges[0].target, "vm1");
        assert_eq!(edges[1].target, "sqldb1");
    }

    #[test]
    fn test_duplicate_names_collapse() {
        let input = r#"
resource "azurerm_linux_virtual_machine" "shared" {}
resource "azurerm_storage_account" "shared" {}
"#;
        let mut db = ArchitectureDatabase::new();
        ArchitectureParser::new().parse(input, &mut db).unwrap();

        assert_eq!(db.node_count(), 1);
        assert_eq!(db.get_node("shared").unwrap().kind, VisualKind::StorageAccount);
        // The surviving node is no longer a VM, so there is no entry node
        assert_eq!(db.edge_count(), 0);
    }

    #[test]
    fn test_can_parse() {
        let parser = ArchitectureParser::new();
        assert!(parser.can_parse(r#"resource "a" "b" {}"#));
        assert!(!parser.can_parse("variable \"x\" {}"));
        assert!(!parser.can_parse(""));
        assert_eq!(parser.name(), "architecture");
    }
}
