//! Infragraph - Generate architecture, data-flow and process diagrams
//!
//! Infragraph reads Terraform-like `resource` blocks and simple workflow
//! definitions and produces Graphviz diagrams. Layout and image rendering
//! are done by Graphviz's `dot`; this crate builds the graph description.
//!
//! # Quick Start
//!
//! ```rust
//! use infragraph::architecture_dot;
//!
//! let tf = r#"
//! resource "azurerm_linux_virtual_machine" "vm1" {}
//! resource "azurerm_mssql_database" "sqldb1" {}
//! "#;
//! let dot = architecture_dot(tf, "Req_Arch_001: Demo").unwrap().unwrap();
//! assert!(dot.contains("\"vm1\" -> \"sqldb1\""));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use infragraph::prelude::*;
//!
//! let tf = r#"resource "azurerm_service_plan" "shop" {}"#;
//!
//! // Parse into a database
//! let parser = ArchitectureParser::new();
//! let mut database = ArchitectureDatabase::new();
//! parser.parse(tf, &mut database).unwrap();
//!
//! // Access the synthesized nodes
//! assert_eq!(database.node_count(), 1);
//! assert_eq!(database.get_node("shop").unwrap().label, "shop-plan");
//!
//! // Render to a DOT graph
//! let renderer = ArchitectureRenderer::new("Plans");
//! let graph = renderer.render(&database).unwrap();
//! assert_eq!(graph.clusters[0].label, "App Services");
//! ```
//!
//! Whole projects are driven by [`pipeline::PipelineController`], which reads
//! a YAML requirement file and writes artifacts through an
//! [`core::Emitter`].

pub mod core;
pub mod pipeline;
pub mod plugins;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Database, Diagram, DiagramError, Direction, DotGraph, Emitter, GraphvizEmitter,
        OutputFormat, Parser, Renderer,
    };
    pub use crate::pipeline::{PipelineController, ProjectConfig, Requirement, RequirementKind};
    pub use crate::plugins::architecture::{
        ArchitectureDatabase, ArchitectureDiagram, ArchitectureParser, ArchitectureRenderer,
        Category, VisualKind,
    };
    pub use crate::plugins::bpmn::{ProcessDefinition, ProcessDiagram, ProcessStep};
    pub use crate::plugins::dataflow::{DataFlowDiagram, FlowMapping};
}

/// Build the architecture graph for declaration text
///
/// Returns `Ok(None)` when the text declares no resources.
///
/// # Example
/// ```rust
/// use infragraph::architecture_graph;
///
/// let graph = architecture_graph(r#"resource "azurerm_storage_account" "logs" {}"#, "Logs")
///     .unwrap()
///     .unwrap();
/// assert!(graph.find_node("logs").is_some());
/// ```
pub fn architecture_graph(text: &str, title: &str) -> anyhow::Result<Option<DotGraph>> {
    synthesize::<plugins::architecture::ArchitectureDiagram>(text, title)
}

/// Build the architecture graph for declaration text and serialize it to DOT
pub fn architecture_dot(text: &str, title: &str) -> anyhow::Result<Option<String>> {
    Ok(architecture_graph(text, title)?.map(|graph| graph.to_dot()))
}
