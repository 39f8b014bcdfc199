//! Data-flow diagram plugin
//!
//! Draws processes, stores, external entities and documents connected by
//! labelled flows.

use crate::core::Diagram;

mod database;
mod parser;
mod renderer;

pub use database::*;
pub use parser::*;
pub use renderer::*;

/// Data-flow diagram implementation
pub struct DataFlowDiagram;

impl Diagram for DataFlowDiagram {
    type Database = DataFlowDatabase;
    type Parser = DataFlowParser;
    type Renderer = DataFlowRenderer;

    fn create_parser() -> Self::Parser {
        DataFlowParser::new()
    }

    fn create_database() -> Self::Database {
        DataFlowDatabase::new()
    }

    fn create_renderer(title: &str) -> Self::Renderer {
        DataFlowRenderer::new(title)
    }

    fn name() -> &'static str {
        "data_flow"
    }

    fn version() -> &'static str {
        "0.1.0"
    }
}
