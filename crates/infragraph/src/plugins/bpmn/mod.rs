//! Business-process (BPMN-style) diagram plugin

use crate::core::Diagram;

mod database;
mod definition;
mod parser;
mod renderer;

pub use database::*;
pub use definition::*;
pub use parser::*;
pub use renderer::*;

/// Business-process diagram implementation
pub struct ProcessDiagram;

impl Diagram for ProcessDiagram {
    type Database = ProcessDatabase;
    type Parser = ProcessParser;
    type Renderer = ProcessRenderer;

    fn create_parser() -> Self::Parser {
        ProcessParser::new()
    }

    fn create_database() -> Self::Database {
        ProcessDatabase::new()
    }

    fn create_renderer(title: &str) -> Self::Renderer {
        ProcessRenderer::new(title)
    }

    fn name() -> &'static str {
        "business_process"
    }

    fn version() -> &'static str {
        "0.1.0"
    }
}
