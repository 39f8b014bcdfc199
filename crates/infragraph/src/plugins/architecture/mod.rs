//! Architecture diagram plugin
//!
//! Turns Terraform-like `resource "<type>" "<name>"` declarations into a
//! clustered cloud architecture diagram.

use crate::core::Diagram;

mod classifier;
mod database;
mod extractor;
mod grouper;
mod inference;
mod parser;
mod renderer;
mod synthesizer;

pub use classifier::*;
pub use database::*;
pub use extractor::*;
pub use grouper::*;
pub use inference::*;
pub use parser::*;
pub use renderer::*;
pub use synthesizer::*;

/// Architecture diagram implementation
pub struct ArchitectureDiagram;

impl Diagram for ArchitectureDiagram {
    type Database = ArchitectureDatabase;
    type Parser = ArchitectureParser;
    type Renderer = ArchitectureRenderer;

    fn create_parser() -> Self::Parser {
        ArchitectureParser::new()
    }

    fn create_database() -> Self::Database {
        ArchitectureDatabase::new()
    }

    fn create_renderer(title: &str) -> Self::Renderer {
        ArchitectureRenderer::new(title)
    }

    fn name() -> &'static str {
        "architecture"
    }

    fn version() -> &'static str {
        "0.1.0"
    }
}
