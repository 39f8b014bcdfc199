//! Core parser trait for diagram sources
//!
//! A parser turns a diagram source (declaration text, flow mappings,
//! process steps) into nodes and edges stored in a database.

use anyhow::Result;

use super::Database;

/// Core trait for diagram parsers
///
/// The input type is chosen by each diagram kind: architecture diagrams
/// parse raw declaration text, data-flow and business-process diagrams
/// parse structured definitions from the project configuration.
pub trait Parser<D: Database>: Send + Sync {
    /// The source this parser consumes
    type Input: ?Sized;

    /// Parse the source into the provided database
    fn parse(&self, input: &Self::Input, database: &mut D) -> Result<()>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Get the version of this parser
    fn version(&self) -> &'static str;

    /// Check if the input holds anything worth diagramming
    ///
    /// Callers skip generation entirely when this returns false.
    fn can_parse(&self, input: &Self::Input) -> bool;
}
