//! Core diagram trait tying a parser, database and renderer together

use anyhow::Result;
use tracing::{debug, span, Level};

use super::{Database, DotGraph, Parser, Renderer};

/// Core trait for diagram kinds
///
/// Each diagram kind (architecture, data-flow, business-process) names its
/// database, parser and renderer so the pipeline can drive any of them the
/// same way.
pub trait Diagram: Send + Sync {
    /// The specific database type for this diagram
    type Database: Database;

    /// The parser type for this diagram
    type Parser: Parser<Self::Database>;

    /// The renderer type for this diagram
    type Renderer: Renderer<Self::Database, Output = DotGraph>;

    /// Create a new parser instance
    fn create_parser() -> Self::Parser;

    /// Create a new, empty database instance
    fn create_database() -> Self::Database;

    /// Create a renderer for a diagram with the given title
    fn create_renderer(title: &str) -> Self::Renderer;

    /// Get the name of this diagram kind
    fn name() -> &'static str;

    /// Get the version of this diagram kind
    fn version() -> &'static str;
}

/// Run parser and renderer for one diagram
///
/// Returns `Ok(None)` when the parser reports that the input holds nothing
/// to diagram; no database is built in that case.
pub fn synthesize<Dg: Diagram>(
    input: &<Dg::Parser as Parser<Dg::Database>>::Input,
    title: &str,
) -> Result<Option<DotGraph>> {
    let synth_span = span!(Level::DEBUG, "synthesize", diagram = Dg::name());
    let _enter = synth_span.enter();

    let parser = Dg::create_parser();
    if !parser.can_parse(input) {
        debug!("Parser found nothing to diagram");
        return Ok(None);
    }

    let mut database = Dg::create_database();
    parser.parse(input, &mut database)?;
    debug!(
        node_count = database.node_count(),
        edge_count = database.edge_count(),
        "Parsing completed"
    );

    let graph = Dg::create_renderer(title).render(&database)?;
    Ok(Some(graph))
}
