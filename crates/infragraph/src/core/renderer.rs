//! Core renderer trait for diagram output
//!
//! Renderers convert a populated database into a graph description. Layout
//! and rasterization are left to the emitter's backend.

use anyhow::Result;

use super::Database;

/// Core trait for diagram renderers
pub trait Renderer<D: Database>: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render the diagram database into the output format
    fn render(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the version of this renderer
    fn version(&self) -> &'static str;

    /// Get the supported output format
    fn format(&self) -> &'static str;
}
