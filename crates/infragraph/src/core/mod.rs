//! Core abstractions for diagram generation
//!
//! This module defines the traits every diagram kind implements (parser,
//! database, renderer) and the shared output path: DOT graph descriptions,
//! the emitter that turns them into files, and the DOT post-processor.

mod database;
mod diagram;
pub mod dot;
pub mod emitter;
mod error;
pub mod logging;
pub mod postprocess;
mod parser;
mod renderer;
mod types;

pub use database::*;
pub use diagram::*;
pub use dot::{DotCluster, DotEdge, DotGraph, DotNode};
pub use emitter::{artifact_path, prepare_render_environment, Emitter, GraphvizEmitter};
pub use error::*;
pub use logging::*;
pub use parser::*;
pub use postprocess::{float_labels, post_process_dot, PostProcessOutcome};
pub use renderer::*;
pub use types::*;
