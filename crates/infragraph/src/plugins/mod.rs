//! Plugin implementations for different diagram types
//!
//! Each plugin implements the core traits for its diagram kind and produces
//! a [`crate::core::DotGraph`].

pub mod architecture;
pub mod bpmn;
pub mod dataflow;

pub use architecture::*;
pub use bpmn::*;
pub use dataflow::*;
