//! Requirement-driven generation
//!
//! Loads a project's requirement file and turns each requirement into
//! diagram artifacts on disk.

pub mod config;
pub mod controller;
pub mod output;

pub use config::{
    ProjectConfig, RejectedRequirement, Requirement, RequirementKind, DEFAULT_CONFIG_PATH,
};
pub use controller::{
    init_project, InitOutcome, PipelineController, RequirementOutcome, RunSummary,
};
pub use output::{file_stem, OutputLayout, DEFAULT_OUTPUT_ROOT};
