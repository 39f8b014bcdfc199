//! Core error types for diagram generation
//!
//! This module defines common error types used throughout the generation pipeline.
//! Most of the conditions the pipeline encounters (missing source files, unmatched
//! resource types, unreadable DOT artifacts) are deliberately *not* errors; they are
//! logged and skipped. What remains here is what abandons a single requirement.

use std::path::PathBuf;

use thiserror::Error;

/// Core error types for diagram generation
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Config error: {message}")]
    ConfigError { message: String },

    #[error("Invalid requirement {id}: {message}")]
    InvalidRequirement { id: String, message: String },

    #[error("Unsupported output format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Render error: {message}")]
    RenderError { message: String },

    #[error("Failed to write {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Unknown requirement type: {requirement_type}")]
    UnknownRequirementType { requirement_type: String },
}

impl DiagramError {
    /// Create a new config error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new invalid requirement error
    pub fn invalid_requirement(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRequirement {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Create a new render error
    pub fn render_error(message: impl Into<String>) -> Self {
        Self::RenderError {
            message: message.into(),
        }
    }

    /// Create a new write error for the given path
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteError {
            path: path.into(),
            source,
        }
    }
}
