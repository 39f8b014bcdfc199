//! Core type definitions for diagram generation
//!
//! This module contains the small value types shared by every diagram kind:
//! output formats and layout direction.

use std::fmt;
use std::str::FromStr;

use super::DiagramError;

/// File formats an emitter can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Raster image
    Png,
    /// Raster image
    Jpg,
    /// Vector image
    Svg,
    /// Vector document
    Pdf,
    /// Graphviz graph description (text)
    Dot,
}

impl OutputFormat {
    /// Formats used when a requirement does not list any
    pub const DEFAULTS: [OutputFormat; 3] =
        [OutputFormat::Png, OutputFormat::Dot, OutputFormat::Pdf];

    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Dot => "dot",
        }
    }

    /// Returns true if this format is the graph description itself,
    /// written without invoking the rendering backend
    pub fn is_graph_description(&self) -> bool {
        matches!(self, OutputFormat::Dot)
    }

    /// Parse a list of format names, failing on the first unknown one
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<OutputFormat>, DiagramError> {
        names.iter().map(|name| name.as_ref().parse()).collect()
    }
}

impl FromStr for OutputFormat {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpg),
            "svg" => Ok(OutputFormat::Svg),
            "pdf" => Ok(OutputFormat::Pdf),
            "dot" | "gv" => Ok(OutputFormat::Dot),
            _ => Err(DiagramError::UnsupportedFormat {
                format: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Flow direction handed to the layout engine as `rankdir`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Direction {
    /// Top to bottom (TB)
    #[default]
    TopDown,
    /// Left to right (LR)
    LeftRight,
    /// Right to left (RL)
    RightLeft,
    /// Bottom to top (BT)
    BottomUp,
}

impl Direction {
    /// Graphviz `rankdir` value
    pub fn rankdir(&self) -> &'static str {
        match self {
            Direction::TopDown => "TB",
            Direction::LeftRight => "LR",
            Direction::RightLeft => "RL",
            Direction::BottomUp => "BT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rankdir())
    }
}
