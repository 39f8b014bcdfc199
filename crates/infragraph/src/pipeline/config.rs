//! Project configuration
//!
//! A project lists its diagrams as requirements in a YAML file:
//!
//! ```yaml
//! requirements:
//!   - id: Req_Arch_001
//!     type: architecture
//!     name: Web Shop
//!     source: infra/main.tf
//!     output_formats: [png, dot]
//! ```
//!
//! Parsing is lenient. Unknown keys are ignored and every field has a
//! default, so a half-written requirement still loads and fails later, on
//! its own, when it is processed. Each entry is converted separately: an
//! entry with a badly shaped field is kept as a [`RejectedRequirement`]
//! and the rest of the file still loads.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use tracing::{debug, error, warn};

use crate::core::{DiagramError, OutputFormat};
use crate::plugins::bpmn::{Lane, ProcessDefinition, ProcessStep};
use crate::plugins::dataflow::FlowMapping;

/// Default location of the requirement file, relative to the project root
pub const DEFAULT_CONFIG_PATH: &str = "config/project_requirements.yaml";
/// Template copied by `init`
pub const TEMPLATE_CONFIG_PATH: &str = "config/requirements_template.yaml";

/// The diagram kinds a requirement can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequirementKind {
    Architecture,
    DataFlow,
    BusinessProcess,
}

impl RequirementKind {
    pub const ALL: [RequirementKind; 3] = [
        RequirementKind::Architecture,
        RequirementKind::DataFlow,
        RequirementKind::BusinessProcess,
    ];

    /// Value of the `type` field
    pub fn as_str(&self) -> &'static str {
        match self {
            RequirementKind::Architecture => "architecture",
            RequirementKind::DataFlow => "data_flow",
            RequirementKind::BusinessProcess => "business_process",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RequirementKind::Architecture => "Cloud architecture from Terraform resource blocks",
            RequirementKind::DataFlow => "Data-flow diagram from source/target mappings",
            RequirementKind::BusinessProcess => "Business process with lanes and steps",
        }
    }

    /// Formats written when the requirement lists none
    pub fn default_formats(&self) -> &'static [OutputFormat] {
        match self {
            RequirementKind::Architecture => &OutputFormat::DEFAULTS,
            RequirementKind::DataFlow | RequirementKind::BusinessProcess => &[OutputFormat::Png],
        }
    }
}

impl FromStr for RequirementKind {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RequirementKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DiagramError::UnknownRequirementType {
                requirement_type: s.to_string(),
            })
    }
}

impl fmt::Display for RequirementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One diagram to generate
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Requirement {
    /// Used as the output directory name and file name prefix
    pub id: String,
    #[serde(rename = "type")]
    pub requirement_type: String,
    /// Human-readable title
    pub name: String,
    /// Declaration file for architecture requirements
    pub source: Option<PathBuf>,
    /// A list of format names, or a single name
    #[serde(deserialize_with = "one_or_many")]
    pub output_formats: Option<Vec<String>>,
    pub mappings: Vec<FlowMapping>,
    pub lanes: Vec<Lane>,
    pub steps: Vec<ProcessStep>,
}

impl Requirement {
    pub fn new(id: &str, kind: RequirementKind, name: &str) -> Self {
        Self {
            id: id.to_string(),
            requirement_type: kind.as_str().to_string(),
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_formats(mut self, formats: &[&str]) -> Self {
        self.output_formats = Some(formats.iter().map(|f| f.to_string()).collect());
        self
    }

    pub fn kind(&self) -> Result<RequirementKind, DiagramError> {
        self.requirement_type.parse()
    }

    /// Requested output formats, or `defaults` when none are listed
    ///
    /// An empty list counts as "none listed". An unknown format name fails
    /// the whole requirement.
    pub fn formats(&self, defaults: &[OutputFormat]) -> Result<Vec<OutputFormat>, DiagramError> {
        match self.output_formats.as_deref() {
            Some(names) if !names.is_empty() => OutputFormat::parse_list(names),
            _ => Ok(defaults.to_vec()),
        }
    }

    pub fn process_definition(&self) -> ProcessDefinition {
        ProcessDefinition {
            lanes: self.lanes.clone(),
            steps: self.steps.clone(),
        }
    }

    /// Check the fields every kind needs
    pub fn validate(&self) -> Result<(), DiagramError> {
        if self.id.trim().is_empty() {
            return Err(DiagramError::invalid_requirement(&self.name, "requirement has no id"));
        }
        if self.id.contains(['/', '\\']) || self.id == "." || self.id == ".." {
            return Err(DiagramError::invalid_requirement(
                &self.id,
                "id must be a single path segment",
            ));
        }
        Ok(())
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(name)) => Some(vec![name]),
        Some(OneOrMany::Many(names)) => Some(names),
        None => None,
    })
}

/// A requirement entry that could not be read into a [`Requirement`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRequirement {
    /// Position in the file's `requirements` list
    pub index: usize,
    /// The entry's `id`, when it has a readable one
    pub id: Option<String>,
    pub message: String,
}

impl fmt::Display for RejectedRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "requirements[{}] ({}): {}", self.index, id, self.message),
            None => write!(f, "requirements[{}]: {}", self.index, self.message),
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    requirements: Option<Vec<Value>>,
}

/// Contents of a requirement file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    requirements: Vec<Requirement>,
    rejected: Vec<RejectedRequirement>,
}

impl ProjectConfig {
    pub fn new(requirements: Vec<Requirement>) -> Self {
        Self {
            requirements,
            rejected: Vec::new(),
        }
    }

    /// Parse YAML text; blank text is an empty configuration
    ///
    /// Only a file that is not YAML, or whose `requirements` is not a list,
    /// is an error. Entries that do not fit a [`Requirement`] are collected
    /// in [`ProjectConfig::rejected`].
    pub fn from_yaml(content: &str) -> Result<Self, DiagramError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let raw: RawConfig = serde_yaml::from_str(trimmed)
            .map_err(|e| DiagramError::config_error(format!("Invalid YAML: {e}")))?;

        let mut config = Self::default();
        for (index, entry) in raw.requirements.unwrap_or_default().into_iter().enumerate() {
            let id = entry.get("id").and_then(Value::as_str).map(str::to_string);
            match serde_yaml::from_value::<Requirement>(entry) {
                Ok(requirement) => config.requirements.push(requirement),
                Err(e) => {
                    debug!(index, id = ?id, error = %e, "Rejected requirement entry");
                    config.rejected.push(RejectedRequirement {
                        index,
                        id,
                        message: e.to_string(),
                    });
                }
            }
        }
        Ok(config)
    }

    /// Load a requirement file, degrading to an empty configuration
    ///
    /// A missing file is a warning and malformed YAML is an error log; in
    /// both cases the pipeline simply has nothing to do.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Config file not found, using empty config"
                );
                return Self::default();
            }
        };

        match Self::from_yaml(&content) {
            Ok(config) => {
                debug!(
                    path = %path.display(),
                    requirements = config.requirements().len(),
                    rejected = config.rejected().len(),
                    "Loaded config"
                );
                config
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Error parsing config file");
                Self::default()
            }
        }
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Entries that were present in the file but could not be read
    pub fn rejected(&self) -> &[RejectedRequirement] {
        &self.rejected
    }

    /// True when the file listed no entries at all
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty() && self.rejected.is_empty()
    }
}
