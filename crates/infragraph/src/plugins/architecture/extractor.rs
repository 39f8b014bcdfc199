//! Resource extraction
//!
//! Finds `resource "TYPE" "NAME"` declarations in Terraform-like text. This
//! is a lexical scan, not an HCL parser: block bodies, expressions and
//! modules are ignored.

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

/// `resource` keyword (any case), then a quoted type and a quoted name.
static RESOURCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)resource\s+"([^"]+)"\s+"([^"]+)""#).unwrap());

/// A `(type, name)` pair taken verbatim from declaration text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceDeclaration {
    /// Provider resource type, e.g. `azurerm_linux_virtual_machine`
    pub resource_type: String,
    /// Local name of the resource block
    pub name: String,
}

impl ResourceDeclaration {
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ResourceDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource_type, self.name)
    }
}

/// Extract every resource declaration in first-occurrence order
///
/// Declarations with an unterminated quote or a missing name do not match
/// and are skipped without notice.
pub fn extract_resources(text: &str) -> Vec<ResourceDeclaration> {
    RESOURCE_RE
        .captures_iter(text)
        .map(|caps| ResourceDeclaration::new(&caps[1], &caps[2]))
        .collect()
}

/// Returns true if the text contains at least one declaration
pub fn has_resources(text: &str) -> bool {
    RESOURCE_RE.is_match(text)
}

/// Read declaration text from disk
///
/// A missing or unreadable file is logged as a warning and yields `None`;
/// callers treat that as "nothing to diagram".
pub fn read_source(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => {
            debug!(path = %path.display(), bytes = text.len(), "Read declaration source");
            Some(text)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Terraform source not readable");
            None
        }
    }
}

/// Read a file and extract its declarations; empty when the file is missing
///
/// For library callers that want the declarations alone. The pipeline goes
/// through [`read_source`] instead, since the architecture parser takes the
/// whole text.
pub fn read_resources(path: &Path) -> Vec<ResourceDeclaration> {
    read_source(path)
        .map(|text| extract_resources(&text))
        .unwrap_or_default()
}
