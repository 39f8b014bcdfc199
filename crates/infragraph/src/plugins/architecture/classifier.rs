//! Resource classification
//!
//! Maps a resource type string onto a coarse architectural [`Category`].
//! The rules overlap as substrings (`azurerm_linux_web_app` starts with
//! both `azurerm_linux` and `azurerm_linux_web_app`), so they live in an
//! ordered table and the first match wins.

use std::fmt;

/// Coarse architectural bucket for a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Network,
    Compute,
    App,
    Storage,
    Database,
    Monitoring,
    Other,
}

impl Category {
    /// Every category, in diagram traversal order
    pub const ALL: [Category; 7] = [
        Category::Network,
        Category::Compute,
        Category::App,
        Category::Storage,
        Category::Database,
        Category::Monitoring,
        Category::Other,
    ];

    /// Title of the visual cluster wrapping this category, if it gets one
    pub fn cluster_label(&self) -> Option<&'static str> {
        match self {
            Category::Network => Some("Network"),
            Category::Compute => Some("Compute"),
            Category::App => Some("App Services"),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Network => "network",
            Category::Compute => "compute",
            Category::App => "app",
            Category::Storage => "storage",
            Category::Database => "database",
            Category::Monitoring => "monitoring",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single string test against a resource type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Prefix(&'static str),
    Suffix(&'static str),
}

impl Pattern {
    pub fn matches(&self, resource_type: &str) -> bool {
        match self {
            Pattern::Prefix(prefix) => resource_type.starts_with(prefix),
            Pattern::Suffix(suffix) => resource_type.ends_with(suffix),
        }
    }
}

/// Any of `patterns` matching assigns `category`
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    pub patterns: &'static [Pattern],
    pub category: Category,
}

impl ClassificationRule {
    pub fn matches(&self, resource_type: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(resource_type))
    }
}

/// Classification table, evaluated top to bottom
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        patterns: &[Pattern::Prefix("azurerm_network")],
        category: Category::Network,
    },
    ClassificationRule {
        patterns: &[Pattern::Prefix("azurerm_subnet"), Pattern::Suffix("/subnet")],
        category: Category::Network,
    },
    ClassificationRule {
        patterns: &[
            Pattern::Prefix("azurerm_linux_virtual_machine"),
            Pattern::Prefix("azurerm_linux"),
            Pattern::Prefix("azurerm_virtual_machine"),
        ],
        category: Category::Compute,
    },
    ClassificationRule {
        patterns: &[Pattern::Prefix("azurerm_storage_account")],
        category: Category::Storage,
    },
    ClassificationRule {
        patterns: &[Pattern::Prefix("azurerm_mssql"), Pattern::Prefix("azurerm_sql")],
        category: Category::Database,
    },
    ClassificationRule {
        patterns: &[
            Pattern::Prefix("azurerm_log_analytics_workspace"),
            Pattern::Prefix("azurerm_application_insights"),
        ],
        category: Category::Monitoring,
    },
    ClassificationRule {
        patterns: &[
            Pattern::Prefix("azurerm_service_plan"),
            Pattern::Prefix("azurerm_linux_web_app"),
        ],
        category: Category::App,
    },
];

/// Classify a resource type; unmatched types are [`Category::Other`]
pub fn classify(resource_type: &str) -> Category {
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| rule.matches(resource_type))
        .map(|rule| rule.category)
        .unwrap_or(Category::Other)
}
