//! Node synthesis
//!
//! Picks a visual kind for each grouped resource by testing substrings of
//! its type against a per-category rule list. A resource whose category
//! has no matching rule and no fallback produces no node at all; this keeps
//! node counts identical to earlier releases and is logged at debug level.

use std::fmt;

use tracing::debug;

use super::classifier::Category;
use super::extractor::ResourceDeclaration;
use super::grouper::ClusterGroup;

/// Diagram icon for an architecture node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualKind {
    VirtualNetwork,
    Subnet,
    PublicIp,
    NetworkSecurityGroup,
    Vm,
    AppService,
    StorageAccount,
    SqlDatabase,
    SqlServer,
    LogAnalyticsWorkspace,
    ApplicationInsights,
}

impl VisualKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualKind::VirtualNetwork => "VirtualNetwork",
            VisualKind::Subnet => "Subnet",
            VisualKind::PublicIp => "PublicIPAddress",
            VisualKind::NetworkSecurityGroup => "NetworkSecurityGroup",
            VisualKind::Vm => "VM",
            VisualKind::AppService => "AppService",
            VisualKind::StorageAccount => "StorageAccount",
            VisualKind::SqlDatabase => "SQLDatabase",
            VisualKind::SqlServer => "SQLServer",
            VisualKind::LogAnalyticsWorkspace => "LogAnalyticsWorkspace",
            VisualKind::ApplicationInsights => "ApplicationInsights",
        }
    }

    /// Graphviz shape standing in for the icon
    pub fn dot_shape(&self) -> &'static str {
        match self {
            VisualKind::VirtualNetwork => "tab",
            VisualKind::Subnet => "component",
            VisualKind::PublicIp => "cds",
            VisualKind::NetworkSecurityGroup => "octagon",
            VisualKind::Vm | VisualKind::SqlServer => "box3d",
            VisualKind::AppService => "folder",
            VisualKind::StorageAccount | VisualKind::SqlDatabase => "cylinder",
            VisualKind::LogAnalyticsWorkspace | VisualKind::ApplicationInsights => "note",
        }
    }

    /// Fill color, shared within an icon family
    pub fn fill_color(&self) -> &'static str {
        match self {
            VisualKind::VirtualNetwork | VisualKind::Subnet | VisualKind::PublicIp => "#D6EAF8",
            VisualKind::NetworkSecurityGroup => "#FADBD8",
            VisualKind::Vm => "#D5F5E3",
            VisualKind::AppService => "#E8DAEF",
            VisualKind::StorageAccount => "#FCF3CF",
            VisualKind::SqlDatabase | VisualKind::SqlServer => "#FDEBD0",
            VisualKind::LogAnalyticsWorkspace | VisualKind::ApplicationInsights => "#EAEDED",
        }
    }
}

impl fmt::Display for VisualKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A resource that made it onto the diagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramNode {
    /// Resource name; unique key of the node
    pub name: String,
    /// Text shown on the diagram
    pub label: String,
    pub kind: VisualKind,
    pub category: Category,
    /// Type string the node was synthesized from
    pub resource_type: String,
}

/// Any needle contained in the type selects `kind`
#[derive(Debug, Clone, Copy)]
pub struct KindRule {
    pub needles: &'static [&'static str],
    pub kind: VisualKind,
    /// Appended to the displayed label
    pub label_suffix: Option<&'static str>,
}

impl KindRule {
    const fn new(needles: &'static [&'static str], kind: VisualKind) -> Self {
        Self {
            needles,
            kind,
            label_suffix: None,
        }
    }

    pub fn matches(&self, resource_type: &str) -> bool {
        self.needles.iter().any(|n| resource_type.contains(n))
    }
}

/// Ordered rules of one category plus the kind used when none match
#[derive(Debug, Clone, Copy)]
pub struct CategoryRules {
    pub rules: &'static [KindRule],
    pub fallback: Option<VisualKind>,
}

const NETWORK_RULES: CategoryRules = CategoryRules {
    rules: &[
        KindRule::new(&["virtual_network"], VisualKind::VirtualNetwork),
        KindRule::new(&["subnet"], VisualKind::Subnet),
        KindRule::new(&["public_ip"], VisualKind::PublicIp),
        KindRule::new(&["network_security_group"], VisualKind::NetworkSecurityGroup),
    ],
    fallback: None,
};

const COMPUTE_RULES: CategoryRules = CategoryRules {
    rules: &[],
    fallback: Some(VisualKind::Vm),
};

const APP_RULES: CategoryRules = CategoryRules {
    rules: &[KindRule {
        needles: &["service_plan"],
        kind: VisualKind::AppService,
        label_suffix: Some("-plan"),
    }],
    fallback: Some(VisualKind::AppService),
};

const STORAGE_RULES: CategoryRules = CategoryRules {
    rules: &[],
    fallback: Some(VisualKind::StorageAccount),
};

const DATABASE_RULES: CategoryRules = CategoryRules {
    rules: &[KindRule::new(&["database", "mssql"], VisualKind::SqlDatabase)],
    fallback: Some(VisualKind::SqlServer),
};

const MONITORING_RULES: CategoryRules = CategoryRules {
    rules: &[KindRule::new(&["log_analytics"], VisualKind::LogAnalyticsWorkspace)],
    fallback: Some(VisualKind::ApplicationInsights),
};

const OTHER_RULES: CategoryRules = CategoryRules {
    rules: &[],
    fallback: None,
};

/// Rule set applied to resources of a category
pub fn rules_for(category: Category) -> &'static CategoryRules {
    match category {
        Category::Network => &NETWORK_RULES,
        Category::Compute => &COMPUTE_RULES,
        Category::App => &APP_RULES,
        Category::Storage => &STORAGE_RULES,
        Category::Database => &DATABASE_RULES,
        Category::Monitoring => &MONITORING_RULES,
        Category::Other => &OTHER_RULES,
    }
}

/// Synthesize the node for one resource, or `None` if no rule applies
pub fn synthesize_node(category: Category, resource: &ResourceDeclaration) -> Option<DiagramNode> {
    let rules = rules_for(category);
    let (kind, suffix) = match rules
        .rules
        .iter()
        .find(|rule| rule.matches(&resource.resource_type))
    {
        Some(rule) => (rule.kind, rule.label_suffix),
        None => (rules.fallback?, None),
    };

    let label = match suffix {
        Some(suffix) => format!("{}{}", resource.name, suffix),
        None => resource.name.clone(),
    };

    Some(DiagramNode {
        name: resource.name.clone(),
        label,
        kind,
        category,
        resource_type: resource.resource_type.clone(),
    })
}

/// Synthesize nodes for every grouped resource in traversal order
///
/// Resources without a node are skipped. Name collisions are not resolved
/// here; see [`super::ArchitectureDatabase::upsert_node`].
pub fn synthesize_nodes(groups: &ClusterGroup) -> Vec<DiagramNode> {
    let mut nodes = Vec::with_capacity(groups.len());
    for (category, members) in groups.iter() {
        for resource in members {
            match synthesize_node(category, resource) {
                Some(node) => nodes.push(node),
                None => debug!(
                    resource = %resource,
                    category = %category,
                    "No visual kind for resource, dropping"
                ),
            }
        }
    }
    nodes
}
