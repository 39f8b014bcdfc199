//! Graphviz DOT graph descriptions
//!
//! A [`DotGraph`] is the structure handed to the emitter: graph-level
//! attributes, clusters holding nodes, loose nodes, and edges. Every ID and
//! attribute value is written as a quoted string, so names taken verbatim
//! from user input never need to be valid DOT identifiers.

use std::fmt;

/// An ordered list of `key=value` attributes
pub type Attributes = Vec<(String, String)>;

/// A node statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotNode {
    pub id: String,
    pub attributes: Attributes,
}

impl DotNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Value of the first attribute with the given key
    pub fn attr(&self, key: &str) -> Option<&str> {
        find_attr(&self.attributes, key)
    }
}

/// An edge statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotEdge {
    pub from: String,
    pub to: String,
    pub attributes: Attributes,
}

impl DotEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Value of the first attribute with the given key
    pub fn attr(&self, key: &str) -> Option<&str> {
        find_attr(&self.attributes, key)
    }
}

/// A `subgraph cluster_*` grouping nodes under a visible box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotCluster {
    pub id: String,
    pub label: String,
    pub attributes: Attributes,
    pub nodes: Vec<DotNode>,
}

impl DotCluster {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            attributes: Vec::new(),
            nodes: Vec::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn add_node(&mut self, node: DotNode) {
        self.nodes.push(node);
    }
}

/// A directed graph description
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DotGraph {
    pub name: String,
    pub attributes: Attributes,
    pub node_defaults: Attributes,
    pub edge_defaults: Attributes,
    pub clusters: Vec<DotCluster>,
    pub nodes: Vec<DotNode>,
    pub edges: Vec<DotEdge>,
}

impl DotGraph {
    /// Create a graph whose title is shown as the graph label
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            attributes: vec![("label".to_string(), title.clone())],
            name: title,
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_node_default(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.node_defaults.push((key.into(), value.into()));
        self
    }

    pub fn with_edge_default(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.edge_defaults.push((key.into(), value.into()));
        self
    }

    pub fn add_cluster(&mut self, cluster: DotCluster) {
        self.clusters.push(cluster);
    }

    pub fn add_node(&mut self, node: DotNode) {
        self.nodes.push(node);
    }

    pub fn add_edge(&mut self, edge: DotEdge) {
        self.edges.push(edge);
    }

    /// Value of the first graph attribute with the given key
    pub fn attr(&self, key: &str) -> Option<&str> {
        find_attr(&self.attributes, key)
    }

    /// Look up a node by ID, inside clusters or at top level
    pub fn find_node(&self, id: &str) -> Option<&DotNode> {
        self.clusters
            .iter()
            .flat_map(|c| c.nodes.iter())
            .chain(self.nodes.iter())
            .find(|n| n.id == id)
    }

    /// Total number of node statements
    pub fn node_count(&self) -> usize {
        self.clusters.iter().map(|c| c.nodes.len()).sum::<usize>() + self.nodes.len()
    }

    /// Serialize to DOT text
    pub fn to_dot(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DotGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph {} {{", quote(&self.name))?;
        for (key, value) in &self.attributes {
            writeln!(f, "\t{}={};", key, quote(value))?;
        }
        if !self.node_defaults.is_empty() {
            writeln!(f, "\tnode [{}];", attr_list(&self.node_defaults))?;
        }
        if !self.edge_defaults.is_empty() {
            writeln!(f, "\tedge [{}];", attr_list(&self.edge_defaults))?;
        }

        for cluster in &self.clusters {
            writeln!(f, "\tsubgraph {} {{", quote(&format!("cluster_{}", cluster.id)))?;
            writeln!(f, "\t\tlabel={};", quote(&cluster.label))?;
            for (key, value) in &cluster.attributes {
                writeln!(f, "\t\t{}={};", key, quote(value))?;
            }
            for node in &cluster.nodes {
                writeln!(f, "\t\t{}", node_stmt(node))?;
            }
            writeln!(f, "\t}}")?;
        }

        for node in &self.nodes {
            writeln!(f, "\t{}", node_stmt(node))?;
        }

        for edge in &self.edges {
            if edge.attributes.is_empty() {
                writeln!(f, "\t{} -> {};", quote(&edge.from), quote(&edge.to))?;
            } else {
                writeln!(
                    f,
                    "\t{} -> {} [{}];",
                    quote(&edge.from),
                    quote(&edge.to),
                    attr_list(&edge.attributes)
                )?;
            }
        }

        writeln!(f, "}}")
    }
}

fn find_attr<'a>(attributes: &'a Attributes, key: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn node_stmt(node: &DotNode) -> String {
    if node.attributes.is_empty() {
        format!("{};", quote(&node.id))
    } else {
        format!("{} [{}];", quote(&node.id), attr_list(&node.attributes))
    }
}

fn attr_list(attributes: &Attributes) -> String {
    attributes
        .iter()
        .map(|(key, value)| format!("{}={}", key, quote(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Quote a string as a DOT double-quoted ID
///
/// Backslashes and quotes are escaped; line breaks become the `\n`
/// centered-line escape Graphviz understands inside labels.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Build a cluster or node ID fragment from arbitrary text
pub fn slug(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        "_".to_string()
    } else {
        trimmed.to_string()
    }
}
