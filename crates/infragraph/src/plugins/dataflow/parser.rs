//! Data-flow parser
//!
//! Builds nodes and edges from a list of source/target mappings.

use anyhow::Result;
use serde::Deserialize;
use tracing::{debug, info, span, Level};

use super::database::{DataFlowDatabase, FlowEdge};
use crate::core::{Database, Parser};

/// One `source -> target` flow carrying `data`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FlowMapping {
    pub source: Option<String>,
    pub target: Option<String>,
    pub data: String,
    pub protocol: Option<String>,
}

impl FlowMapping {
    pub fn new(source: &str, target: &str, data: &str) -> Self {
        Self {
            source: Some(source.to_string()),
            target: Some(target.to_string()),
            data: data.to_string(),
            protocol: None,
        }
    }

    pub fn with_protocol(mut self, protocol: &str) -> Self {
        self.protocol = Some(protocol.to_string());
        self
    }

    /// Edge label: the data name, with the protocol on a second line
    pub fn label(&self) -> String {
        match self.protocol.as_deref() {
            Some(protocol) if !protocol.is_empty() => format!("{}\n({})", self.data, protocol),
            _ => self.data.clone(),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Parser for data-flow mappings
pub struct DataFlowParser;

impl DataFlowParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DataFlowParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<DataFlowDatabase> for DataFlowParser {
    type Input = [FlowMapping];

    fn parse(&self, input: &[FlowMapping], database: &mut DataFlowDatabase) -> Result<()> {
        let parse_span = span!(Level::INFO, "parse_dataflow", mappings = input.len());
        let _enter = parse_span.enter();

        // All nodes first, so edge order never affects node order
        for mapping in input {
            for name in [present(&mapping.source), present(&mapping.target)]
                .into_iter()
                .flatten()
            {
                if database.ensure_node(name) {
                    debug!(node = name, "Added data-flow node");
                }
            }
        }

        for mapping in input {
            let (Some(source), Some(target)) = (present(&mapping.source), present(&mapping.target))
            else {
                debug!(?mapping, "Mapping without both endpoints, no edge");
                continue;
            };
            database.add_edge(FlowEdge {
                source: source.to_string(),
                target: target.to_string(),
                label: mapping.label(),
            })?;
        }

        info!(
            nodes = database.node_count(),
            edges = database.edge_count(),
            "Data flow parsed"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "data_flow"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn can_parse(&self, input: &[FlowMapping]) -> bool {
        !input.is_empty()
    }
}
