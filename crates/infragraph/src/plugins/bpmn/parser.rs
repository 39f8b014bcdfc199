//! Business-process parser
//!
//! Places steps into their lanes, then connects them. Steps in an undefined
//! lane are skipped with a warning; connections to unknown steps are
//! ignored.

use anyhow::Result;
use tracing::{debug, info, span, warn, Level};

use super::database::{ProcessDatabase, ProcessElement, SequenceFlow};
use super::definition::ProcessDefinition;
use crate::core::{Database, Parser};

/// Parser for lane/step process definitions
pub struct ProcessParser;

impl ProcessParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProcessParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<ProcessDatabase> for ProcessParser {
    type Input = ProcessDefinition;

    fn parse(&self, input: &ProcessDefinition, database: &mut ProcessDatabase) -> Result<()> {
        let parse_span = span!(
            Level::INFO,
            "parse_process",
            lanes = input.lanes.len(),
            steps = input.steps.len()
        );
        let _enter = parse_span.enter();

        for lane in &input.lanes {
            database.add_lane(&lane.name);
        }

        for step in &input.steps {
            if !database.has_lane(&step.lane) {
                warn!(lane = %step.lane, step = %step.name, "Lane not found for step, skipping");
                continue;
            }
            database.add_node(ProcessElement {
                name: step.name.clone(),
                lane: step.lane.clone(),
                kind: step.kind(),
            })?;
        }

        for step in &input.steps {
            if database.get_node(&step.name).is_none() {
                continue;
            }

            let targets = step
                .next
                .iter()
                .map(|next| (next, None::<&String>))
                .chain(
                    step.conditions
                        .iter()
                        .filter_map(|c| c.next.as_ref().map(|next| (next, Some(&c.label)))),
                );

            for (target, label) in targets {
                if database.get_node(target).is_none() {
                    debug!(from = %step.name, to = %target, "Connection to unknown step ignored");
                    continue;
                }
                database.add_edge(SequenceFlow {
                    source: step.name.clone(),
                    target: target.clone(),
                    label: label.cloned(),
                })?;
            }
        }

        info!(
            elements = database.node_count(),
            flows = database.edge_count(),
            "Process parsed"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "business_process"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn can_parse(&self, input: &ProcessDefinition) -> bool {
        input.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::bpmn::{ElementKind, ProcessStep};

    fn order_process() -> ProcessDefinition {
        ProcessDefinition::new(
            &["Customer", "Shop"],
            vec![
                ProcessStep::new("Order", "Customer", "start").then("Check"),
                ProcessStep::new("Check", "Shop", "gateway")
                    .branch("Ship", "in stock")
                    .branch("Refund", "sold out")
                    .branch("Nowhere", "ignored"),
                ProcessStep::new("Ship", "Shop", "task").then("Done"),
                ProcessStep::new("Refund", "Billing", "task").then("Done"),
                ProcessStep::new("Done", "Customer", "end"),
            ],
        )
    }

    #[test]
    fn test_parse_elements_and_flows() {
        let mut db = ProcessDatabase::new();
        ProcessParser::new().parse(&order_process(), &mut db).unwrap();

        // Refund sits in an unknown lane
        assert_eq!(db.node_count(), 4);
        assert!(db.get_node("Refund").is_none());
        assert_eq!(db.get_node("Check").unwrap().kind, ElementKind::ExclusiveGateway);

        let flows: Vec<_> = db
            .edges()
            .map(|f| (f.source.as_str(), f.target.as_str(), f.label.as_deref()))
            .collect();
        assert_eq!(
            flows,
            vec![
                ("Order", "Check", None),
                ("Check", "Ship", Some("in stock")),
                ("Ship", "Done", None),
            ]
        );
    }

    #[test]
    fn test_next_precedes_conditions() {
        let def = ProcessDefinition::new(
            &["L"],
            vec![
                ProcessStep::new("a", "L", "gateway").branch("c", "yes").then("b"),
                ProcessStep::new("b", "L", "task"),
                ProcessStep::new("c", "L", "task"),
            ],
        );
        let mut db = ProcessDatabase::new();
        ProcessParser::new().parse(&def, &mut db).unwrap();
        let targets: Vec<_> = db.edges().map(|f| f.target.as_str()).collect();
        assert_eq!(targets, vec!["b", "c"]);
    }

    #[test]
    fn test_can_parse_requires_lanes_and_steps() {
        let parser = ProcessParser::new();
        assert!(parser.can_parse(&order_process()));
        assert!(!parser.can_parse(&ProcessDefinition::new(&["A"], vec![])));
        assert!(!parser.can_parse(&ProcessDefinition::new(
            &[],
            vec![ProcessStep::new("a", "A", "task")]
        )));
    }
}
