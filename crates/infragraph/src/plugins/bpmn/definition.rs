//! Business-process definitions as written in the project configuration

use std::fmt;

use serde::Deserialize;

/// A swimlane, usually a role or system
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Lane {
    pub name: String,
}

/// Labelled outgoing branch of a step
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub next: Option<String>,
    pub label: String,
}

/// One element of the process
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProcessStep {
    pub name: String,
    pub lane: String,
    #[serde(rename = "type")]
    pub step_type: String,
    pub next: Option<String>,
    pub conditions: Vec<Condition>,
}

impl Default for ProcessStep {
    fn default() -> Self {
        Self {
            name: String::new(),
            lane: String::new(),
            step_type: "task".to_string(),
            next: None,
            conditions: Vec::new(),
        }
    }
}

impl ProcessStep {
    pub fn new(name: &str, lane: &str, step_type: &str) -> Self {
        Self {
            name: name.to_string(),
            lane: lane.to_string(),
            step_type: step_type.to_string(),
            ..Self::default()
        }
    }

    pub fn then(mut self, next: &str) -> Self {
        self.next = Some(next.to_string());
        self
    }

    pub fn branch(mut self, next: &str, label: &str) -> Self {
        self.conditions.push(Condition {
            next: Some(next.to_string()),
            label: label.to_string(),
        });
        self
    }

    pub fn kind(&self) -> ElementKind {
        ElementKind::from_type(&self.step_type)
    }
}

/// Lanes and steps of one process
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProcessDefinition {
    pub lanes: Vec<Lane>,
    pub steps: Vec<ProcessStep>,
}

impl ProcessDefinition {
    pub fn new(lanes: &[&str], steps: Vec<ProcessStep>) -> Self {
        Self {
            lanes: lanes
                .iter()
                .map(|name| Lane {
                    name: name.to_string(),
                })
                .collect(),
            steps,
        }
    }

    /// Both lanes and steps are needed to draw anything
    pub fn is_complete(&self) -> bool {
        !self.lanes.is_empty() && !self.steps.is_empty()
    }
}

/// BPMN element drawn for a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    StartEvent,
    EndEvent,
    Task,
    Subprocess,
    ExclusiveGateway,
}

impl ElementKind {
    /// Map a step `type`; unknown types are drawn as tasks
    pub fn from_type(step_type: &str) -> Self {
        match step_type.trim().to_lowercase().as_str() {
            "start" => ElementKind::StartEvent,
            "end" => ElementKind::EndEvent,
            "subprocess" => ElementKind::Subprocess,
            "gateway" => ElementKind::ExclusiveGateway,
            _ => ElementKind::Task,
        }
    }

    pub fn dot_shape(&self) -> &'static str {
        match self {
            ElementKind::StartEvent => "circle",
            ElementKind::EndEvent => "doublecircle",
            ElementKind::Task | ElementKind::Subprocess => "box",
            ElementKind::ExclusiveGateway => "diamond",
        }
    }

    pub fn dot_style(&self) -> &'static str {
        match self {
            ElementKind::Task => "rounded,filled",
            ElementKind::Subprocess => "rounded,filled,bold",
            _ => "filled",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::StartEvent => "start_event",
            ElementKind::EndEvent => "end_event",
            ElementKind::Task => "task",
            ElementKind::Subprocess => "subprocess",
            ElementKind::ExclusiveGateway => "exclusive_gateway",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
