//! Pipeline controller
//!
//! Runs every requirement of a project configuration in order. Each
//! requirement is isolated: an error abandons that requirement, is logged,
//! and the batch moves on.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, error, info, span, warn, Level};

use super::config::{
    ProjectConfig, Requirement, RequirementKind, DEFAULT_CONFIG_PATH, TEMPLATE_CONFIG_PATH,
};
use super::output::OutputLayout;
use crate::core::{
    post_process_dot, synthesize, DiagramError, DotGraph, Emitter, GraphvizEmitter, OutputFormat,
};
use crate::plugins::architecture::{read_source, ArchitectureDiagram};
use crate::plugins::bpmn::ProcessDiagram;
use crate::plugins::dataflow::DataFlowDiagram;

/// Result of processing one requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementOutcome {
    /// Artifacts written, in format order
    Generated(Vec<PathBuf>),
    /// Nothing to draw, or a type this pipeline does not know
    Skipped,
}

/// Tally of a pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub generated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.generated + self.skipped + self.failed
    }
}

/// Drives requirements through synthesis, emission and post-processing
pub struct PipelineController<E: Emitter = GraphvizEmitter> {
    config: ProjectConfig,
    layout: OutputLayout,
    emitter: E,
}

impl PipelineController<GraphvizEmitter> {
    /// Controller emitting through Graphviz into the default output root
    pub fn new(config: ProjectConfig) -> Self {
        Self::with_emitter(config, GraphvizEmitter::new())
    }

    /// Load the configuration from `path`; see [`ProjectConfig::load`]
    pub fn from_config_file(path: &Path) -> Self {
        Self::new(ProjectConfig::load(path))
    }
}

impl<E: Emitter> PipelineController<E> {
    pub fn with_emitter(config: ProjectConfig, emitter: E) -> Self {
        Self {
            config,
            layout: OutputLayout::default(),
            emitter,
        }
    }

    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.layout = OutputLayout::new(root);
        self
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    /// Process every requirement in configuration order
    pub fn run(&self) -> RunSummary {
        let run_span = span!(Level::INFO, "pipeline_run");
        let _enter = run_span.enter();

        let mut summary = RunSummary::default();
        if self.config.is_empty() {
            warn!("No requirements found in config. Run 'init' to start or add requirements");
            return summary;
        }

        for rejected in self.config.rejected() {
            error!(
                index = rejected.index,
                id = rejected.id.as_deref().unwrap_or("<none>"),
                error = %rejected.message,
                "Failed to read requirement"
            );
            summary.failed += 1;
        }

        info!(requirements = self.config.requirements().len(), "Starting pipeline");
        for requirement in self.config.requirements() {
            match self.process_requirement(requirement) {
                Ok(RequirementOutcome::Generated(_)) => summary.generated += 1,
                Ok(RequirementOutcome::Skipped) => summary.skipped += 1,
                Err(e) => {
                    error!(
                        id = %requirement.id,
                        error = %format!("{e:#}"),
                        "Failed to process requirement"
                    );
                    summary.failed += 1;
                }
            }
        }

        info!(
            generated = summary.generated,
            skipped = summary.skipped,
            failed = summary.failed,
            "Pipeline execution completed"
        );
        summary
    }

    /// Dispatch one requirement on its type
    pub fn process_requirement(&self, requirement: &Requirement) -> Result<RequirementOutcome> {
        let req_span = span!(Level::INFO, "requirement", id = %requirement.id);
        let _enter = req_span.enter();

        info!(
            kind = %requirement.requirement_type,
            name = %requirement.name,
            "Processing requirement"
        );

        let kind = match requirement.kind() {
            Ok(kind) => kind,
            Err(e) => {
                warn!(error = %e, "Skipping requirement");
                return Ok(RequirementOutcome::Skipped);
            }
        };
        requirement.validate()?;

        match kind {
            RequirementKind::Architecture => self.generate_architecture(requirement),
            RequirementKind::DataFlow => self.generate_data_flow(requirement),
            RequirementKind::BusinessProcess => self.generate_business_process(requirement),
        }
    }

    /// Architecture diagram from the requirement's declaration file
    ///
    /// A missing or empty source is a skip even when the requested formats
    /// are invalid; formats are only checked once there is something to draw.
    pub fn generate_architecture(&self, requirement: &Requirement) -> Result<RequirementOutcome> {
        let source = requirement.source.as_deref().ok_or_else(|| {
            DiagramError::invalid_requirement(
                &requirement.id,
                "architecture requirement has no source",
            )
        })?;

        info!(source = %source.display(), "Generating architecture diagram");
        let Some(text) = read_source(source) else {
            warn!(source = %source.display(), "No resources found or file missing, skipping");
            return Ok(RequirementOutcome::Skipped);
        };

        let title = format!("{}: {}", requirement.id, requirement.name);
        let Some(graph) = synthesize::<ArchitectureDiagram>(&text, &title)? else {
            warn!(source = %source.display(), "No resources found or file missing, skipping");
            return Ok(RequirementOutcome::Skipped);
        };

        let formats = requirement.formats(RequirementKind::Architecture.default_formats())?;
        let written = self.emit(requirement, &graph, &formats)?;
        for path in written.iter().filter(|p| is_dot_artifact(p)) {
            let outcome = post_process_dot(path);
            debug!(path = %path.display(), ?outcome, "Post-processed DOT artifact");
        }
        Ok(RequirementOutcome::Generated(written))
    }

    /// Data-flow diagram from the requirement's mappings
    pub fn generate_data_flow(&self, requirement: &Requirement) -> Result<RequirementOutcome> {
        let title = format!("DFD: {}", requirement.name);
        let Some(graph) = synthesize::<DataFlowDiagram>(&requirement.mappings, &title)? else {
            warn!("No mappings defined for DFD, skipping");
            return Ok(RequirementOutcome::Skipped);
        };

        let formats = requirement.formats(RequirementKind::DataFlow.default_formats())?;

        let written = self.emit(requirement, &graph, &formats)?;
        Ok(RequirementOutcome::Generated(written))
    }

    /// Business-process diagram from the requirement's lanes and steps
    pub fn generate_business_process(
        &self,
        requirement: &Requirement,
    ) -> Result<RequirementOutcome> {
        let definition = requirement.process_definition();
        let Some(graph) = synthesize::<ProcessDiagram>(&definition, &requirement.name)? else {
            warn!("Incomplete BPMN definition, skipping");
            return Ok(RequirementOutcome::Skipped);
        };

        let formats = requirement.formats(RequirementKind::BusinessProcess.default_formats())?;

        let written = self.emit(requirement, &graph, &formats)?;
        Ok(RequirementOutcome::Generated(written))
    }

    fn emit(
        &self,
        requirement: &Requirement,
        graph: &DotGraph,
        formats: &[OutputFormat],
    ) -> Result<Vec<PathBuf>> {
        let base_path = self.layout.base_path(&requirement.id, &requirement.name);
        let written = self
            .emitter
            .emit(graph, &base_path, formats)
            .with_context(|| format!("emitting {}", base_path.display()))?;
        info!(base = %base_path.display(), count = written.len(), "Diagram generated");
        Ok(written)
    }
}

fn is_dot_artifact(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == OutputFormat::Dot.extension())
}

/// What [`init_project`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// The template was copied to this path
    Created(PathBuf),
    /// A requirement file already exists here and was left untouched
    AlreadyExists(PathBuf),
}

/// Create the project's requirement file from the bundled template
///
/// Never overwrites an existing requirement file. A missing template is a
/// configuration error.
pub fn init_project(root: &Path) -> Result<InitOutcome, DiagramError> {
    let template = root.join(TEMPLATE_CONFIG_PATH);
    let target = root.join(DEFAULT_CONFIG_PATH);

    if !template.is_file() {
        error!(template = %template.display(), "Template file not found");
        return Err(DiagramError::config_error(format!(
            "template not found: {}",
            template.display()
        )));
    }

    if target.exists() {
        warn!(
            target = %target.display(),
            "Requirement file already exists, skipping initialization"
        );
        return Ok(InitOutcome::AlreadyExists(target));
    }

    fs::copy(&template, &target).map_err(|e| DiagramError::write_error(&target, e))?;
    info!(target = %target.display(), "Initialized project requirements");
    Ok(InitOutcome::Created(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::tempdir;

    /// Records emit calls without touching the filesystem
    #[derive(Default)]
    struct RecordingEmitter {
        calls: RefCell<Vec<(String, PathBuf, Vec<OutputFormat>)>>,
    }

    impl Emitter for RecordingEmitter {
        fn emit(
            &self,
            graph: &DotGraph,
            base_path: &Path,
            formats: &[OutputFormat],
        ) -> Result<Vec<PathBuf>, DiagramError> {
            self.calls
                .borrow_mut()
                .push((graph.name.clone(), base_path.to_path_buf(), formats.to_vec()));
            Ok(formats
                .iter()
                .map(|f| crate::core::artifact_path(base_path, *f))
                .collect())
        }
    }

    struct FailingEmitter;

    impl Emitter for FailingEmitter {
        fn emit(
            &self,
            _: &DotGraph,
            _: &Path,
            _: &[OutputFormat],
        ) -> Result<Vec<PathBuf>, DiagramError> {
            Err(DiagramError::render_error("dot exited with status 1"))
        }
    }

    fn recording_controller() -> PipelineController<RecordingEmitter> {
        PipelineController::with_emitter(ProjectConfig::default(), RecordingEmitter::default())
    }

    fn tf_file(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("main.tf");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_architecture_requirement_uses_title_and_defaults() {
        let dir = tempdir().unwrap();
        let source = tf_file(dir.path(), r#"resource "azurerm_linux_virtual_machine" "vm1" {}"#);
        let req = Requirement::new("Req_Arch_001", RequirementKind::Architecture, "Web Shop")
            .with_source(&source);

        let controller = recording_controller().with_output_root(dir.path().join("out"));
        let outcome = controller.process_requirement(&req).unwrap();

        let calls = controller.emitter().calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "Req_Arch_001: Web Shop");
        assert_eq!(calls[0].1, dir.path().join("out/Req_Arch_001/Req_Arch_001_Web_Shop"));
        assert_eq!(calls[0].2, OutputFormat::DEFAULTS);
        match outcome {
            RequirementOutcome::Generated(paths) => assert_eq!(paths.len(), 3),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_missing_source_file_is_skipped() {
        let dir = tempdir().unwrap();
        let req = Requirement::new("R", RequirementKind::Architecture, "x")
            .with_source(dir.path().join("nope.tf"));
        let controller = recording_controller();
        assert_eq!(controller.process_requirement(&req).unwrap(), RequirementOutcome::Skipped);
        assert!(controller.emitter().calls.borrow().is_empty());
    }

    #[test]
    fn test_missing_source_skips_before_format_check() {
        let dir = tempdir().unwrap();
        let req = Requirement::new("R", RequirementKind::Architecture, "x")
            .with_source(dir.path().join("nope.tf"))
            .with_formats(&["tiff"]);
        let controller = recording_controller();
        assert_eq!(controller.process_requirement(&req).unwrap(), RequirementOutcome::Skipped);

        let mut dfd = Requirement::new("D", RequirementKind::DataFlow, "x").with_formats(&["tiff"]);
        dfd.mappings.clear();
        assert_eq!(controller.process_requirement(&dfd).unwrap(), RequirementOutcome::Skipped);
    }

    #[test]
    fn test_rejected_entries_count_as_failed() {
        let config = ProjectConfig::from_yaml(
            r#"
requirements:
  - id: Bad
    type: business_process
    steps: ["just a string"]
  - id: Good
    type: data_flow
    mappings:
      - source: User
        target: API
        data: Order
"#,
        )
        .unwrap();

        let summary = PipelineController::with_emitter(config, RecordingEmitter::default()).run();
        assert_eq!(
            summary,
            RunSummary {
                generated: 1,
                skipped: 0,
                failed: 1,
            }
        );
    }

    #[test]
    fn test_architecture_without_source_field_fails() {
        let req = Requirement::new("R", RequirementKind::Architecture, "x");
        let controller = recording_controller();
        assert!(controller.process_requirement(&req).is_err());
    }

    #[test]
    fn test_unknown_type_is_skipped() {
        let req = Requirement {
            id: "R".into(),
            requirement_type: "gantt".into(),
            ..Requirement::default()
        };
        let controller = recording_controller();
        assert_eq!(controller.process_requirement(&req).unwrap(), RequirementOutcome::Skipped);
    }

    #[test]
    fn test_data_flow_title_and_default_format() {
        let mut req = Requirement::new("Req_DFD_1", RequirementKind::DataFlow, "Checkout Flow");
        req.mappings = vec![crate::plugins::dataflow::FlowMapping::new("User", "API", "Order")];
        let controller = recording_controller();
        controller.process_requirement(&req).unwrap();

        let calls = controller.emitter().calls.borrow();
        assert_eq!(calls[0].0, "DFD: Checkout Flow");
        assert_eq!(calls[0].2, vec![OutputFormat::Png]);
    }

    #[test]
    fn test_failures_are_isolated() {
        let dir = tempdir().unwrap();
        let source = tf_file(dir.path(), r#"resource "azurerm_storage_account" "data1" {}"#);
        let mut dfd = Requirement::new("D", RequirementKind::DataFlow, "empty");
        dfd.mappings.clear();
        let config = ProjectConfig::new(vec![
            Requirement::new("A", RequirementKind::Architecture, "one").with_source(&source),
            Requirement::new("B", RequirementKind::Architecture, "two")
                .with_source(&source)
                .with_formats(&["tiff"]),
            dfd,
        ]);

        let summary = PipelineController::with_emitter(config.clone(), FailingEmitter).run();
        assert_eq!(
            summary,
            RunSummary {
                generated: 0,
                skipped: 1,
                failed: 2,
            }
        );

        let summary = PipelineController::with_emitter(config, RecordingEmitter::default()).run();
        assert_eq!(
            summary,
            RunSummary {
                generated: 1,
                skipped: 1,
                failed: 1,
            }
        );
        assert_eq!(summary.total(), 3);
    }

    #[test]
    fn test_empty_config_runs_nothing() {
        let summary =
            PipelineController::with_emitter(ProjectConfig::default(), FailingEmitter).run();
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_init_project() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            init_project(dir.path()),
            Err(DiagramError::ConfigError { .. })
        ));

        fs::create_dir_all(dir.path().join("config")).unwrap();
        fs::write(dir.path().join(TEMPLATE_CONFIG_PATH), "requirements: []\n").unwrap();

        let target = dir.path().join(DEFAULT_CONFIG_PATH);
        assert_eq!(init_project(dir.path()).unwrap(), InitOutcome::Created(target.clone()));
        assert_eq!(fs::read_to_string(&target).unwrap(), "requirements: []\n");

        fs::write(&target, "requirements: [edited]\n").unwrap();
        assert_eq!(init_project(dir.path()).unwrap(), InitOutcome::AlreadyExists(target.clone()));
        assert_eq!(fs::read_to_string(&target).unwrap(), "requirements: [edited]\n");
    }
}
