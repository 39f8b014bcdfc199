//! Command-line interface for the infragraph utility
//!
//! Runs a project's requirement file, bootstraps a new one, or generates a
//! single architecture diagram straight from a Terraform file.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use infragraph::core::logging::init_logging;
use infragraph::pipeline::{
    init_project, InitOutcome, PipelineController, ProjectConfig, Requirement, RequirementKind,
    RequirementOutcome, DEFAULT_CONFIG_PATH, DEFAULT_OUTPUT_ROOT,
};
use infragraph::OutputFormat;

/// Infragraph - Generate diagrams from infrastructure and workflow definitions
#[derive(Parser)]
#[command(name = "infragraph")]
#[command(about = "Generate architecture, data-flow and business-process diagrams with Graphviz")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error); overrides INFRAGRAPH_LOG_LEVEL
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Set log format (compact|pretty|json); overrides INFRAGRAPH_LOG_FORMAT
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate every diagram listed in the requirement file
    Run {
        /// Requirement file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Directory receiving one sub-directory per requirement
        #[arg(short, long, default_value = DEFAULT_OUTPUT_ROOT)]
        output_dir: PathBuf,
    },

    /// Create the requirement file from the bundled template
    Init {
        /// Project root containing the `config/` directory
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },

    /// Generate one architecture diagram from a Terraform file
    Architecture {
        /// Terraform file with `resource` blocks
        #[arg(short, long)]
        source: PathBuf,

        /// Requirement ID, used for the output directory and file prefix
        #[arg(long)]
        id: String,

        /// Diagram name
        #[arg(short, long)]
        name: String,

        /// Output format; repeat for several (default: png, dot, pdf)
        #[arg(short, long = "format")]
        formats: Vec<String>,

        /// Directory receiving the requirement's sub-directory
        #[arg(short, long, default_value = DEFAULT_OUTPUT_ROOT)]
        output_dir: PathBuf,
    },

    /// Show supported requirement types
    Types {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Main CLI application
pub struct InfragraphApp;

impl InfragraphApp {
    pub fn new() -> Self {
        Self
    }

    /// Install the global subscriber from CLI flags, then environment
    pub fn setup_logging(cli: &Cli) {
        let level = match (cli.log_level, cli.verbose) {
            (Some(level), _) => Some(level.as_str()),
            (None, true) => Some(LogLevel::Debug.as_str()),
            (None, false) => None,
        };
        let format = cli.log_format.map(|f| f.as_str());

        if let Err(e) = init_logging(level, format) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        if cli.verbose {
            eprintln!("Infragraph v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Run { config, output_dir } => self.run_command(&config, output_dir),
            Commands::Init { root } => self.init_command(&root),
            Commands::Architecture {
                source,
                id,
                name,
                formats,
                output_dir,
            } => self.architecture_command(source, &id, &name, &formats, output_dir),
            Commands::Types { json } => self.types_command(json),
        }
    }

    /// Handle the run command
    fn run_command(&self, config: &Path, output_dir: PathBuf) -> Result<()> {
        let controller = PipelineController::from_config_file(config).with_output_root(output_dir);
        let summary = controller.run();

        println!(
            "{} generated, {} skipped, {} failed",
            summary.generated, summary.skipped, summary.failed
        );
        if summary.failed > 0 {
            return Err(anyhow!("{} requirement(s) failed", summary.failed));
        }
        Ok(())
    }

    /// Handle the init command
    fn init_command(&self, root: &Path) -> Result<()> {
        match init_project(root)? {
            InitOutcome::Created(path) => println!("Created {}", path.display()),
            InitOutcome::AlreadyExists(path) => {
                println!("{} already exists, left unchanged", path.display())
            }
        }
        Ok(())
    }

    /// Handle the architecture command
    fn architecture_command(
        &self,
        source: PathBuf,
        id: &str,
        name: &str,
        formats: &[String],
        output_dir: PathBuf,
    ) -> Result<()> {
        let mut requirement =
            Requirement::new(id, RequirementKind::Architecture, name).with_source(source);
        if !formats.is_empty() {
            requirement.output_formats = Some(formats.to_vec());
        }

        let controller =
            PipelineController::new(ProjectConfig::default()).with_output_root(output_dir);
        match controller.process_requirement(&requirement)? {
            RequirementOutcome::Generated(paths) => {
                for path in paths {
                    println!("{}", path.display());
                }
            }
            RequirementOutcome::Skipped => println!("No resources found, nothing generated"),
        }
        Ok(())
    }

    /// Handle the types command
    fn types_command(&self, json: bool) -> Result<()> {
        let types = supported_types();

        if json {
            let entries: Vec<_> = types
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "name": t.kind.as_str(),
                        "description": t.kind.description(),
                        "default_formats": t.default_formats,
                    })
                })
                .collect();
            let output = serde_json::json!({
                "supported_types": entries,
                "total": types.len(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("Supported requirement types:");
            for t in &types {
                println!(
                    "  {:<18} - {} (default: {})",
                    t.kind.as_str(),
                    t.kind.description(),
                    t.default_formats.join(", ")
                );
            }
            println!();
            println!("Total: {} requirement types supported", types.len());
        }

        Ok(())
    }
}

impl Default for InfragraphApp {
    fn default() -> Self {
        Self::new()
    }
}

/// A requirement type as listed by `types`
pub struct TypeInfo {
    pub kind: RequirementKind,
    pub default_formats: Vec<String>,
}

pub fn supported_types() -> Vec<TypeInfo> {
    RequirementKind::ALL
        .into_iter()
        .map(|kind| TypeInfo {
            kind,
            default_formats: kind
                .default_formats()
                .iter()
                .map(OutputFormat::to_string)
                .collect(),
        })
        .collect()
}
