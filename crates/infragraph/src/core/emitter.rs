//! Diagram emission
//!
//! An [`Emitter`] turns a [`DotGraph`] into files on disk. The graph
//! description (`.dot`) is written directly; every image format is produced
//! by piping the same description into Graphviz's `dot` executable, which
//! also performs the layout.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info, span, trace, Level};

use super::{DiagramError, DotGraph, OutputFormat};

/// Directories where Graphviz installers put `dot` but that are often
/// missing from `PATH`
pub const GRAPHVIZ_INSTALL_DIRS: &[&str] = &[
    r"C:\Program Files\Graphviz\bin",
    r"C:\Program Files (x86)\Graphviz\bin",
    "/opt/homebrew/bin",
    "/usr/local/bin",
];

/// Something that can write a graph description to disk in several formats
pub trait Emitter {
    /// Write `graph` next to `base_path` once per format
    ///
    /// `base_path` has no extension; each artifact is `base_path.<ext>`.
    /// Returns the written paths in the order of `formats`.
    fn emit(
        &self,
        graph: &DotGraph,
        base_path: &Path,
        formats: &[OutputFormat],
    ) -> Result<Vec<PathBuf>, DiagramError>;
}

/// Emitter backed by the Graphviz `dot` command
#[derive(Debug, Clone)]
pub struct GraphvizEmitter {
    executable: PathBuf,
}

impl GraphvizEmitter {
    /// Use `dot` as found on `PATH`
    pub fn new() -> Self {
        Self::with_executable("dot")
    }

    /// Use a specific Graphviz layout executable
    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn render_format(
        &self,
        dot_source: &str,
        format: OutputFormat,
        target: &Path,
    ) -> Result<(), DiagramError> {
        trace!(format = %format, target = %target.display(), "Invoking graphviz");

        let mut child = Command::new(&self.executable)
            .arg(format!("-T{}", format.extension()))
            .arg("-o")
            .arg(target)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                DiagramError::render_error(format!(
                    "failed to run '{}': {}",
                    self.executable.display(),
                    e
                ))
            })?;

        // stdin is closed before waiting; a process that exits early breaks
        // the pipe, and its stderr says why
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(dot_source.as_bytes()),
            None => Ok(()),
        };

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DiagramError::render_error(format!(
                "'{}' failed for {} ({}): {}",
                self.executable.display(),
                format,
                output.status,
                stderr.trim()
            )));
        }
        written.map_err(|e| {
            DiagramError::render_error(format!(
                "failed to send DOT to '{}': {}",
                self.executable.display(),
                e
            ))
        })
    }
}

impl Default for GraphvizEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter for GraphvizEmitter {
    fn emit(
        &self,
        graph: &DotGraph,
        base_path: &Path,
        formats: &[OutputFormat],
    ) -> Result<Vec<PathBuf>, DiagramError> {
        let emit_span = span!(Level::INFO, "emit", base = %base_path.display());
        let _enter = emit_span.enter();

        if let Some(parent) = base_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| DiagramError::write_error(parent, e))?;
        }

        let dot_source = graph.to_dot();
        let mut written = Vec::with_capacity(formats.len());

        for &format in formats {
            let target = artifact_path(base_path, format);
            if format.is_graph_description() {
                fs::write(&target, &dot_source)
                    .map_err(|e| DiagramError::write_error(&target, e))?;
            } else {
                self.render_format(&dot_source, format, &target)?;
            }
            debug!(path = %target.display(), "Wrote artifact");
            written.push(target);
        }

        info!(count = written.len(), "Diagram emitted");
        Ok(written)
    }
}

/// Path of the artifact for `format` next to `base_path`
///
/// The extension is appended rather than substituted, so dots inside the
/// diagram name survive.
pub fn artifact_path(base_path: &Path, format: OutputFormat) -> PathBuf {
    let mut path = OsString::from(base_path.as_os_str());
    path.push(".");
    path.push(format.extension());
    PathBuf::from(path)
}

/// Make a Graphviz install visible to child processes
///
/// Appends the first directory of [`GRAPHVIZ_INSTALL_DIRS`] that exists on
/// disk and is not already on `PATH`. Meant to run once, before any
/// diagram is generated. Returns the directory that was added.
pub fn prepare_render_environment() -> Option<PathBuf> {
    let current = std::env::var_os("PATH").unwrap_or_default();
    let mut entries: Vec<PathBuf> = std::env::split_paths(&current).collect();

    let candidate = GRAPHVIZ_INSTALL_DIRS
        .iter()
        .map(PathBuf::from)
        .find(|dir| dir.is_dir() && !entries.contains(dir))?;

    entries.push(candidate.clone());
    match std::env::join_paths(entries) {
        Ok(joined) => {
            std::env::set_var("PATH", joined);
            info!(dir = %candidate.display(), "Added Graphviz to PATH");
            Some(candidate)
        }
        Err(e) => {
            debug!(error = %e, "Could not extend PATH");
            None
        }
    }
}
