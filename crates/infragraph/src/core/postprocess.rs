//! DOT artifact post-processing
//!
//! Graphviz draws `label` on an edge inline, on top of the (orthogonal)
//! spline. `xlabel` places the same text outside the edge. The written
//! `.dot` artifact is rewritten so that whoever re-renders it gets floating
//! labels. Images emitted earlier in the same run are left as they are.

use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{info, warn};

/// A standalone `label=` attribute keyword; `xlabel=`, `headlabel=` and
/// `taillabel=` do not match.
static LABEL_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\blabel=").unwrap());

/// What [`post_process_dot`] did to the artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostProcessOutcome {
    /// The file was rewritten, replacing this many keywords
    Rewritten { replacements: usize },
    /// The file had no inline label keyword
    Unchanged,
    /// The file could not be read or written
    Skipped,
}

/// Replace every inline `label=` keyword with `xlabel=`
///
/// Already-floating labels are left alone, so applying this twice is the
/// same as applying it once.
pub fn float_labels(dot: &str) -> Cow<'_, str> {
    LABEL_ATTR_RE.replace_all(dot, "xlabel=")
}

/// Rewrite a DOT artifact in place so its labels float
///
/// Never fails: a missing or unreadable artifact is logged and reported as
/// [`PostProcessOutcome::Skipped`].
pub fn post_process_dot(path: &Path) -> PostProcessOutcome {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "DOT post-processing failed");
            return PostProcessOutcome::Skipped;
        }
    };

    let replacements = LABEL_ATTR_RE.find_iter(&content).count();
    if replacements == 0 {
        return PostProcessOutcome::Unchanged;
    }

    let rewritten = float_labels(&content);
    if let Err(e) = fs::write(path, rewritten.as_bytes()) {
        warn!(path = %path.display(), error = %e, "DOT post-processing failed");
        return PostProcessOutcome::Skipped;
    }

    info!(path = %path.display(), replacements, "Post-processed DOT");
    PostProcessOutcome::Rewritten { replacements }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_float_labels_rewrites_inline_keywords() {
        let dot = "\"a\" -> \"b\" [label=\"SQL\"];\n\t\"a\" [shape=\"box\", label=\"a\"];";
        let out = float_labels(dot);
        assert_eq!(
            out,
            "\"a\" -> \"b\" [xlabel=\"SQL\"];\n\t\"a\" [shape=\"box\", xlabel=\"a\"];"
        );
    }

    #[test]
    fn test_float_labels_leaves_other_label_attributes() {
        let dot = "[xlabel=\"x\", headlabel=\"h\", taillabel=\"t\"]";
        assert_eq!(float_labels(dot), dot);
    }

    #[test]
    fn test_float_labels_is_idempotent() {
        let dot = "digraph {\n\tlabel=\"t\";\n\t\"a\" -> \"b\" [label=\"HTTP/HTTPS\"];\n}\n";
        let once = float_labels(dot).into_owned();
        let twice = float_labels(&once).into_owned();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_post_process_rewrites_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("d.dot");
        fs::write(&path, "\"a\" -> \"b\" [label=\"SQL\"];").unwrap();

        let outcome = post_process_dot(&path);
        assert_eq!(outcome, PostProcessOutcome::Rewritten { replacements: 1 });
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "\"a\" -> \"b\" [xlabel=\"SQL\"];"
        );

        assert_eq!(post_process_dot(&path), PostProcessOutcome::Unchanged);
    }

    #[test]
    fn test_post_process_missing_file_is_skipped() {
        let dir = tempdir().unwrap();
        let outcome = post_process_dot(&dir.path().join("missing.dot"));
        assert_eq!(outcome, PostProcessOutcome::Skipped);
    }
}
