//! Artifact locations
//!
//! Every diagram lands in its own directory:
//! `<root>/<id>/<id>_<name>.<ext>`, spaces in the name replaced by `_`.

use std::path::{Path, PathBuf};

/// Output root used when none is configured
pub const DEFAULT_OUTPUT_ROOT: &str = "generated_diagrams";

/// Where a project's diagrams are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one requirement's artifacts
    pub fn requirement_dir(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }

    /// Artifact path without extension
    ///
    /// Nothing is created on disk; the emitter makes the directory when it
    /// has something to write.
    pub fn base_path(&self, id: &str, name: &str) -> PathBuf {
        self.requirement_dir(id).join(file_stem(id, name))
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_ROOT)
    }
}

/// `<id>_<name>` with spaces in the name replaced by underscores
pub fn file_stem(id: &str, name: &str) -> String {
    format!("{}_{}", id, name.replace(' ', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_path() {
        let layout = OutputLayout::default();
        assert_eq!(
            layout.base_path("Req_Arch_001", "Web Shop Prod"),
            Path::new("generated_diagrams/Req_Arch_001/Req_Arch_001_Web_Shop_Prod")
        );
    }

    #[test]
    fn test_custom_root() {
        let layout = OutputLayout::new("/tmp/out");
        assert_eq!(layout.requirement_dir("R1"), Path::new("/tmp/out/R1"));
        assert_eq!(layout.root(), Path::new("/tmp/out"));
    }

    #[test]
    fn test_file_stem_keeps_other_characters() {
        assert_eq!(file_stem("R", "a  b.v2"), "R_a__b.v2");
        assert_eq!(file_stem("R", ""), "R_");
    }
}
