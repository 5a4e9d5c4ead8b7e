use harloli_core::graph::{DependencyAnalyzer, DependencyMatrix};
use harloli_core::har::SemanticHarEntry;
use harloli_core::{Error, Result};
use std::path::{Path, PathBuf};

/// Analyzer backed by a precomputed matrix file
///
/// The file holds `{"adjacencyMatrix": [[...]], "criticalPath": [...]}` as
/// produced by the external dependency detector for the same HAR.
pub struct MatrixFileAnalyzer {
    path: PathBuf,
}

impl MatrixFileAnalyzer {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl DependencyAnalyzer for MatrixFileAnalyzer {
    fn analyze(&self, entries: &[SemanticHarEntry]) -> Result<DependencyMatrix> {
        tracing::debug!(
            "Loading dependency matrix for {} entries from: {}",
            entries.len(),
            self.path.display()
        );

        let content = std::fs::read_to_string(&self.path)?;
        let matrix: DependencyMatrix = serde_json::from_str(&content).map_err(|e| {
            Error::Analysis(format!(
                "Invalid dependency matrix {}: {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(matrix)
    }
}
