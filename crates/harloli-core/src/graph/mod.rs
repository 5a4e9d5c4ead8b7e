//! Dependency model built on top of the external analyzer's output.
//!
//! The analyzer hands back an adjacency matrix indexed positionally against
//! the entries it was given. Everything here only reads that matrix; the
//! entries slice must be the exact one the matrix was computed for.

mod edges;
mod label;

pub use edges::{critical_path_view, edges};
pub use label::{label, resolve};

use crate::Result;
use crate::har::SemanticHarEntry;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Analyzer output: adjacency matrix plus critical path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyMatrix {
    /// `adjacency_matrix[i][j] == 1` means entry `i` is a prerequisite of entry `j`
    pub adjacency_matrix: Vec<Vec<u8>>,
    #[serde(default)]
    pub critical_path: Vec<usize>,
}

/// Directed dependency between two entry indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEdge {
    pub from_index: usize,
    pub to_index: usize,
}

impl DependencyEdge {
    pub fn new(from_index: usize, to_index: usize) -> Self {
        Self {
            from_index,
            to_index,
        }
    }
}

/// External dependency detector
pub trait DependencyAnalyzer {
    fn analyze(&self, entries: &[SemanticHarEntry]) -> Result<DependencyMatrix>;
}

/// Overview of a graph, for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub critical_path_len: usize,
    /// Indices referenced by the matrix that have no matching entry
    pub dangling: Vec<usize>,
}

/// Immutable view over a matrix with its edge list precomputed
///
/// The edge list is derived once at construction. A new matrix always means
/// a new `DependencyGraph`, so the cached edges cannot drift from the matrix.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    matrix: Arc<DependencyMatrix>,
    edges: Arc<[DependencyEdge]>,
}

impl DependencyGraph {
    pub fn new(matrix: DependencyMatrix) -> Self {
        Self::from_shared(Arc::new(matrix))
    }

    pub fn from_shared(matrix: Arc<DependencyMatrix>) -> Self {
        let edges = edges(&matrix).into();
        Self { matrix, edges }
    }

    pub fn matrix(&self) -> &DependencyMatrix {
        &self.matrix
    }

    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    pub fn critical_path(&self) -> &[usize] {
        critical_path_view(&self.matrix)
    }

    /// Number of rows in the matrix
    pub fn node_count(&self) -> usize {
        self.matrix.adjacency_matrix.len()
    }

    /// Entries that must run before `index`, in edge order
    pub fn prerequisites_of(&self, index: usize) -> Vec<usize> {
        self.edges
            .iter()
            .filter(|e| e.to_index == index)
            .map(|e| e.from_index)
            .collect()
    }

    /// Entries that depend on `index`, in edge order
    pub fn dependents_of(&self, index: usize) -> Vec<usize> {
        self.edges
            .iter()
            .filter(|e| e.from_index == index)
            .map(|e| e.to_index)
            .collect()
    }

    pub fn is_on_critical_path(&self, index: usize) -> bool {
        self.critical_path().contains(&index)
    }

    /// Consecutive hops along the critical path
    pub fn critical_path_edges(&self) -> Vec<DependencyEdge> {
        self.critical_path()
            .windows(2)
            .map(|pair| DependencyEdge::new(pair[0], pair[1]))
            .collect()
    }

    /// Indices referenced by edges or the critical path that fall outside
    /// `0..entry_count`, sorted and deduplicated
    pub fn dangling_references(&self, entry_count: usize) -> Vec<usize> {
        let mut dangling: Vec<usize> = self
            .edges
            .iter()
            .flat_map(|e| [e.from_index, e.to_index])
            .chain(self.critical_path().iter().copied())
            .filter(|&idx| idx >= entry_count)
            .collect();
        dangling.sort_unstable();
        dangling.dedup();

        if !dangling.is_empty() {
            tracing::warn!(
                "Dependency matrix references {} unknown entries (entry count {})",
                dangling.len(),
                entry_count
            );
        }

        dangling
    }

    pub fn summary(&self, entry_count: usize) -> GraphSummary {
        GraphSummary {
            node_count: self.node_count(),
            edge_count: self.edges.len(),
            critical_path_len: self.critical_path().len(),
            dangling: self.dangling_references(entry_count),
        }
    }
}
