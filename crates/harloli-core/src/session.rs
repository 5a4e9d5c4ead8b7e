//! Single-writer store for the currently loaded capture.
//!
//! Uploads are stamped with a [`LoadTicket`] when they start. Only the most
//! recently started load may publish; anything older is discarded when it
//! finishes, regardless of completion order. Publishing a new entry list
//! drops the dependency graph, since its indices referred to the old list.

use crate::config::{ConfigBuilder, ScriptGenerator};
use crate::graph::{DependencyAnalyzer, DependencyEdge, DependencyGraph, DependencyMatrix};
use crate::har::{SemanticHarEntry, read_har_file};
use crate::{Error, Result};
use std::path::Path;
use std::sync::Arc;

/// Handle for one in-flight load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    sequence: u64,
}

/// Result of finishing a load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Published { generation: u64, entry_count: usize },
    /// A newer load was started; this one was discarded
    Superseded,
}

/// Read-only view of the session at one point in time
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    generation: u64,
    entries: Arc<[SemanticHarEntry]>,
    graph: Option<DependencyGraph>,
}

impl SessionSnapshot {
    fn empty() -> Self {
        Self {
            generation: 0,
            entries: Arc::from(Vec::new()),
            graph: None,
        }
    }

    /// Bumped every time a new entry list is published
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn entries(&self) -> &[SemanticHarEntry] {
        &self.entries
    }

    pub fn graph(&self) -> Option<&DependencyGraph> {
        self.graph.as_ref()
    }

    /// Edge list, empty until a matrix is attached
    pub fn edges(&self) -> &[DependencyEdge] {
        self.graph.as_ref().map(|g| g.edges()).unwrap_or(&[])
    }

    /// Critical path, empty until a matrix is attached
    pub fn critical_path(&self) -> &[usize] {
        self.graph.as_ref().map(|g| g.critical_path()).unwrap_or(&[])
    }
}

#[derive(Debug)]
pub struct Session {
    latest_ticket: u64,
    state: SessionSnapshot,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            latest_ticket: 0,
            state: SessionSnapshot::empty(),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.clone()
    }

    pub fn generation(&self) -> u64 {
        self.state.generation
    }

    pub fn entries(&self) -> &[SemanticHarEntry] {
        self.state.entries()
    }

    pub fn graph(&self) -> Option<&DependencyGraph> {
        self.state.graph()
    }

    /// Register the start of a load; any earlier ticket becomes stale
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        tracing::debug!("Starting load #{}", self.latest_ticket);
        LoadTicket {
            sequence: self.latest_ticket,
        }
    }

    /// Finish a load started with [`Session::begin_load`]
    ///
    /// A stale ticket is discarded with [`LoadOutcome::Superseded`], whether
    /// it succeeded or not. A failed current load returns its error and
    /// leaves the published state untouched.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<SemanticHarEntry>>,
    ) -> Result<LoadOutcome> {
        if ticket.sequence != self.latest_ticket {
            tracing::warn!(
                "Discarding load #{}, superseded by load #{}",
                ticket.sequence,
                self.latest_ticket
            );
            return Ok(LoadOutcome::Superseded);
        }

        let entries = result?;
        let entry_count = entries.len();
        self.publish(entries);

        Ok(LoadOutcome::Published {
            generation: self.state.generation,
            entry_count,
        })
    }

    /// Read, normalize and publish a HAR file
    pub async fn load_file(&mut self, path: &Path) -> Result<LoadOutcome> {
        let ticket = self.begin_load();
        let result = read_har_file(path).await;
        self.complete_load(ticket, result)
    }

    fn publish(&mut self, entries: Vec<SemanticHarEntry>) {
        let generation = self.state.generation + 1;
        tracing::info!(
            "Published {} entries as generation {}",
            entries.len(),
            generation
        );
        self.state = SessionSnapshot {
            generation,
            entries: entries.into(),
            graph: None,
        };
    }

    /// Attach analyzer output computed for `generation`
    pub fn attach_matrix(&mut self, generation: u64, matrix: DependencyMatrix) -> Result<()> {
        if generation != self.state.generation {
            return Err(Error::StaleMatrix {
                expected: self.state.generation,
                actual: generation,
            });
        }

        let entry_count = self.state.entries.len();
        if matrix.adjacency_matrix.len() != entry_count {
            tracing::warn!(
                "Dependency matrix has {} rows for {} entries",
                matrix.adjacency_matrix.len(),
                entry_count
            );
        }

        let graph = DependencyGraph::new(matrix);
        graph.dangling_references(entry_count);
        tracing::debug!(
            "Attached dependency graph with {} edges",
            graph.edges().len()
        );
        self.state.graph = Some(graph);
        Ok(())
    }

    /// Run the analyzer over the current entries and attach its output
    pub fn analyze(&mut self, analyzer: &dyn DependencyAnalyzer) -> Result<()> {
        let generation = self.state.generation;
        let matrix = analyzer.analyze(&self.state.entries)?;
        self.attach_matrix(generation, matrix)
    }

    /// Build a fresh config and hand it to the generator
    pub fn generate(
        &self,
        builder: &ConfigBuilder,
        generator: &dyn ScriptGenerator,
    ) -> Result<String> {
        let config = builder.build(self.state.entries.len());
        generator.generate(&config, &self.state.entries)
    }
}
