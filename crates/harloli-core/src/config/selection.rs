use serde::{Deserialize, Serialize};

/// Operations the user can apply to the request selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOp {
    /// Every entry, in capture order
    All,
    /// Nothing selected
    None,
    /// The analyzer's critical path, in path order
    CriticalPath,
    Add(usize),
    Remove(usize),
    Toggle(usize),
}

/// Ordered set of entry indices
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    indices: Vec<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a sequence, keeping the first occurrence of each index
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        let mut selection = Self::new();
        for idx in indices {
            selection.insert(idx);
        }
        selection
    }

    /// `[0, 1, ..., entry_count - 1]`
    pub fn all(entry_count: usize) -> Self {
        Self {
            indices: (0..entry_count).collect(),
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Append `index` unless already present; returns whether it was added
    pub fn insert(&mut self, index: usize) -> bool {
        if self.contains(index) {
            return false;
        }
        self.indices.push(index);
        true
    }

    /// Returns whether `index` was present
    pub fn remove(&mut self, index: usize) -> bool {
        let before = self.indices.len();
        self.indices.retain(|&i| i != index);
        self.indices.len() != before
    }

    /// Flip membership of `index`; returns whether it is now selected
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.remove(index) {
            false
        } else {
            self.indices.push(index);
            true
        }
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    /// Apply a selection operation
    ///
    /// Returns `false` when the operation was not available and left the
    /// selection untouched: the critical path is empty, or an `Add`/`Toggle`
    /// names an index outside `0..entry_count`.
    pub fn apply(&mut self, op: SelectionOp, entry_count: usize, critical_path: &[usize]) -> bool {
        tracing::debug!("Applying selection op {:?}", op);

        match op {
            SelectionOp::All => {
                *self = Self::all(entry_count);
                true
            }
            SelectionOp::None => {
                self.clear();
                true
            }
            SelectionOp::CriticalPath => {
                if critical_path.is_empty() {
                    tracing::debug!("No critical path to select");
                    return false;
                }
                *self = Self::from_indices(critical_path.iter().copied());
                true
            }
            SelectionOp::Add(idx) | SelectionOp::Toggle(idx) if idx >= entry_count => {
                tracing::debug!("Ignoring unknown entry index {}", idx);
                false
            }
            SelectionOp::Add(idx) => {
                self.insert(idx);
                true
            }
            SelectionOp::Remove(idx) => {
                self.remove(idx);
                true
            }
            SelectionOp::Toggle(idx) => {
                self.toggle(idx);
                true
            }
        }
    }
}
