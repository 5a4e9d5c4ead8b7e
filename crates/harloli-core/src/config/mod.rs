//! Assembly of the configuration handed to the LoliCode generator.

mod headers;
mod selection;
mod settings;

pub use headers::{CustomHeaders, HeaderField};
pub use selection::{Selection, SelectionOp};
pub use settings::{
    DEFAULT_RETRY_COUNT, DEFAULT_TIMEOUT_SECS, ExecutionSettings, MAX_RETRY_COUNT,
    MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS, clamp_retry_count, clamp_timeout,
};

use crate::Result;
use crate::har::{NameValue, SemanticHarEntry};
use serde::{Deserialize, Serialize};

/// Input to the external LoliCode generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoliCodeConfig {
    pub selected_indices: Vec<usize>,
    pub settings: ExecutionSettings,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_headers: Vec<NameValue>,
}

/// External script generator
pub trait ScriptGenerator {
    fn generate(&self, config: &LoliCodeConfig, entries: &[SemanticHarEntry]) -> Result<String>;
}

/// Finalize a generation config
///
/// Indices that no longer match an entry are dropped first. If nothing is
/// left and entries exist, every entry is selected, so the generator never
/// silently receives zero requests.
pub fn build(
    selection: &Selection,
    settings: &ExecutionSettings,
    custom_headers: &[NameValue],
    entry_count: usize,
) -> LoliCodeConfig {
    let mut selected_indices: Vec<usize> = selection
        .indices()
        .iter()
        .copied()
        .filter(|&idx| {
            let known = idx < entry_count;
            if !known {
                tracing::warn!("Dropping selected index {} with no matching entry", idx);
            }
            known
        })
        .collect();

    if selected_indices.is_empty() {
        if !selection.is_empty() {
            tracing::warn!("No selected index matches an entry; selecting all requests");
        }
        selected_indices = (0..entry_count).collect();
    }

    tracing::debug!(
        "Built LoliCode config with {} of {} requests",
        selected_indices.len(),
        entry_count
    );

    LoliCodeConfig {
        selected_indices,
        settings: *settings,
        custom_headers: custom_headers.to_vec(),
    }
}

/// Accumulates user choices until a config is requested
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    selection: Selection,
    settings: ExecutionSettings,
    custom_headers: CustomHeaders,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(mut self, settings: ExecutionSettings) -> Self {
        self.settings = settings.clamped();
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.push(NameValue::new(name, value));
        self
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub fn settings(&self) -> &ExecutionSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ExecutionSettings {
        &mut self.settings
    }

    pub fn custom_headers(&self) -> &CustomHeaders {
        &self.custom_headers
    }

    pub fn custom_headers_mut(&mut self) -> &mut CustomHeaders {
        &mut self.custom_headers
    }

    /// See [`Selection::apply`]
    pub fn apply(&mut self, op: SelectionOp, entry_count: usize, critical_path: &[usize]) -> bool {
        self.selection.apply(op, entry_count, critical_path)
    }

    pub fn build(&self, entry_count: usize) -> LoliCodeConfig {
        build(
            &self.selection,
            &self.settings,
            self.custom_headers.as_slice(),
            entry_count,
        )
    }
}
