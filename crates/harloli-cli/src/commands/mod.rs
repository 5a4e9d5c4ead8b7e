pub mod completion;
pub mod config;
pub mod entries;
pub mod graph;

use crate::analyzer::MatrixFileAnalyzer;
use anyhow::{Context, Result};
use harloli_core::session::Session;
use std::borrow::Cow;
use std::path::Path;

/// Load a HAR file into a fresh session, attaching a matrix file if given
pub fn load_session(file: &Path, matrix: Option<&Path>) -> Result<Session> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let mut session = Session::new();
    runtime
        .block_on(session.load_file(file))
        .with_context(|| format!("Failed to load {}", file.display()))?;

    if let Some(matrix_path) = matrix {
        session
            .analyze(&MatrixFileAnalyzer::new(matrix_path))
            .with_context(|| format!("Failed to load matrix {}", matrix_path.display()))?;
    }

    Ok(session)
}

/// Quote a value for a comma-separated row when it contains `,`, `"` or a newline
pub fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
