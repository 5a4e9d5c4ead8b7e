use super::{csv_field, load_session};
use crate::OutputFormat;
use anyhow::Result;
use harloli_core::graph::label;
use serde::Serialize;
use std::path::Path;

/// One normalized entry as shown to the user
#[derive(Debug, Clone, Serialize)]
pub struct EntryRow {
    pub index: usize,
    pub entry_id: String,
    pub label: String,
    pub method: String,
    pub url: String,
    pub status: i64,
    pub duration: f64,
    pub has_request_body: bool,
}

/// Normalize a HAR file and describe each entry
pub fn list_entries(file: &Path) -> Result<Vec<EntryRow>> {
    let session = load_session(file, None)?;
    let entries = session.entries();

    Ok(entries
        .iter()
        .enumerate()
        .map(|(index, entry)| EntryRow {
            index,
            entry_id: entry.entry_id.clone(),
            label: label(entries, index),
            method: entry.request.method.clone(),
            url: entry.request.url.clone(),
            status: entry.response.status,
            duration: entry.duration,
            has_request_body: entry.request.body.is_some(),
        })
        .collect())
}

pub fn execute(file: &Path, format: OutputFormat) -> Result<()> {
    tracing::info!("Listing entries in: {}", file.display());
    tracing::debug!("Output format: {}", format.as_str());

    let rows = list_entries(file)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Table => output_table(&rows),
        OutputFormat::Pretty => output_pretty(&rows),
    }

    Ok(())
}

fn output_pretty(rows: &[EntryRow]) {
    use console::style;

    println!("\n{}", style("HAR Entries").bold().cyan());
    println!("{}", style("===========").cyan());

    if rows.is_empty() {
        println!("\n  No entries found");
    }

    for row in rows {
        println!(
            "  {:>3}. {} [{}] {:.1} ms",
            row.index,
            style(&row.label).bold(),
            row.status,
            row.duration
        );
        println!("       {}", style(&row.url).dim());
    }

    println!();
}

fn output_table(rows: &[EntryRow]) {
    println!("Index,Entry ID,Method,Status,Duration (ms),URL");
    for row in rows {
        println!(
            "{},{},{},{},{:.2},{}",
            row.index,
            row.entry_id,
            csv_field(&row.method),
            row.status,
            row.duration,
            csv_field(&row.url)
        );
    }
}
