use super::{csv_field, load_session};
use crate::OutputFormat;
use anyhow::Result;
use harloli_core::graph::{GraphSummary, label};
use serde::Serialize;
use std::path::Path;

/// Dependency graph rendered with entry labels
#[derive(Debug, Clone, Serialize)]
pub struct GraphReport {
    pub summary: GraphSummary,
    pub edges: Vec<EdgeRow>,
    pub critical_path: Vec<PathStep>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeRow {
    pub from_index: usize,
    pub to_index: usize,
    pub from_label: String,
    pub to_label: String,
    /// Edge is a hop along the critical path
    pub critical: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PathStep {
    pub index: usize,
    pub label: String,
}

pub fn build_report(file: &Path, matrix: &Path) -> Result<GraphReport> {
    let session = load_session(file, Some(matrix))?;
    let entries = session.entries();
    let graph = session
        .graph()
        .ok_or_else(|| anyhow::anyhow!("No dependency graph attached"))?;

    let critical_edges = graph.critical_path_edges();

    let edges = graph
        .edges()
        .iter()
        .map(|edge| EdgeRow {
            from_index: edge.from_index,
            to_index: edge.to_index,
            from_label: label(entries, edge.from_index),
            to_label: label(entries, edge.to_index),
            critical: critical_edges.contains(edge),
        })
        .collect();

    let critical_path = graph
        .critical_path()
        .iter()
        .map(|&index| PathStep {
            index,
            label: label(entries, index),
        })
        .collect();

    Ok(GraphReport {
        summary: graph.summary(entries.len()),
        edges,
        critical_path,
    })
}

pub fn execute(file: &Path, matrix: &Path, format: OutputFormat) -> Result<()> {
    tracing::info!("Rendering dependency graph for: {}", file.display());
    tracing::debug!("Output format: {}", format.as_str());

    let report = build_report(file, matrix)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => output_table(&report),
        OutputFormat::Pretty => output_pretty(&report),
    }

    Ok(())
}

fn output_pretty(report: &GraphReport) {
    use console::style;

    println!("\n{}", style("Dependency Graph").bold().cyan());
    println!("{}", style("================").cyan());

    println!("\n{}", style("Summary:").bold());
    println!("  Nodes:              {}", report.summary.node_count);
    println!("  Edges:              {}", report.summary.edge_count);
    println!("  Critical Path:      {} steps", report.summary.critical_path_len);

    if !report.summary.dangling.is_empty() {
        let dangling: Vec<String> = report.summary.dangling.iter().map(|i| i.to_string()).collect();
        println!(
            "  {}",
            style(format!("Unknown indices:    {}", dangling.join(", "))).yellow()
        );
    }

    if !report.edges.is_empty() {
        println!("\n{}", style("Edges:").bold());
        for edge in &report.edges {
            let line = format!(
                "  [{}] {} -> [{}] {}",
                edge.from_index, edge.from_label, edge.to_index, edge.to_label
            );
            if edge.critical {
                println!("{}", style(line).red());
            } else {
                println!("{}", line);
            }
        }
    }

    if !report.critical_path.is_empty() {
        println!("\n{}", style("Critical Path:").bold());
        for (i, step) in report.critical_path.iter().enumerate() {
            println!("  {}. [{}] {}", i + 1, step.index, step.label);
        }
    }

    println!();
}

fn output_table(report: &GraphReport) {
    println!("From,To,From Label,To Label,Critical");
    for edge in &report.edges {
        println!(
            "{},{},{},{},{}",
            edge.from_index,
            edge.to_index,
            csv_field(&edge.from_label),
            csv_field(&edge.to_label),
            edge.critical
        );
    }
}
