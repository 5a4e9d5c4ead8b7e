use super::load_session;
use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use harloli_core::config::{ConfigBuilder, ExecutionSettings, HeaderField, LoliCodeConfig, SelectionOp};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Starting selection before `--include`/`--exclude` are applied
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum SelectMode {
    #[default]
    All,
    None,
    CriticalPath,
}

impl SelectMode {
    fn op(self) -> SelectionOp {
        match self {
            SelectMode::All => SelectionOp::All,
            SelectMode::None => SelectionOp::None,
            SelectMode::CriticalPath => SelectionOp::CriticalPath,
        }
    }
}

/// Everything the `config` command needs to assemble a LoliCode config
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    pub file: PathBuf,
    pub matrix: Option<PathBuf>,
    pub select: SelectMode,
    pub include: Vec<usize>,
    pub exclude: Vec<usize>,
    /// JSON file with base execution settings
    pub settings: Option<PathBuf>,
    pub proxy: bool,
    pub no_follow_redirects: bool,
    /// Raw timeout input, coerced into range
    pub timeout: Option<String>,
    /// Raw retry input, coerced into range
    pub retries: Option<String>,
    /// `Name: value` pairs
    pub headers: Vec<String>,
    pub output: Option<PathBuf>,
}

/// Assemble the generation config described by `options`
pub fn build_config(options: &ConfigOptions) -> Result<LoliCodeConfig> {
    if options.select == SelectMode::CriticalPath && options.matrix.is_none() {
        bail!("--select critical-path requires --matrix");
    }

    let session = load_session(&options.file, options.matrix.as_deref())?;
    let snapshot = session.snapshot();
    let entry_count = snapshot.entries().len();

    let base_settings = match &options.settings {
        Some(path) => load_settings(path)?,
        None => ExecutionSettings::default(),
    };
    let mut builder = ConfigBuilder::new().with_settings(base_settings);

    if !builder.apply(options.select.op(), entry_count, snapshot.critical_path()) {
        tracing::warn!("Analyzer reported no critical path; falling back to all requests");
    }
    for &idx in &options.include {
        if !builder.apply(SelectionOp::Add(idx), entry_count, snapshot.critical_path()) {
            tracing::warn!("Ignoring --include {}: only {} entries", idx, entry_count);
        }
    }
    for &idx in &options.exclude {
        builder.apply(SelectionOp::Remove(idx), entry_count, snapshot.critical_path());
    }

    let settings = builder.settings_mut();
    if options.proxy {
        settings.toggle_use_proxy();
    }
    if options.no_follow_redirects {
        settings.toggle_follow_redirects();
    }
    if let Some(raw) = &options.timeout {
        settings.set_timeout(raw);
    }
    if let Some(raw) = &options.retries {
        settings.set_retry_count(raw);
    }

    for raw in &options.headers {
        let (name, value) = parse_header(raw)?;
        let headers = builder.custom_headers_mut();
        let pos = headers.add();
        headers.update(pos, HeaderField::Name, name);
        headers.update(pos, HeaderField::Value, value);
    }

    Ok(builder.build(entry_count))
}

pub fn execute(options: &ConfigOptions) -> Result<()> {
    tracing::debug!("Building LoliCode config for: {}", options.file.display());

    let config = build_config(options)?;
    let json = serde_json::to_string_pretty(&config)?;

    if let Some(output_path) = &options.output {
        tracing::debug!("Writing config to: {}", output_path.display());
        std::fs::write(output_path, format!("{}\n", json))
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        tracing::info!(
            "Wrote config with {} requests to {}",
            config.selected_indices.len(),
            output_path.display()
        );
    } else {
        io::stdout().write_all(json.as_bytes())?;
        io::stdout().write_all(b"\n")?;
    }

    Ok(())
}

fn load_settings(path: &Path) -> Result<ExecutionSettings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings {}", path.display()))?;
    let settings: ExecutionSettings = serde_json::from_str(&content)
        .with_context(|| format!("Invalid settings file {}", path.display()))?;
    Ok(settings)
}

/// Split `Name: value`; the value may itself contain colons
fn parse_header(raw: &str) -> Result<(String, String)> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => bail!("Invalid header '{}', expected 'Name: value'", raw),
    }
}
