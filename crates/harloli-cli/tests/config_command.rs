use assert_cmd::Command;
use harloli_cli::commands::config::{ConfigOptions, SelectMode, build_config};
use harloli_core::config::LoliCodeConfig;
use harloli_core::har::NameValue;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get path to test fixtures
fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
        .join(filename)
}

#[allow(deprecated)]
fn get_harloli_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("harloli")
}

fn options(file: &str) -> ConfigOptions {
    ConfigOptions {
        file: fixture_path(file),
        ..Default::default()
    }
}

/// Default selection covers every request
#[test]
fn test_config_defaults_to_all_requests() {
    let config = build_config(&options("sample.har")).unwrap();

    assert_eq!(config.selected_indices, vec![0, 1, 2, 3, 4]);
    assert!(!config.settings.use_proxy);
    assert!(config.settings.follow_redirects);
    assert_eq!(config.settings.timeout, 30);
    assert_eq!(config.settings.retry_count, 3);
    assert!(config.custom_headers.is_empty());
}

/// Selecting nothing still yields every request
#[test]
fn test_config_empty_selection_falls_back_to_all() {
    let opts = ConfigOptions {
        select: SelectMode::None,
        ..options("sample.har")
    };
    let config = build_config(&opts).unwrap();
    assert_eq!(config.selected_indices, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_config_empty_har_selects_nothing() {
    let config = build_config(&options("empty.har")).unwrap();
    assert!(config.selected_indices.is_empty());
}

/// Critical path selection keeps path order
#[test]
fn test_config_critical_path_selection() {
    let opts = ConfigOptions {
        matrix: Some(fixture_path("sample-matrix.json")),
        select: SelectMode::CriticalPath,
        include: vec![4],
        exclude: vec![0],
        ..options("sample.har")
    };
    let config = build_config(&opts).unwrap();
    assert_eq!(config.selected_indices, vec![1, 3, 4]);
}

#[test]
fn test_config_critical_path_requires_matrix() {
    let opts = ConfigOptions {
        select: SelectMode::CriticalPath,
        ..options("sample.har")
    };
    let err = build_config(&opts).unwrap_err();
    assert!(err.to_string().contains("--matrix"));
}

/// With no critical path the selection stays empty and falls back to all
#[test]
fn test_config_missing_critical_path_falls_back() {
    let opts = ConfigOptions {
        matrix: Some(fixture_path("no-critical-path.json")),
        select: SelectMode::CriticalPath,
        ..options("sample.har")
    };
    let config = build_config(&opts).unwrap();
    assert_eq!(config.selected_indices, vec![0, 1, 2, 3, 4]);
}

/// A critical path that only names missing entries still yields every request
#[test]
fn test_config_stale_critical_path_falls_back_to_all() {
    let opts = ConfigOptions {
        matrix: Some(fixture_path("stale-critical-path.json")),
        select: SelectMode::CriticalPath,
        ..options("sample.har")
    };
    let config = build_config(&opts).unwrap();
    assert_eq!(config.selected_indices, vec![0, 1, 2, 3, 4]);
}

/// Stale indices are dropped while known ones keep path order
#[test]
fn test_config_partially_stale_critical_path() {
    let opts = ConfigOptions {
        matrix: Some(fixture_path("stale-matrix.json")),
        select: SelectMode::CriticalPath,
        ..options("sample.har")
    };
    let config = build_config(&opts).unwrap();
    assert_eq!(config.selected_indices, vec![0, 1]);
}

#[test]
fn test_config_command_stale_critical_path() {
    let mut cmd = Command::new(get_harloli_bin());
    cmd.arg("config")
        .arg(fixture_path("sample.har"))
        .arg("--matrix")
        .arg(fixture_path("stale-critical-path.json"))
        .arg("--select")
        .arg("critical-path")
        .env_remove("HARLOLI_TIMEOUT")
        .env_remove("HARLOLI_RETRIES");

    let output = cmd.assert().success().get_output().stdout.clone();
    let config: LoliCodeConfig = serde_json::from_slice(&output).unwrap();
    assert_eq!(config.selected_indices, vec![0, 1, 2, 3, 4]);
}

/// Manual picks ignore indices past the last entry
#[test]
fn test_config_manual_selection() {
    let opts = ConfigOptions {
        select: SelectMode::None,
        include: vec![3, 1, 3, 42],
        ..options("sample.har")
    };
    let config = build_config(&opts).unwrap();
    assert_eq!(config.selected_indices, vec![3, 1]);
}

/// Out-of-range settings are coerced
#[test]
fn test_config_settings_are_clamped() {
    let opts = ConfigOptions {
        proxy: true,
        no_follow_redirects: true,
        timeout: Some("1000".to_string()),
        retries: Some("-1".to_string()),
        ..options("sample.har")
    };
    let config = build_config(&opts).unwrap();
    assert!(config.settings.use_proxy);
    assert!(!config.settings.follow_redirects);
    assert_eq!(config.settings.timeout, 300);
    assert_eq!(config.settings.retry_count, 0);

    let opts = ConfigOptions {
        timeout: Some("abc".to_string()),
        retries: Some("50".to_string()),
        ..options("sample.har")
    };
    let config = build_config(&opts).unwrap();
    assert_eq!(config.settings.timeout, 30);
    assert_eq!(config.settings.retry_count, 10);
}

#[test]
fn test_config_settings_file() {
    let temp_dir = TempDir::new().unwrap();
    let settings_path = temp_dir.path().join("settings.json");
    std::fs::write(
        &settings_path,
        r#"{"useProxy": true, "followRedirects": false, "timeout": 0, "retryCount": 2}"#,
    )
    .unwrap();

    let opts = ConfigOptions {
        settings: Some(settings_path),
        ..options("sample.har")
    };
    let config = build_config(&opts).unwrap();
    assert!(config.settings.use_proxy);
    assert!(!config.settings.follow_redirects);
    assert_eq!(config.settings.timeout, 30);
    assert_eq!(config.settings.retry_count, 2);
}

/// Custom headers keep order and duplicates
#[test]
fn test_config_custom_headers() {
    let opts = ConfigOptions {
        headers: vec![
            "X-Env: staging".to_string(),
            "X-Env: canary".to_string(),
            "Referer: https://shop.example.com/".to_string(),
        ],
        ..options("sample.har")
    };
    let config = build_config(&opts).unwrap();
    assert_eq!(
        config.custom_headers,
        vec![
            NameValue::new("X-Env", "staging"),
            NameValue::new("X-Env", "canary"),
            NameValue::new("Referer", "https://shop.example.com/"),
        ]
    );
}

#[test]
fn test_config_invalid_header() {
    let opts = ConfigOptions {
        headers: vec!["missing-colon".to_string()],
        ..options("sample.har")
    };
    assert!(build_config(&opts).is_err());
}

#[test]
fn test_config_rejects_malformed_har() {
    let err = build_config(&options("malformed.har")).unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid HAR file"));
}

/// The command writes camelCase JSON the generator can read back
#[test]
fn test_config_command_writes_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("config.json");

    let mut cmd = Command::new(get_harloli_bin());
    cmd.arg("config")
        .arg(fixture_path("sample.har"))
        .arg("--matrix")
        .arg(fixture_path("sample-matrix.json"))
        .arg("--select")
        .arg("critical-path")
        .arg("--timeout")
        .arg("-5")
        .arg("-H")
        .arg("X-Api-Key: secret")
        .arg("--output")
        .arg(&output);

    cmd.assert().success();

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.contains("\"selectedIndices\""));
    assert!(content.contains("\"followRedirects\": true"));

    let config: LoliCodeConfig = serde_json::from_str(&content).unwrap();
    assert_eq!(config.selected_indices, vec![0, 1, 3]);
    assert_eq!(config.settings.timeout, 30);
    assert_eq!(config.custom_headers, vec![NameValue::new("X-Api-Key", "secret")]);
}

#[test]
fn test_config_command_reads_env() {
    let mut cmd = Command::new(get_harloli_bin());
    cmd.arg("config")
        .arg(fixture_path("sample.har"))
        .env("HARLOLI_TIMEOUT", "45")
        .env("HARLOLI_RETRIES", "2");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"timeout\": 45"))
        .stdout(predicate::str::contains("\"retryCount\": 2"));
}

#[test]
fn test_config_command_stdout() {
    let mut cmd = Command::new(get_harloli_bin());
    cmd.arg("config")
        .arg(fixture_path("sample.har"))
        .arg("--select")
        .arg("none")
        .env_remove("HARLOLI_TIMEOUT")
        .env_remove("HARLOLI_RETRIES");

    let output = cmd.assert().success().get_output().stdout.clone();
    let config: LoliCodeConfig = serde_json::from_slice(&output).unwrap();
    assert_eq!(config.selected_indices, vec![0, 1, 2, 3, 4]);
    assert_eq!(config.settings.timeout, 30);
}
