use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

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

/// Entries come back in capture order with positional IDs
#[test]
fn test_list_entries_preserves_order() {
    let rows = harloli_cli::commands::entries::list_entries(&fixture_path("sample.har")).unwrap();

    assert_eq!(rows.len(), 5);
    let ids: Vec<_> = rows.iter().map(|r| r.entry_id.as_str()).collect();
    assert_eq!(ids, vec!["entry-0", "entry-1", "entry-2", "entry-3", "entry-4"]);

    assert_eq!(rows[1].method, "POST");
    assert!(rows[1].has_request_body);
    assert!(!rows[0].has_request_body);
    assert_eq!(rows[3].duration, 210.0);
}

/// Labels use the last path segment and fall back for bad URLs
#[test]
fn test_list_entries_labels() {
    let rows = harloli_cli::commands::entries::list_entries(&fixture_path("sample.har")).unwrap();

    let labels: Vec<_> = rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "GET login",
            "POST session",
            "GET profile",
            "GET orders",
            "GET Request #5"
        ]
    );
}

#[test]
fn test_list_entries_empty_har() {
    let rows = harloli_cli::commands::entries::list_entries(&fixture_path("empty.har")).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_list_entries_malformed_json() {
    let result = harloli_cli::commands::entries::list_entries(&fixture_path("malformed.har"));
    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("not valid JSON"));
}

#[test]
fn test_list_entries_missing_entries() {
    let result = harloli_cli::commands::entries::list_entries(&fixture_path("no-entries.har"));
    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("log.entries"));
}

#[test]
fn test_entries_command_json_output() {
    let mut cmd = Command::new(get_harloli_bin());
    cmd.arg("entries")
        .arg(fixture_path("sample.har"))
        .arg("--format")
        .arg("json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"entry_id\": \"entry-4\""))
        .stdout(predicate::str::contains("POST session"));
}

#[test]
fn test_entries_command_table_output() {
    let mut cmd = Command::new(get_harloli_bin());
    cmd.arg("entries")
        .arg(fixture_path("sample.har"))
        .arg("--format")
        .arg("table");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("Index,Entry ID,Method,Status"))
        .stdout(predicate::str::contains("3,entry-3,GET,200,210.00"));
}

#[test]
fn test_entries_command_missing_file() {
    let mut cmd = Command::new(get_harloli_bin());
    cmd.arg("entries").arg(fixture_path("does-not-exist.har"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load"));
}

/// URLs containing commas are quoted so columns stay aligned
#[test]
fn test_entries_command_table_quotes_commas() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let har_path = temp_dir.path().join("commas.har");
    std::fs::write(
        &har_path,
        r#"{"log": {"entries": [{"request": {"method": "GET", "url": "https://x.io/items?ids=1,2"}, "response": {"status": 200}}]}}"#,
    )
    .unwrap();

    let mut cmd = Command::new(get_harloli_bin());
    cmd.arg("entries")
        .arg(&har_path)
        .arg("--format")
        .arg("table");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "0,entry-0,GET,200,0.00,\"https://x.io/items?ids=1,2\"",
        ));
}
