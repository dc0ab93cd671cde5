//! CLI seeding integration tests
//!
//! These tests run the built binary against fixture files in a temp
//! directory and check its output and exit codes.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

const FIXTURE: &str = r#"
schema_version: 0
dataset:
  name: cli-smoke
actions:
  - name: "Viewed a page"
    event_name: "$pageview"
people:
  - first_seen_at: "2024-08-01T10:00:00Z"
    distinct_ids: ["u-1"]
    events:
      - event: "$pageview"
        timestamp: "2024-08-01T10:00:00Z"
  - first_seen_at: "2024-08-01T11:00:00Z"
    distinct_ids: ["u-2"]
    events:
      - event: "$pageview"
        timestamp: "2024-08-01T11:00:00Z"
      - event: "$pageview"
        timestamp: "2024-08-01T11:05:00Z"
"#;

const BROKEN_FIXTURE: &str = r#"
schema_version: 0
dataset:
  name: broken
groups:
  - type_index: 9
    key: acme
people: []
"#;

fn write_fixture(temp_dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = temp_dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn cli_bin() -> &'static str {
    env!("CARGO_BIN_EXE_synthpop-cli")
}

#[test]
fn test_seed_then_status() {
    let temp_dir = TempDir::new().unwrap();
    let fixture_path = write_fixture(&temp_dir, "dataset.yaml", FIXTURE);

    // Seed into stores under the temp directory
    let output = Command::new(cli_bin())
        .current_dir(temp_dir.path())
        .args([
            "seed",
            fixture_path.to_str().unwrap(),
            "--app-db",
            "stores/app.db",
            "--analytics-db",
            "stores/analytics.db",
        ])
        .output()
        .expect("Failed to execute CLI");

    assert!(
        output.status.success(),
        "seed failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Seeded team"), "stdout: {}", stdout);
    assert!(stdout.contains("people: 2 saved of 2 simulated"));
    assert!(stdout.contains("events: 3"));
    assert!(stdout.contains("dataset digest:"));
    assert!(temp_dir.path().join("stores/app.db").exists());
    assert!(temp_dir.path().join("stores/analytics.db").exists());

    // Status reads the same stores back
    let output = Command::new(cli_bin())
        .current_dir(temp_dir.path())
        .args([
            "status",
            "--app-db",
            "stores/app.db",
            "--analytics-db",
            "stores/analytics.db",
        ])
        .output()
        .expect("Failed to execute CLI");

    assert!(
        output.status.success(),
        "status failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    // The team takes the fixture's dataset name by default
    assert!(stdout.contains("'cli-smoke'"), "stdout: {}", stdout);
    assert!(stdout.contains("2 persons"));
    assert!(stdout.contains("3 events"));
    assert!(stdout.contains("Recent seed runs:"), "stdout: {}", stdout);
    assert!(stdout.contains("seed_run_completed"));
}

#[test]
fn test_seed_rejects_an_invalid_fixture() {
    let temp_dir = TempDir::new().unwrap();
    let fixture_path = write_fixture(&temp_dir, "broken.yaml", BROKEN_FIXTURE);

    let output = Command::new(cli_bin())
        .current_dir(temp_dir.path())
        .args(["seed", fixture_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute CLI");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("type_index"), "stderr: {}", stderr);
}

#[test]
fn test_seed_with_explicit_team_name() {
    let temp_dir = TempDir::new().unwrap();
    let fixture_path = write_fixture(&temp_dir, "dataset.yaml", FIXTURE);

    let output = Command::new(cli_bin())
        .current_dir(temp_dir.path())
        .args([
            "seed",
            fixture_path.to_str().unwrap(),
            "--team-name",
            "Named Team",
        ])
        .output()
        .expect("Failed to execute CLI");

    assert!(
        output.status.success(),
        "seed failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("'Named Team'"));
}

#[test]
fn test_status_without_stores_fails_cleanly() {
    let temp_dir = TempDir::new().unwrap();

    let output = Command::new(cli_bin())
        .current_dir(temp_dir.path())
        .args(["status"])
        .output()
        .expect("Failed to execute CLI");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no app store"), "stderr: {}", stderr);
}
