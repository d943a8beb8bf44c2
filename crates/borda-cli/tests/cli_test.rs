//! End-to-end tests for the `borda` binary.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

// ============================================================================
// Helper Functions
// ============================================================================

const PARTY: &str = r#"{
    "domain": {
        "name": "party",
        "issues": [
            { "number": 1, "name": "food", "values": ["chips", "cake", "fruit"] },
            { "number": 2, "name": "music", "values": ["band", "dj"] }
        ]
    },
    "ranking": [
        { "1": "chips", "2": "band" },
        { "1": "fruit", "2": "dj" },
        { "1": "cake", "2": "band" },
        { "1": "cake", "2": "dj" }
    ],
    "counterpart_offers": [
        { "1": "chips", "2": "band" },
        { "1": "cake", "2": "band" },
        { "1": "cake", "2": "dj" }
    ]
}"#;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn borda() -> Command {
    let mut cmd = Command::cargo_bin("borda").unwrap();
    cmd.env("RUST_LOG", "off");
    cmd
}

// ============================================================================
// estimate
// ============================================================================

#[test]
fn estimate_prints_table() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = write(dir.path(), "party.json", PARTY);

    borda()
        .args(["estimate", "--scenario"])
        .arg(&scenario)
        .assert()
        .success()
        .stdout(predicate::str::contains("Estimated Utility: party"))
        .stdout(predicate::str::contains("Best bid: 1=cake,2=dj"));
}

#[test]
fn estimate_prints_json() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = write(dir.path(), "party.json", PARTY);

    let output = borda()
        .args(["estimate", "--format", "json", "--scenario"])
        .arg(&scenario)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["domain"], "party");
    assert_eq!(report["best_bid"]["1"], "cake");
    assert_eq!(report["best_bid"]["2"], "dj");
    let total: f64 = report["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|issue| issue["weight"].as_f64().unwrap())
        .sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn estimate_missing_scenario_fails() {
    borda()
        .args(["estimate", "--scenario", "/nonexistent/party.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read scenario"));
}

#[test]
fn estimate_empty_ranking_fails() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = write(
        dir.path(),
        "empty.json",
        r#"{"domain":{"name":"d","issues":[{"number":1,"name":"a","values":["x"]}]},"ranking":[]}"#,
    );

    borda()
        .args(["estimate", "--scenario"])
        .arg(&scenario)
        .assert()
        .failure()
        .stderr(predicate::str::contains("insufficient data"));
}

// ============================================================================
// play
// ============================================================================

#[test]
fn play_prints_transcript() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = write(dir.path(), "party.json", PARTY);
    let config = write(dir.path(), "agent.toml", "seed = 3\n");

    borda()
        .args(["play", "--rounds", "12", "--scenario"])
        .arg(&scenario)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Borda Ranking Agent on party"))
        .stdout(predicate::str::contains("ROUND"));
}

#[test]
fn play_json_transcript_is_consistent() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = write(dir.path(), "party.json", PARTY);
    let config = write(dir.path(), "agent.toml", "seed = 3\n");

    let output = borda()
        .args(["--format", "json", "play", "--rounds", "12", "--scenario"])
        .arg(&scenario)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());

    let transcript: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let turns = transcript["turns"].as_array().unwrap();
    assert!(!turns.is_empty() && turns.len() <= 12);
    assert_eq!(turns[0]["action"]["action"], "offer");
    assert_eq!(turns[0]["action"]["bid"]["1"], "cake");
    if !transcript["agreement"].is_null() {
        let last = turns.last().unwrap();
        assert_eq!(last["action"]["action"], "accept");
        assert!(last["utility"].as_f64().unwrap() > 0.7);
    }
}

#[test]
fn play_zero_rounds_fails() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = write(dir.path(), "party.json", PARTY);

    borda()
        .args(["play", "--rounds", "0", "--scenario"])
        .arg(&scenario)
        .assert()
        .failure()
        .stderr(predicate::str::contains("rounds must be at least 1"));
}

// ============================================================================
// init-config
// ============================================================================

#[test]
fn init_config_writes_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agent.toml");

    borda()
        .args(["init-config", "--output"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default agent config"));

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("phase_boundary = 0.5"));
    assert!(written.contains("acceptance_threshold = 0.7"));
}

#[test]
fn init_config_refuses_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "agent.toml", "seed = 1\n");

    borda()
        .args(["init-config", "--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn unknown_subcommand_fails() {
    borda().arg("negotiate").assert().failure();
}
