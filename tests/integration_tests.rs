//! Integration tests for the butterfly-nav command-line interface
//!
//! Every test runs the built binary against `tests/data/riverton.json` or a
//! temporary file and checks exit status plus the printed report.

use std::io::Write;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn riverton() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/riverton.json")
}

fn nav() -> Command {
    let mut cmd = Command::cargo_bin("butterfly-nav").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_route_prints_summary() {
    nav()
        .args(["route", "--from", "0", "--to", "5", "--map"])
        .arg(riverton())
        .assert()
        .success()
        .stdout(predicate::str::contains("From: 0 (Town Hall)"))
        .stdout(predicate::str::contains("To:   5 (Riverside Park)"))
        .stdout(predicate::str::contains("Path: 0 -> 3 -> 4 -> 5"))
        .stdout(predicate::str::contains("Distance: 30.00 units"))
        .stdout(predicate::str::contains("Time: 0.9 minutes"))
        .stdout(predicate::str::contains("Intersections: 4"))
        .stdout(predicate::str::contains("Local Road: 2 segments"))
        .stdout(predicate::str::contains("Secondary Road: 1 segments"));
}

#[test]
fn test_route_with_speed_config() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "[speeds]\nsecondary_road = 20.0").unwrap();

    nav()
        .args(["route", "--from", "0", "--to", "5", "--map"])
        .arg(riverton())
        .arg("--config")
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Time: 1.2 minutes"));
}

#[test]
fn test_route_without_path_is_not_an_error() {
    nav()
        .args(["route", "--from", "0", "--to", "6", "--map"])
        .arg(riverton())
        .assert()
        .success()
        .stdout(predicate::str::contains("No path found"));
}

#[test]
fn test_route_unknown_intersection_fails() {
    nav()
        .args(["route", "--from", "0", "--to", "99", "--map"])
        .arg(riverton())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown intersection '99'"));
}

#[test]
fn test_missing_map_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    nav()
        .args(["info", "--map"])
        .arg(dir.path().join("absent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load map"));
}

#[test]
fn test_invalid_map_fails() {
    let mut map = tempfile::NamedTempFile::new().unwrap();
    write!(
        map,
        r#"{{"intersections": {{"a": {{"x": 0, "y": 0, "turns": {{"north": "ghost"}}}}}}}}"#
    )
    .unwrap();

    nav()
        .args(["connectivity", "--map"])
        .arg(map.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn test_info_lists_landmarks_and_restrictions() {
    nav()
        .args(["info", "--map"])
        .arg(riverton())
        .assert()
        .success()
        .stdout(predicate::str::contains("Map: Riverton"))
        .stdout(predicate::str::contains("Intersections: 7"))
        .stdout(predicate::str::contains("Landmarks (2):"))
        .stdout(predicate::str::contains(
            "Town Hall (government) at intersection 0 (0, 0)",
        ))
        .stdout(predicate::str::contains("no left turn: 1 locations"))
        .stdout(predicate::str::contains("1. 0 -> 1 -> 4"))
        .stdout(predicate::str::contains("no U-turn: 1 locations"));
}

#[test]
fn test_connectivity_report() {
    nav()
        .args(["connectivity", "--map"])
        .arg(riverton())
        .assert()
        .success()
        .stdout(predicate::str::contains("Roads: 7"))
        .stdout(predicate::str::contains("Traffic Light Intersection: 2"))
        .stdout(predicate::str::contains("Traffic lights: 2"))
        .stdout(predicate::str::contains("Highway: 1 segments"))
        .stdout(predicate::str::contains("One-way roads: 1"))
        .stdout(predicate::str::contains("Isolated intersections: 6"));
}

#[test]
fn test_random_routes_with_seed() {
    let run = || {
        nav()
            .args(["random", "--count", "2", "--seed", "42", "--map"])
            .arg(riverton())
            .assert()
            .success()
            .stdout(predicate::str::contains("Random route 1:"))
            .stdout(predicate::str::contains("Random route 2:"))
            .get_output()
            .stdout
            .clone()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_version_flag() {
    nav()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
