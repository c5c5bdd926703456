//! Integration tests for the `euroroute` binary.
//!
//! Every test points discovery at the JSON city fixture so no network access
//! is needed, and writes artifacts into a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/cities.json")
}

fn euroroute(output_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("euroroute").expect("binary exists");
    cmd.env("EUROROUTE_CITY_SOURCE", fixture_path())
        .env("EUROROUTE_CACHE_DIR", output_dir.join("cache"))
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "warn")
        .arg("--output-dir")
        .arg(output_dir.join("outputs"));
    cmd
}

#[test]
fn run_writes_artifacts_and_reports_json() {
    let temp = TempDir::new().expect("create temp dir");
    let output = euroroute(temp.path())
        .args(["--format", "json", "run"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let summary: serde_json::Value = serde_json::from_slice(&output).expect("stdout is JSON");
    assert_eq!(summary["routes_processed"], 3);
    assert_eq!(summary["total_routes_generated"], 30);
    assert_eq!(summary["processed"][0]["route"]["id"], "EUR_001");

    let outputs = temp.path().join("outputs");
    for id in ["EUR_001", "EUR_002", "EUR_003"] {
        assert!(outputs.join(format!("maps/{id}_route_map.html")).is_file());
        assert!(outputs.join(format!("timetables/{id}_timetable.xlsx")).is_file());
    }
    assert!(outputs.join("timetables/all_timetables.xlsx").is_file());
    assert!(outputs.join("reports/european_route_analysis.xlsx").is_file());
    assert!(outputs.join("reports/generated_routes.csv").is_file());
    assert!(outputs.join("pricing/european_pricing_analysis.xlsx").is_file());
}

#[test]
fn run_flags_override_defaults() {
    let temp = TempDir::new().expect("create temp dir");
    euroroute(temp.path())
        .args(["run", "--country", "Germany", "--routes", "2", "--max-routes", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 2 of 4 generated routes"))
        .stdout(predicate::str::contains("EUR_001  Berlin → Hamburg  255.3 km"))
        .stdout(predicate::str::contains("Completed in"));
}

#[test]
fn discover_lists_cities_by_population() {
    let temp = TempDir::new().expect("create temp dir");
    euroroute(temp.path())
        .args(["discover", "--country", "Spain", "--max-cities", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Spain (2 cities):"))
        .stdout(predicate::str::contains(" - Madrid (40.4168, -3.7038) pop. 3,223,000"))
        .stdout(predicate::str::contains("Valencia").not());
}

#[test]
fn discover_requires_a_country() {
    let temp = TempDir::new().expect("create temp dir");
    euroroute(temp.path())
        .arg("discover")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--country"));
}

#[test]
fn plan_does_not_write_documents() {
    let temp = TempDir::new().expect("create temp dir");
    let output = euroroute(temp.path())
        .args(["plan", "--country", "France", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let plan: serde_json::Value = serde_json::from_slice(&output).expect("stdout is JSON");
    assert_eq!(plan["routes"].as_array().map(Vec::len), Some(29));
    assert_eq!(plan["routes"][1]["distance_km"], 391.5);
    assert!(!temp.path().join("outputs").exists());
}

#[test]
fn route_documents_named_pair() {
    let temp = TempDir::new().expect("create temp dir");
    euroroute(temp.path())
        .args([
            "route", "--from", "paris", "--to", "Berlin", "--country", "France", "--country",
            "Germany",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Paris → Berlin  877.5 km  14h 38m  International"));
    assert!(temp
        .path()
        .join("outputs/maps/EUR_001_route_map.html")
        .is_file());
}

#[test]
fn unknown_city_suggests_names() {
    let temp = TempDir::new().expect("create temp dir");
    euroroute(temp.path())
        .args(["route", "--from", "Pariss", "--to", "Lyon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown city name: Pariss"))
        .stderr(predicate::str::contains("Did you mean 'Paris'?"));
}

#[test]
fn config_file_is_applied() {
    let temp = TempDir::new().expect("create temp dir");
    let config = temp.path().join("euroroute.json");
    fs::write(
        &config,
        r#"{ "countries": ["Netherlands"], "min_distance_km": 10.0, "routes": 1 }"#,
    )
    .expect("write config");

    euroroute(temp.path())
        .arg("--config")
        .arg(&config)
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 routes from 3 cities in 1 countries"))
        .stdout(predicate::str::contains("Amsterdam → Rotterdam  57.2 km"));
}

#[test]
fn no_routes_is_an_error() {
    let temp = TempDir::new().expect("create temp dir");
    euroroute(temp.path())
        .args(["run", "--country", "Netherlands"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no routes generated"));
}
