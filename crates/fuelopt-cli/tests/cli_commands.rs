use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::{tempdir, TempDir};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures")
        .canonicalize()
        .expect("fixtures directory present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("fuelopt-cli");
    cmd.env("RUST_LOG", "error").env_remove("FUELOPT_DATA_DIR");
    cmd
}

fn fixture_command() -> Command {
    let mut cmd = cli();
    cmd.arg("--data-dir").arg(fixtures_dir());
    cmd
}

#[test]
fn lists_fixture_aircraft() {
    fixture_command()
        .arg("aircraft")
        .assert()
        .success()
        .stdout(contains("Available aircraft (4):"))
        .stdout(contains("A320"))
        .stdout(contains("E190"))
        .stdout(contains("6800.0"));
}

#[test]
fn data_dir_from_environment() {
    cli()
        .env("FUELOPT_DATA_DIR", fixtures_dir())
        .arg("aircraft")
        .assert()
        .success()
        .stdout(contains("B777"));
}

#[test]
fn estimate_prints_breakdown_and_total() {
    fixture_command()
        .args(["estimate", "--aircraft", "A320", "--route", "routes.csv"])
        .assert()
        .success()
        .stdout(contains("Route: routes.csv"))
        .stdout(contains("Lagos"))
        .stdout(contains("1250.00"))
        .stdout(contains("1100.00"))
        .stdout(contains("Total fuel: 2350.00 kg"));
}

#[test]
fn estimate_json_matches_api_shape() {
    let output = fixture_command()
        .args([
            "estimate",
            "--aircraft",
            "a320",
            "--route",
            "routes_option_b.csv",
            "--format",
            "json",
        ])
        .output()
        .expect("run estimate");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["aircraft"], "a320");
    assert_eq!(value["fuel_estimate_kg"]["total_fuel"], 2000.0);
    assert_eq!(value["fuel_estimate_kg"]["segments"][1]["waypoint"], "Kano");
}

#[test]
fn estimate_unknown_aircraft_fails() {
    fixture_command()
        .args(["estimate", "--aircraft", "B747", "--route", "routes.csv"])
        .assert()
        .failure()
        .stderr(contains("aircraft B747 not found"));
}

#[test]
fn estimate_missing_route_fails() {
    fixture_command()
        .args(["estimate", "--aircraft", "A320", "--route", "missing.csv"])
        .assert()
        .failure()
        .stderr(contains("route missing.csv not found"));
}

#[test]
fn optimize_reports_best_route() {
    fixture_command()
        .args([
            "optimize",
            "--aircraft",
            "A320",
            "--route",
            "routes.csv",
            "--route",
            "routes_option_b.csv",
            "--route",
            "routes_option_c.csv",
        ])
        .assert()
        .success()
        .stdout(contains(" - routes.csv: total_fuel_kg = 2350.00"))
        .stdout(contains("Best route: routes_option_b.csv with 2000.00 kg"))
        .stdout(contains("routes.csv: extra_vs_best_kg = 350.00"))
        .stdout(contains("routes_option_c.csv: extra_vs_best_kg = 18375.00"));
}

#[test]
fn optimize_lists_failed_routes_inline() {
    fixture_command()
        .args([
            "optimize",
            "--aircraft",
            "A320",
            "--route",
            "nope.csv",
            "--route",
            "routes.csv",
            "--parallel",
        ])
        .assert()
        .success()
        .stdout(contains(" - nope.csv: ERROR: route nope.csv not found"))
        .stdout(contains("Best route: routes.csv"));
}

#[test]
fn optimize_json_output() {
    let output = fixture_command()
        .args([
            "optimize",
            "--aircraft",
            "A320",
            "--route",
            "routes.csv",
            "--route",
            "routes_option_b.csv",
            "--format",
            "json",
        ])
        .output()
        .expect("run optimize");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["best"]["route_file"], "routes_option_b.csv");
    assert_eq!(value["best_total_fuel"], 2000.0);
    assert_eq!(value["options"][0]["extra_vs_best_kg"], 350.0);
}

#[test]
fn optimize_with_no_usable_route_fails() {
    fixture_command()
        .args([
            "optimize", "--aircraft", "A320", "--route", "a.csv", "--route", "b.csv",
        ])
        .assert()
        .failure()
        .stdout(contains("No route could be evaluated."))
        .stderr(contains("none of the 2 candidate routes"));
}

#[test]
fn optimize_requires_a_route() {
    fixture_command()
        .args(["optimize", "--aircraft", "A320"])
        .assert()
        .failure()
        .stderr(contains("--route"));
}

#[test]
fn missing_aircraft_file_is_reported() {
    let temp: TempDir = tempdir().expect("create temp dir");
    fs::copy(
        fixtures_dir().join("routes.csv"),
        temp.path().join("routes.csv"),
    )
    .expect("copy route fixture");

    cli()
        .arg("--data-dir")
        .arg(temp.path())
        .arg("aircraft")
        .assert()
        .failure()
        .stderr(contains("failed to load aircraft data").and(contains("aircraft.csv")));
}
