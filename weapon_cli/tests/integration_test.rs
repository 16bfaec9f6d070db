//! Integration test: drive the weapon-calc binary through a save / resolve / reload session

use std::path::Path;
use std::process::{Command, Output};

fn run(store: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_weapon-calc"))
        .arg("--store")
        .arg(store)
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to run weapon-calc")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "weapon-calc failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_resolve_then_show_current() {
    let store = tempfile::tempdir().expect("Failed to create store dir");

    let resolved = stdout(&run(
        store.path(),
        &[
            "resolve",
            "--weapon",
            "2",
            "--attachment",
            "muzzle_choke",
            "--scroll",
            "scroll_pellets",
            "--json",
        ],
    ));
    let doc: serde_json::Value = serde_json::from_str(&resolved).expect("resolve output is not JSON");

    // Shotgun 9 + 1 (choke), then 5 per pellet over 8 pellets
    let damage = doc["stats"]
        .as_array()
        .expect("stats missing")
        .iter()
        .find(|s| s["stat"] == "Damage")
        .expect("Damage missing");
    assert_eq!(damage["modifiedValue"], 50.0);
    assert_eq!(doc["totalDamage"], 400.0);

    let current = stdout(&run(store.path(), &["current", "show", "--json"]));
    let current: serde_json::Value = serde_json::from_str(&current).expect("current output is not JSON");
    assert_eq!(current["build"]["scroll"], "scroll_pellets");
    assert_eq!(current["stats"], doc["stats"]);

    stdout(&run(store.path(), &["current", "clear"]));
    let cleared = stdout(&run(store.path(), &["current", "show"]));
    assert!(cleared.contains("No current build"));
}

#[test]
fn test_saved_builds_survive_between_runs() {
    let store = tempfile::tempdir().expect("Failed to create store dir");

    stdout(&run(
        store.path(),
        &["builds", "save", "crank", "--weapon", "3", "--attachment", "chamber_gun_crank"],
    ));

    let listing = stdout(&run(store.path(), &["builds", "list"]));
    assert!(listing.contains("crank"));
    assert!(listing.contains("Hunting Rifle"));

    let shown = stdout(&run(store.path(), &["builds", "show", "crank"]));
    assert!(shown.contains("Hunting Rifle"));
    // 60 RPM + 25%
    assert!(shown.contains("75"));

    stdout(&run(store.path(), &["builds", "delete", "crank"]));
    let missing = run(store.path(), &["builds", "show", "crank"]);
    assert!(!missing.status.success());
}

#[test]
fn test_rule_violation_fails() {
    let store = tempfile::tempdir().expect("Failed to create store dir");
    let output = run(
        store.path(),
        &[
            "resolve",
            "--weapon",
            "1",
            "--oil",
            "oil_heavy",
            "--oil",
            "oil_heavy",
        ],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already selected"));
}
