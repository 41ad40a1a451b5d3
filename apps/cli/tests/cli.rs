//! Integration tests for the `dieta` binary.
//!
//! Each test gets its own database file in a temp directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn cli(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("dieta"));
    cmd.arg("--db")
        .arg(dir.path().join("dieta.db"))
        .env_remove("DIETA_DB_PATH")
        .env("RUST_LOG", "warn");
    cmd
}

/// Runs a successful command and parses its stdout envelope.
fn run_ok(dir: &TempDir, args: &[&str]) -> Value {
    let output = cli(dir).args(args).assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout is a JSON envelope")
}

#[test]
fn test_cli_help() {
    Command::new(assert_cmd::cargo::cargo_bin!("dieta"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Manage diets, meals and exercises"));
}

#[test]
fn test_diet_meal_cascade() {
    let dir = setup_test_dir();

    let diet = run_ok(&dir, &["diet", "create", r#"{"goal": "perder peso"}"#]);
    assert_eq!(diet["message"], "Diet created");
    assert_eq!(diet["data"]["meal_count"], 0);
    let diet_id = diet["data"]["id"].as_i64().unwrap();
    let diet_arg = diet_id.to_string();

    let payload = format!(
        r#"{{"meal_type": "almoço", "quantity": 300, "foods": ["arroz"], "diet_id": {diet_id}}}"#
    );
    let meal = run_ok(&dir, &["meal", "create", payload.as_str()]);
    let meal_id = meal["data"]["id"].as_i64().unwrap().to_string();

    let listed = run_ok(&dir, &["meal", "list", "--diet", diet_arg.as_str()]);
    assert_eq!(listed["count"], 1);

    run_ok(&dir, &["diet", "delete", diet_arg.as_str()]);

    cli(&dir)
        .args(["meal", "get", meal_id.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NOT_FOUND"));
}

#[test]
fn test_validation_failure_exits_nonzero() {
    let dir = setup_test_dir();

    cli(&dir)
        .args([
            "exercise",
            "create",
            r#"{"exercise_type": "agachamento", "repetition_count": 10, "cycle_count": -3, "rest_between_cycles": 30}"#,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"field\": \"cycle_count\""));

    let listed = run_ok(&dir, &["exercise", "list"]);
    assert_eq!(listed["count"], 0);
}

#[test]
fn test_food_editing() {
    let dir = setup_test_dir();

    let meal = run_ok(
        &dir,
        &["meal", "create", r#"{"meal_type": "lanche", "quantity": 1, "foods": "banana"}"#],
    );
    let id = meal["data"]["id"].as_i64().unwrap().to_string();

    let added = run_ok(&dir, &["meal", "add-food", id.as_str(), "aveia"]);
    assert_eq!(added["data"]["foods"], serde_json::json!(["banana", "aveia"]));

    let removed = run_ok(&dir, &["meal", "remove-food", id.as_str(), "banana"]);
    assert_eq!(removed["data"]["foods"], serde_json::json!(["aveia"]));

    cli(&dir)
        .args(["meal", "remove-food", id.as_str(), "aveia"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"field\": \"foods\""));
}

#[test]
fn test_db_path_from_env() {
    let dir = setup_test_dir();
    let db_path = dir.path().join("from-env.db");

    Command::new(assert_cmd::cargo::cargo_bin!("dieta"))
        .env("DIETA_DB_PATH", &db_path)
        .env("RUST_LOG", "warn")
        .arg("health")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"healthy\": true"));

    assert!(db_path.exists());
}

#[test]
fn test_invalid_pool_size_fails_startup() {
    let dir = setup_test_dir();

    cli(&dir)
        .env("DIETA_DB_MAX_CONNECTIONS", "none")
        .arg("health")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DIETA_DB_MAX_CONNECTIONS"));
}
