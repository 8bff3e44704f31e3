//! CLI integration tests for the sprint planner
//!
//! These tests drive the binary end to end: a project is initialized in a
//! temp directory, seeded with developers and items, and then mutated and
//! queried through the board commands.

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command instance for the planner binary
fn planner_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("planner"))
}

/// Create a temporary directory and initialize a planner project
fn setup_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    planner_cmd()
        .arg("init")
        .arg(dir.path())
        .args(["--start", "2025-01-27"])
        .assert()
        .success();
    dir
}

/// Project with two developers and three items
fn seeded_project() -> TempDir {
    let dir = setup_project();
    for (name, id) in [("Joao Silva", "dev1"), ("Maria Oliveira", "dev2")] {
        planner_cmd()
            .current_dir(dir.path())
            .args(["dev", "add", name, "--id", id])
            .assert()
            .success();
    }
    for (title, id, weeks) in [
        ("User Authentication", "proj-1", "4"),
        ("Dashboard", "proj-2", "2"),
        ("Security Audit", "proj-3", "3"),
    ] {
        planner_cmd()
            .current_dir(dir.path())
            .args(["item", "add", title, "--id", id, "--weeks", weeks])
            .assert()
            .success();
    }
    dir
}

fn run_in(dir: &TempDir, args: &[&str]) -> assert_cmd::assert::Assert {
    planner_cmd().current_dir(dir.path()).args(args).assert()
}

fn board_json(dir: &TempDir) -> serde_json::Value {
    let output = run_in(dir, &["--format", "json", "board"])
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).unwrap()
}

fn allocations_of<'a>(board: &'a serde_json::Value, dev: &str) -> &'a Vec<serde_json::Value> {
    board["developers"]
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["id"] == dev)
        .unwrap()["allocations"]
        .as_array()
        .unwrap()
}

// =============================================================================
// Initialization Tests
// =============================================================================

#[test]
fn test_init_creates_structure() {
    let dir = TempDir::new().unwrap();

    planner_cmd()
        .arg("init")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized planner project"))
        .stdout(predicate::str::contains("16 weeks, 8 sprints"));

    assert!(dir.path().join(".planner").is_dir());
    assert!(dir.path().join(".planner/config.toml").is_file());
    assert!(dir.path().join(".planner/catalog.yaml").is_file());
}

#[test]
fn test_init_is_idempotent() {
    let dir = seeded_project();

    planner_cmd().arg("init").arg(dir.path()).assert().success();

    run_in(&dir, &["item", "list"])
        .success()
        .stdout(predicate::str::contains("proj-1"));
}

#[test]
fn test_init_with_custom_grid() {
    let dir = TempDir::new().unwrap();

    planner_cmd()
        .arg("init")
        .arg(dir.path())
        .args(["--weeks", "6", "--sprint-weeks", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6 weeks, 2 sprints"));

    let config = fs::read_to_string(dir.path().join(".planner/config.toml")).unwrap();
    assert!(config.contains("total_weeks = 6"));
}

#[test]
fn test_init_rejects_empty_grid() {
    let dir = TempDir::new().unwrap();

    planner_cmd()
        .arg("init")
        .arg(dir.path())
        .args(["--weeks", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("total_weeks"));

    assert!(!dir.path().join(".planner").exists());
}

#[test]
fn test_command_outside_project_fails() {
    let dir = TempDir::new().unwrap();

    planner_cmd()
        .current_dir(dir.path())
        .arg("board")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not in a planner project"));
}

// =============================================================================
// Catalog Tests
// =============================================================================

#[test]
fn test_dev_add_and_list() {
    let dir = seeded_project();

    run_in(&dir, &["dev", "list"])
        .success()
        .stdout(predicate::str::contains("dev1"))
        .stdout(predicate::str::contains("Maria Oliveira"));
}

#[test]
fn test_dev_add_generates_id() {
    let dir = setup_project();

    run_in(&dir, &["dev", "add", "Pedro Costa"])
        .success()
        .stdout(predicate::str::contains("Added developer: d-"));
}

#[test]
fn test_duplicate_item_id_rejected() {
    let dir = seeded_project();

    run_in(&dir, &["item", "add", "Again", "--id", "proj-1", "-w", "1"])
        .failure()
        .stderr(predicate::str::contains("proj-1"));
}

#[test]
fn test_item_add_rejects_zero_weeks() {
    let dir = setup_project();

    run_in(&dir, &["item", "add", "Nothing", "-w", "0"]).failure();
}

#[test]
fn test_item_list_available_only() {
    let dir = seeded_project();
    run_in(&dir, &["place", "proj-1", "dev1", "0"]).success();

    run_in(&dir, &["item", "list", "--available"])
        .success()
        .stdout(predicate::str::contains("proj-2"))
        .stdout(predicate::str::contains("proj-1").not());
}

// =============================================================================
// Placement Tests
// =============================================================================

#[test]
fn test_place_allocates_item() {
    let dir = seeded_project();

    run_in(&dir, &["place", "proj-2", "dev1", "3"])
        .success()
        .stdout(predicate::str::contains(
            "Allocated proj-2 to dev1 from week 3 (2 weeks)",
        ));

    let board = board_json(&dir);
    let row = allocations_of(&board, "dev1");
    assert_eq!(row.len(), 1);
    assert_eq!(row[0]["item_id"], "proj-2");
    assert_eq!(row[0]["week"], 3);
    assert_eq!(row[0]["span_weeks"], 2);

    let available: Vec<_> = board["available"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(available, vec!["proj-1", "proj-3"]);
}

#[test]
fn test_place_conflict_is_rejected() {
    let dir = seeded_project();
    run_in(&dir, &["place", "proj-1", "dev1", "0"]).success();

    run_in(&dir, &["place", "proj-2", "dev1", "3"])
        .failure()
        .stderr(predicate::str::contains("already taken by proj-1"));

    let board = board_json(&dir);
    assert_eq!(allocations_of(&board, "dev1").len(), 1);
    assert_eq!(board["available"].as_array().unwrap().len(), 2);
}

#[test]
fn test_place_out_of_horizon_is_rejected() {
    let dir = seeded_project();

    run_in(&dir, &["place", "proj-1", "dev1", "14"])
        .failure()
        .stderr(predicate::str::contains("horizon"));

    let board = board_json(&dir);
    assert!(allocations_of(&board, "dev1").is_empty());
}

#[test]
fn test_place_unknown_developer() {
    let dir = seeded_project();

    run_in(&dir, &["place", "proj-1", "ghost", "0"])
        .failure()
        .stderr(predicate::str::contains("Developer not found: ghost"));
}

#[test]
fn test_place_same_item_twice() {
    let dir = seeded_project();
    run_in(&dir, &["place", "proj-2", "dev1", "0"]).success();

    run_in(&dir, &["place", "proj-2", "dev2", "0"])
        .failure()
        .stderr(predicate::str::contains("not available"));
}

#[test]
fn test_move_across_developers() {
    let dir = seeded_project();
    run_in(&dir, &["place", "proj-3", "dev1", "0"]).success();

    run_in(&dir, &["move", "proj-3", "dev2", "5"]).success();

    let board = board_json(&dir);
    assert!(allocations_of(&board, "dev1").is_empty());
    let row = allocations_of(&board, "dev2");
    assert_eq!(row[0]["item_id"], "proj-3");
    assert_eq!(row[0]["week"], 5);
}

#[test]
fn test_move_over_own_footprint() {
    let dir = seeded_project();
    run_in(&dir, &["place", "proj-1", "dev1", "0"]).success();

    run_in(&dir, &["move", "proj-1", "dev1", "2"]).success();

    run_in(&dir, &["free", "dev1", "1"])
        .success()
        .stdout(predicate::str::contains("is free"));
    run_in(&dir, &["free", "dev1", "5"])
        .success()
        .stdout(predicate::str::contains("taken: proj-1"));
}

#[test]
fn test_move_onto_own_anchor_is_noop() {
    let dir = seeded_project();
    run_in(&dir, &["place", "proj-2", "dev1", "4"]).success();
    let before = fs::read_to_string(dir.path().join(".planner/allocations.jsonl")).unwrap();

    run_in(&dir, &["move", "proj-2", "dev1", "4"]).success();

    let after = fs::read_to_string(dir.path().join(".planner/allocations.jsonl")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_move_unallocated_item() {
    let dir = seeded_project();

    run_in(&dir, &["move", "proj-1", "dev1", "0"])
        .failure()
        .stderr(predicate::str::contains("not allocated"));
}

#[test]
fn test_unassign_returns_item_to_end() {
    let dir = seeded_project();
    run_in(&dir, &["place", "proj-1", "dev1", "0"]).success();

    run_in(&dir, &["unassign", "proj-1"])
        .success()
        .stdout(predicate::str::contains("Returned proj-1"));

    let board = board_json(&dir);
    assert!(allocations_of(&board, "dev1").is_empty());
    let available: Vec<_> = board["available"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(available, vec!["proj-2", "proj-3", "proj-1"]);
}

#[test]
fn test_reset_clears_board() {
    let dir = seeded_project();
    run_in(&dir, &["place", "proj-1", "dev1", "0"]).success();
    run_in(&dir, &["place", "proj-3", "dev2", "2"]).success();

    run_in(&dir, &["reset"])
        .success()
        .stdout(predicate::str::contains("2 allocation(s) cleared"));

    let board = board_json(&dir);
    assert!(allocations_of(&board, "dev1").is_empty());
    assert!(allocations_of(&board, "dev2").is_empty());
    let available: Vec<_> = board["available"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(available, vec!["proj-1", "proj-2", "proj-3"]);
}

#[test]
fn test_reset_recovers_after_grid_shrink() {
    let dir = seeded_project();
    run_in(&dir, &["place", "proj-3", "dev1", "10"]).success();

    planner_cmd()
        .arg("init")
        .arg(dir.path())
        .args(["--weeks", "8"])
        .assert()
        .success();
    run_in(&dir, &["board"])
        .failure()
        .stderr(predicate::str::contains("past the 8-week horizon"));

    run_in(&dir, &["reset"])
        .success()
        .stdout(predicate::str::contains("1 allocation(s) cleared"));

    let board = board_json(&dir);
    assert!(allocations_of(&board, "dev1").is_empty());
    assert_eq!(board["available"].as_array().unwrap().len(), 3);
}

#[test]
fn test_reset_recovers_after_item_removed() {
    let dir = seeded_project();
    run_in(&dir, &["place", "proj-3", "dev2", "0"]).success();

    fs::write(
        dir.path().join(".planner/catalog.yaml"),
        r#"developers:
  - id: dev1
    name: Joao Silva
  - id: dev2
    name: Maria Oliveira
items:
  - id: proj-1
    title: User Authentication
    estimated_weeks: 4
  - id: proj-2
    title: Dashboard
    estimated_weeks: 2
"#,
    )
    .unwrap();
    run_in(&dir, &["board"])
        .failure()
        .stderr(predicate::str::contains("Item not found: proj-3"));

    run_in(&dir, &["reset"]).success();

    let board = board_json(&dir);
    assert!(allocations_of(&board, "dev2").is_empty());
    let available: Vec<_> = board["available"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(available, vec!["proj-1", "proj-2"]);
}

#[test]
fn test_verbose_routes_engine_events_to_stderr() {
    let dir = seeded_project();

    planner_cmd()
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .args(["--verbose", "place", "proj-2", "dev1", "0"])
        .assert()
        .success()
        .stderr(predicate::str::contains("placed item"));

    planner_cmd()
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .args(["move", "proj-2", "dev2", "0"])
        .assert()
        .success()
        .stderr(predicate::str::contains("moved item").not());
}

// =============================================================================
// Query Tests
// =============================================================================

#[test]
fn test_board_text_output() {
    let dir = seeded_project();
    run_in(&dir, &["place", "proj-2", "dev2", "1"]).success();

    run_in(&dir, &["board"])
        .success()
        .stdout(predicate::str::contains("Maria Oliveira (dev2)"))
        .stdout(predicate::str::contains("Dashboard"))
        .stdout(predicate::str::contains("Available (2):"));
}

#[test]
fn test_board_filters_by_developer() {
    let dir = seeded_project();

    let output = run_in(&dir, &["--format", "json", "board", "--dev", "dev2"])
        .success()
        .get_output()
        .stdout
        .clone();
    let board: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let developers = board["developers"].as_array().unwrap();
    assert_eq!(developers.len(), 1);
    assert_eq!(developers[0]["id"], "dev2");

    run_in(&dir, &["board", "--dev", "ghost"])
        .failure()
        .stderr(predicate::str::contains("Developer not found"));
}

#[test]
fn test_free_reports_anchor_and_coverage() {
    let dir = seeded_project();
    run_in(&dir, &["place", "proj-3", "dev1", "2"]).success();

    run_in(&dir, &["free", "dev1", "2"])
        .success()
        .stdout(predicate::str::contains("proj-3 starts here"));
    run_in(&dir, &["free", "dev1", "4"])
        .success()
        .stdout(predicate::str::contains("started week 2"));

    let output = run_in(&dir, &["--format", "json", "free", "dev1", "5"])
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["free"], true);
    assert!(json["occupant"].is_null());
}

#[test]
fn test_free_out_of_bounds_week() {
    let dir = seeded_project();

    run_in(&dir, &["free", "dev1", "16"])
        .failure()
        .stderr(predicate::str::contains("outside the 16-week board"));
}

#[test]
fn test_sprints_lists_calendar_weeks() {
    let dir = setup_project();

    run_in(&dir, &["sprints"])
        .success()
        .stdout(predicate::str::contains("Sprint 1"))
        .stdout(predicate::str::contains("27/1 - 2/2"))
        .stdout(predicate::str::contains("Sprint 8"));
}

#[test]
fn test_sprints_json() {
    let dir = setup_project();

    let output = run_in(&dir, &["--format", "json", "sprints"])
        .success()
        .get_output()
        .stdout
        .clone();
    let sprints: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let sprints = sprints.as_array().unwrap();
    assert_eq!(sprints.len(), 8);
    assert_eq!(sprints[0]["weeks"][1]["start"], "2025-02-03");
}
