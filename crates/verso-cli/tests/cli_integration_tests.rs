//! CLI integration tests
//!
//! Each test drives the `verso` binary against a ledger in a temporary
//! directory and checks stdout, stderr and the exit status.

use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn verso(db_path: &Path, args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_verso");
    Command::new(cli_bin)
        .args(args)
        .args(["--db", db_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn ledger_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("nested").join("ledger.db")
}

#[test]
fn test_init_creates_database_and_tables() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = ledger_path(&temp_dir);

    let output = verso(&db_path, &["init"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("jv_commit"));
    assert!(db_path.exists());

    let conn = Connection::open(&db_path).unwrap();
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name LIKE 'jv_%'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 3);
}

#[test]
fn test_head_on_empty_ledger_prints_none() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = ledger_path(&temp_dir);
    assert!(verso(&db_path, &["init"]).status.success());

    let output = verso(&db_path, &["head"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "(none)");
}

#[test]
fn test_commit_then_head_and_show() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = ledger_path(&temp_dir);

    let output = verso(
        &db_path,
        &[
            "commit",
            "--author",
            "alice",
            "--id",
            "12.01",
            "--date",
            "2024-05-01T09:30:00",
            "--prop",
            "branch=main",
            "--prop",
            "ticket=JV-42",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Committed 12.01"));

    let output = verso(&db_path, &["commit", "--author", "bob", "--id", "3"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let output = verso(&db_path, &["head"]);
    assert_eq!(stdout(&output).trim(), "12.01");

    let output = verso(&db_path, &["show", "12.01"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("author: alice"));
    assert!(text.contains("2024-05-01 09:30:00"));
    assert!(text.contains("  branch = main"));
    assert!(text.contains("  ticket = JV-42"));
}

#[test]
fn test_duplicate_commit_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = ledger_path(&temp_dir);

    let first = verso(&db_path, &["commit", "--author", "alice", "--id", "7"]);
    assert!(first.status.success(), "stderr: {}", stderr(&first));

    let second = verso(&db_path, &["commit", "--author", "bob", "--id", "7.00"]);
    assert_eq!(second.status.code(), Some(1));
    assert!(stderr(&second).contains("ERR_DUPLICATE_COMMIT"));

    let conn = Connection::open(&db_path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM jv_commit", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_read_commands_leave_missing_ledger_absent() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = ledger_path(&temp_dir);

    for args in [&["head"][..], &["show", "1"][..], &["log"][..]] {
        let output = verso(&db_path, args);
        assert_eq!(output.status.code(), Some(1), "args: {:?}", args);
        assert!(stderr(&output).contains("ERR_NOT_FOUND"));
    }
    assert!(!db_path.exists());
    assert!(!temp_dir.path().join("nested").exists());
}

#[test]
fn test_show_unknown_commit_reports_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = ledger_path(&temp_dir);
    assert!(verso(&db_path, &["init"]).status.success());

    let output = verso(&db_path, &["show", "99"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ERR_NOT_FOUND"));
}

#[test]
fn test_invalid_commit_id_is_rejected_by_argument_parser() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = ledger_path(&temp_dir);

    let output = verso(&db_path, &["commit", "--author", "alice", "--id", "-1"]);
    assert!(!output.status.success());
    assert!(!db_path.exists());
}

#[test]
fn test_log_lists_highest_first_with_limit() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = ledger_path(&temp_dir);

    for id in ["1", "10", "2"] {
        let output = verso(&db_path, &["commit", "--author", "alice", "--id", id]);
        assert!(output.status.success(), "stderr: {}", stderr(&output));
    }

    let output = verso(&db_path, &["log"]);
    let ids: Vec<String> = stdout(&output)
        .lines()
        .map(|line| line.split('\t').next().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["10", "2", "1"]);

    let output = verso(&db_path, &["log", "--limit", "1", "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("\"commit_id\": \"10\""));
    assert!(!text.contains("\"commit_id\": \"2\""));
}

#[test]
fn test_config_file_supplies_table_prefix() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = ledger_path(&temp_dir);
    let config_path = temp_dir.path().join("verso.toml");
    fs::write(&config_path, "table_prefix = \"hist_\"\n").unwrap();

    let output = verso(
        &db_path,
        &[
            "--config",
            config_path.to_str().unwrap(),
            "commit",
            "--author",
            "alice",
            "--id",
            "4",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let conn = Connection::open(&db_path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM hist_commit", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}
