//! End-to-end tests for the `tspart` binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn tspart() -> Command {
    let mut cmd = Command::cargo_bin("tspart").unwrap();
    cmd.env_remove("TSPART_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

fn count_prefixed(text: &str, prefix: &str) -> usize {
    text.lines().filter(|l| l.starts_with(prefix)).count()
}

#[test]
fn test_create_leap_year_daily() {
    let out = stdout_of(tspart().args(["create", "ts_checks", "2016", "check_id", "created"]));

    assert_eq!(count_prefixed(&out, "create table ts_checks_2016_"), 366);
    assert_eq!(count_prefixed(&out, "create index idx_ts_checks_2016_"), 366);
    assert_eq!(count_prefixed(&out, "    if ("), 1);
    assert_eq!(count_prefixed(&out, "    elsif ("), 365);
    assert_eq!(count_prefixed(&out, "create trigger "), 1);
    assert!(out.contains("create table ts_checks_2016_02_29 "));
}

#[test]
fn test_create_log_table_uses_fulltext_indexes() {
    let out = stdout_of(tspart().args(["create", "ts_logs", "2017", "created"]));

    assert_eq!(count_prefixed(&out, "create table ts_logs_2017_"), 365);
    assert_eq!(count_prefixed(&out, "create index "), 365);
    assert_eq!(out.matches(" using gin (").count(), 365);
    assert!(!out.contains(" using brin "));
    assert!(!out.contains("ts_logs_2017_02_29"));
}

#[test]
fn test_drop_statement_counts() {
    let out = stdout_of(tspart().args(["drop", "ts_checks", "2016"]));

    assert_eq!(count_prefixed(&out, "DROP TABLE IF EXISTS ts_checks_2016_"), 366);
    assert_eq!(
        count_prefixed(&out, "DROP FUNCTION IF EXISTS on_ts_checks_insert_2016() CASCADE;"),
        1
    );
}

#[test]
fn test_output_is_deterministic() {
    let args = ["create", "ts_metrics", "2016", "cluster", "created", "-g", "monthly"];
    let first = stdout_of(tspart().args(args));
    let second = stdout_of(tspart().args(args));
    assert_eq!(first, second);
}

#[test]
fn test_non_numeric_year_fails_without_output() {
    tspart()
        .args(["create", "ts_checks", "20x6", "created"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("20x6"));
}

#[test]
fn test_out_of_range_year_fails() {
    tspart()
        .args(["drop", "ts_checks", "0"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_missing_columns_fail() {
    tspart()
        .args(["create", "ts_checks", "2016"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_empty_column_fails() {
    tspart()
        .args(["create", "ts_checks", "2016", "check_id", ""])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_buckets_json() {
    let out = stdout_of(tspart().args(["buckets", "ts_checks", "2017"]));

    let buckets: serde_json::Value = serde_json::from_str(&out).unwrap();
    let buckets = buckets.as_array().unwrap();
    assert_eq!(buckets.len(), 365);
    assert_eq!(buckets[0]["suffix"], "ts_checks_2017_01_01");
    assert_eq!(buckets[364]["end"], "2018-01-01T00:00:00");
}

#[test]
fn test_write_numbers_after_existing_migrations() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("0031_add-ts-logs-2016.up.sql"), "").unwrap();

    tspart()
        .args(["write", "ts_checks", "2016", "check_id", "created", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0032_add-ts-checks-2016.up.sql"))
        .stderr(predicate::str::contains("ts_checks"));

    let up = std::fs::read_to_string(dir.path().join("0032_add-ts-checks-2016.up.sql")).unwrap();
    let down =
        std::fs::read_to_string(dir.path().join("0032_add-ts-checks-2016.down.sql")).unwrap();
    assert!(up.starts_with("create table ts_checks_2016_01_01 "));
    assert!(down.starts_with("DROP TABLE IF EXISTS ts_checks_2016_01_01 CASCADE;"));
}

#[test]
fn test_write_refuses_existing_files() {
    let dir = tempfile::tempdir().unwrap();
    let up = dir.path().join("0005_add-ts-checks-2016.up.sql");
    std::fs::write(&up, "keep").unwrap();

    tspart()
        .args(["write", "ts_checks", "2016", "created", "--index", "5", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());

    assert_eq!(std::fs::read_to_string(&up).unwrap(), "keep");
}

#[test]
fn test_write_rejects_timestamp_numbered_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("20240101120000_init.up.sql"), "").unwrap();

    tspart()
        .args(["write", "ts_checks", "2016", "created", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("20240101120000_init.up.sql"));

    assert!(!dir.path().join("0001_add-ts-checks-2016.up.sql").exists());
}

#[test]
fn test_config_file_changes_log_table() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("tspart.toml");
    std::fs::write(
        &config,
        "log_table = \"ts_executor_logs\"\ncluster_id_column = \"tenant_id\"\n",
    )
    .unwrap();

    let out = stdout_of(
        tspart()
            .arg("--config")
            .arg(&config)
            .args(["create", "ts_executor_logs", "2016", "created"]),
    );
    assert_eq!(out.matches(" using gin (tenant_id,").count(), 366);

    let checks = stdout_of(
        tspart()
            .env("TSPART_CONFIG", &config)
            .args(["create", "ts_logs", "2016", "created"]),
    );
    assert!(checks.contains(" using brin (tenant_id,created);"));
}

#[test]
fn test_unknown_config_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("tspart.toml");
    std::fs::write(&config, "log_tabel = \"x\"\n").unwrap();

    tspart()
        .arg("--config")
        .arg(&config)
        .args(["drop", "ts_checks", "2016"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}
