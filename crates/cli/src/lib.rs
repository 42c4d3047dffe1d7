//! # tspart CLI
//!
//! Command-line interface for tspart.
//!
//! This crate parses the command line and runs the generator. It never
//! writes to stdout itself: [`execute`] returns the text the binary prints,
//! so a failed invocation emits no partial migration.
//!
//! ## Commands
//!
//! - `create` - Print the create (up) migration for a year of partitions
//! - `drop` - Print the drop (down) migration for a year of partitions
//! - `write` - Write a numbered up/down migration pair into a directory
//! - `buckets` - Print the bucket sequence of a year as JSON
//!

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::str::FromStr;
use tspart_codegen::{Generator, GeneratorConfig, summarize};
use tspart_core::{Granularity, PartitionSpec, PartitionTarget, Validatable, parse_year};

// Re-export dependencies for downstream users
pub use tspart_codegen;
pub use tspart_core;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Arguments
// ============================================================================

/// Generate time-range partition migrations for inheritance-partitioned tables
#[derive(Debug, Parser)]
#[command(name = "tspart", version = VERSION, about, long_about = None)]
pub struct Cli {
    /// Generator config file (TOML)
    #[arg(long, global = true, env = "TSPART_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug); logs go to stderr
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the create (up) migration: child tables, indexes, insert router
    Create {
        #[command(flatten)]
        target: TargetArgs,

        /// Index columns; the last one is the timestamp column
        #[arg(required = true, value_name = "COLUMNS")]
        columns: Vec<String>,
    },

    /// Print the drop (down) migration for a year of partitions
    Drop {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Write a numbered up/down migration pair into a directory
    Write {
        #[command(flatten)]
        target: TargetArgs,

        /// Index columns; the last one is the timestamp column
        #[arg(required = true, value_name = "COLUMNS")]
        columns: Vec<String>,

        /// Output directory (overrides the config file)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Migration number (default: one past the highest in the directory)
        #[arg(long)]
        index: Option<u32>,

        /// Overwrite existing migration files
        #[arg(long)]
        force: bool,
    },

    /// Print the bucket sequence of a year as JSON
    Buckets {
        #[command(flatten)]
        target: TargetArgs,
    },
}

/// Positional `(table, year)` plus the granularity flag
#[derive(Debug, Clone, Args)]
pub struct TargetArgs {
    /// Parent table name, e.g. ts_checks
    pub table: String,

    /// Calendar year, e.g. 2016
    #[arg(value_parser = parse_year)]
    pub year: i32,

    /// Bucket width
    #[arg(
        short,
        long,
        default_value_t = Granularity::Daily,
        value_parser = Granularity::from_str
    )]
    pub granularity: Granularity,
}

impl TargetArgs {
    /// Convert to a partition target
    pub fn to_target(&self) -> PartitionTarget {
        PartitionTarget::new(&self.table, self.year, self.granularity)
    }
}

// ============================================================================
// Execution
// ============================================================================

/// Result of a command: text for stdout and an optional report for stderr
#[derive(Debug, Clone, Default)]
pub struct Outcome {
    /// Migration document or JSON, printed verbatim
    pub stdout: String,
    /// Human-readable report
    pub report: Option<String>,
}

impl Outcome {
    fn document(stdout: String) -> Self {
        Self {
            stdout,
            report: None,
        }
    }
}

/// Default log filter for a `-v` count
pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Run the parsed command line.
pub fn execute(cli: &Cli) -> Result<Outcome> {
    let config = GeneratorConfig::load_or_default(cli.config.as_deref())
        .context("failed to load generator config")?;

    match &cli.command {
        Command::Create { target, columns } => {
            let spec = build_spec(target, columns)?;
            let doc = Generator::new(config).generate_create(&spec)?;
            Ok(Outcome::document(doc.content))
        }

        Command::Drop { target } => {
            let doc = Generator::new(config).generate_drop(&target.to_target())?;
            Ok(Outcome::document(doc.content))
        }

        Command::Write {
            target,
            columns,
            dir,
            index,
            force,
        } => {
            let spec = build_spec(target, columns)?;

            let mut config = config;
            if let Some(dir) = dir {
                config = config.with_output_dir(dir);
            }
            if *force {
                config = config.allow_overwrite();
            }

            let (pair, written) = Generator::new(config)
                .generate_and_write(&spec, *index)
                .context("failed to write migration pair")?;

            let stdout: String = written
                .iter()
                .map(|p| format!("{}\n", p.display()))
                .collect();

            let mut report = summarize(&pair).display();
            for path in &written {
                report.push_str(&format!("{} {}\n", "wrote".green().bold(), path.display()));
            }

            Ok(Outcome {
                stdout,
                report: Some(report),
            })
        }

        Command::Buckets { target } => {
            let target = target.to_target();
            target.validate()?;

            let buckets: Vec<_> = target.buckets().collect();
            let mut json = serde_json::to_string_pretty(&buckets)
                .context("failed to serialize buckets")?;
            json.push('\n');
            Ok(Outcome::document(json))
        }
    }
}

fn build_spec(target: &TargetArgs, columns: &[String]) -> Result<PartitionSpec> {
    let spec = PartitionSpec::from_columns(target.to_target(), columns.iter().cloned())?;
    spec.validate()?;
    tracing::debug!(?spec, "parsed partition spec");
    Ok(spec)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tspart").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version() {
        let version = Cli::command().render_version();
        assert_eq!(version.trim(), format!("tspart {VERSION}"));
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0), "warn");
        assert_eq!(log_level(1), "info");
        assert_eq!(log_level(4), "debug");
    }

    #[test]
    fn test_parse_create_positionals() {
        let cli = parse(&["create", "ts_checks", "2016", "check_id", "created"]);
        match cli.command {
            Command::Create { target, columns } => {
                assert_eq!(target.table, "ts_checks");
                assert_eq!(target.year, 2016);
                assert_eq!(target.granularity, Granularity::Daily);
                assert_eq!(columns, vec!["check_id", "created"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_granularity_flag() {
        let cli = parse(&["drop", "ts_metrics", "2016", "--granularity", "monthly"]);
        match cli.command {
            Command::Drop { target } => assert_eq!(target.granularity, Granularity::Monthly),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_year_is_rejected() {
        let err = Cli::try_parse_from(["tspart", "create", "ts_checks", "20x6", "created"])
            .unwrap_err();
        assert!(err.to_string().contains("20x6"));
    }

    #[test]
    fn test_missing_columns_are_rejected() {
        assert!(Cli::try_parse_from(["tspart", "create", "ts_checks", "2016"]).is_err());
    }

    #[test]
    fn test_execute_create() {
        let cli = parse(&["create", "ts_checks", "2016", "check_id", "created"]);
        let outcome = execute(&cli).unwrap();

        assert!(outcome.report.is_none());
        assert!(outcome.stdout.starts_with("create table ts_checks_2016_01_01 "));
        assert!(outcome.stdout.ends_with("execute procedure on_ts_checks_insert_2016();\n"));
    }

    #[test]
    fn test_execute_drop() {
        let cli = parse(&["drop", "ts_checks", "2016"]);
        let outcome = execute(&cli).unwrap();

        let drops = outcome
            .stdout
            .lines()
            .filter(|l| l.starts_with("DROP TABLE IF EXISTS "))
            .count();
        assert_eq!(drops, 366);
    }

    #[test]
    fn test_execute_buckets_json() {
        let cli = parse(&["buckets", "ts_metrics", "2017", "-g", "monthly"]);
        let outcome = execute(&cli).unwrap();

        let buckets: serde_json::Value = serde_json::from_str(&outcome.stdout).unwrap();
        let buckets = buckets.as_array().unwrap();
        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets[0]["suffix"], "ts_metrics_m1_2017");
        assert_eq!(buckets[11]["end"], "2018-01-01T00:00:00");
    }

    #[test]
    fn test_execute_write() {
        let dir = tempfile::tempdir().unwrap();
        let dir_arg = dir.path().to_str().unwrap();
        let cli = parse(&[
            "write", "ts_checks", "2016", "check_id", "created", "--dir", dir_arg, "--index", "32",
        ]);

        let outcome = execute(&cli).unwrap();

        assert_eq!(outcome.stdout.lines().count(), 2);
        assert!(outcome.report.unwrap().contains("ts_checks"));
        assert!(dir.path().join("0032_add-ts-checks-2016.up.sql").exists());
        assert!(dir.path().join("0032_add-ts-checks-2016.down.sql").exists());
    }

    #[test]
    fn test_execute_write_refuses_existing_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let dir_arg = dir.path().to_str().unwrap();
        let args = [
            "write", "ts_logs", "2017", "created", "--dir", dir_arg, "--index", "27",
        ];

        execute(&parse(&args)).unwrap();
        assert!(execute(&parse(&args)).is_err());

        let mut forced = args.to_vec();
        forced.push("--force");
        assert!(execute(&parse(&forced)).is_ok());
    }

    #[test]
    fn test_execute_with_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("tspart.toml");
        std::fs::write(&config_path, "log_table = \"ts_executor_logs\"\n").unwrap();

        let cli = parse(&[
            "--config",
            config_path.to_str().unwrap(),
            "create",
            "ts_executor_logs",
            "2017",
            "created",
        ]);
        let outcome = execute(&cli).unwrap();

        assert!(outcome.stdout.contains(" using gin ("));
    }

    #[test]
    fn test_execute_with_broken_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("tspart.toml");
        std::fs::write(&config_path, "not = [valid").unwrap();

        let cli = parse(&[
            "--config",
            config_path.to_str().unwrap(),
            "drop",
            "ts_checks",
            "2016",
        ]);
        assert!(execute(&cli).is_err());
    }
}
