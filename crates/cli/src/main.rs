//! tspart
//!
//! Time-range partition migration generator for inheritance-partitioned
//! PostgreSQL tables.
//!
//! Migration text goes to stdout; logs and reports go to stderr.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tspart_cli::{Cli, execute, log_level};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(cli.verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match execute(&cli) {
        Ok(outcome) => {
            if let Some(report) = outcome.report {
                eprint!("{report}");
            }
            print!("{}", outcome.stdout);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
