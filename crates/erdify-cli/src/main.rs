//! erdify CLI entry point.

use std::{process::ExitCode, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use erdify_cli::{Args, error_adapter::render_report};

/// Parses the `--log-level` value, falling back to `warn`.
fn log_level(value: &str) -> LevelFilter {
    LevelFilter::from_str(value).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {value}. Using 'warn' instead.");
        LevelFilter::Warn
    })
}

fn main() -> ExitCode {
    miette::set_panic_hook();

    let args = Args::parse();
    let log_level = log_level(&args.log_level);
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting erdify");
    debug!(args:?; "Parsed arguments");

    match erdify_cli::run(&args) {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", render_report(&err));
            ExitCode::FAILURE
        }
    }
}
