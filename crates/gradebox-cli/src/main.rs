//! # gbx — Gradebox CLI
//!
//! Builds an autograder image and exercises it against fixture test
//! cases. The process exit code mirrors the grading container's exit
//! code, so the binary composes with shell tooling the same way the
//! original wrappers did.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

mod commands;
mod output;

use clap::Parser;
use clap::error::ErrorKind;

use crate::commands::Cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            // Usage errors exit 1, not clap's default 2. Nothing has been
            // launched at this point.
            let _ = err.print();
            std::process::exit(1);
        }
    };

    match commands::execute(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(1);
        }
    }
}
