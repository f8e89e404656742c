//! `gbx doctor` — Report container runtime availability.

use clap::Args;

use gradebox_common::config::HarnessConfig;
use gradebox_runtime::backend;

use crate::output::{BOLD, GREEN, RED, RESET};

/// Arguments for the `doctor` command.
#[derive(Args, Debug)]
pub struct DoctorArgs {}

/// Executes the `doctor` command.
///
/// # Errors
///
/// Currently infallible; reports findings and exits 0.
pub fn execute(_args: &DoctorArgs, config: &HarnessConfig) -> anyhow::Result<i32> {
    let info = backend::runtime_info(&config.runtime_bin);
    match &info.resolved {
        Some(path) => {
            eprintln!(
                "  {GREEN}●{RESET} runtime {BOLD}{}{RESET} found at {}",
                info.binary,
                path.display()
            );
        }
        None => {
            eprintln!(
                "  {RED}●{RESET} runtime {BOLD}{}{RESET} not found on PATH",
                info.binary
            );
        }
    }

    if config.cases_dir.is_dir() {
        eprintln!("  {GREEN}●{RESET} cases root: {}", config.cases_dir.display());
    } else {
        eprintln!(
            "  {RED}●{RESET} cases root missing: {}",
            config.cases_dir.display()
        );
    }
    eprintln!("  image: {}", config.image);
    Ok(0)
}
