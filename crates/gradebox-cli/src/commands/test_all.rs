//! `gbx test-all` — Run every test case and report per-case outcomes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Args;

use gradebox_common::config::HarnessConfig;
use gradebox_runtime::batch;
use gradebox_runtime::runner::Runner;

use crate::output::{DIM, RESET, outcome_line};

/// Arguments for the `test-all` command.
#[derive(Args, Debug)]
pub struct TestAllArgs {}

/// Executes the `test-all` command.
///
/// Cases run strictly sequentially; a failing case never stops the batch,
/// and the command always exits 0 — failures surface only in the per-case
/// report.
///
/// # Errors
///
/// Returns an error only if the cases root cannot be enumerated.
pub fn execute(_args: &TestAllArgs, config: HarnessConfig) -> anyhow::Result<i32> {
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {e}"))?;

    let runner = Runner::new(config);
    let report = batch::run_all(&runner, &cancel)?;

    eprintln!();
    for outcome in &report.outcomes {
        eprintln!("{}", outcome_line(outcome));
    }
    eprintln!(
        "{DIM}{} case(s), {} failure(s){RESET}",
        report.outcomes.len(),
        report.failures()
    );
    if cancel.load(Ordering::SeqCst) {
        eprintln!("{DIM}batch interrupted{RESET}");
    }
    Ok(0)
}
