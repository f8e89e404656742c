//! Sequential batch execution over a cases root.
//!
//! One container lifecycle completes before the next begins; there is no
//! shared writable state between runs, so no locking is needed. The batch
//! never stops on a failing case — failures surface in the per-case report.

use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use gradebox_common::error::{GradeboxError, Result};
use gradebox_common::types::CaseName;

use crate::runner::{CaseOutcome, RunOutcome, Runner};

/// Per-case outcomes of one batch invocation.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Outcomes in the order the cases were run.
    pub outcomes: Vec<CaseOutcome>,
}

impl BatchReport {
    /// Returns whether every case completed with exit code 0.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.outcome.passed())
    }

    /// Number of failing or erroring cases.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.outcome.passed()).count()
    }
}

/// Enumerates the test cases under a cases root.
///
/// Every immediate subdirectory is a case; plain files are ignored. The
/// order is whatever the filesystem enumeration yields — no extra sorting,
/// matching the log-stream consumption pattern.
///
/// # Errors
///
/// Returns an error if the cases root cannot be read or a directory name
/// is not a valid case name.
pub fn list_cases(cases_root: &Path) -> Result<Vec<CaseName>> {
    let entries = std::fs::read_dir(cases_root).map_err(|e| GradeboxError::io(cases_root, e))?;
    let mut cases = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| GradeboxError::io(cases_root, e))?;
        if entry.path().is_dir() {
            cases.push(CaseName::new(entry.file_name().to_string_lossy())?);
        }
    }
    Ok(cases)
}

/// Runs every case under the runner's cases root, strictly sequentially.
///
/// A delimiter line naming the case is printed before each invocation so
/// failures are attributable in aggregated output. A case that fails or
/// cannot be run never stops the batch. Setting `cancel` stops the batch
/// before the next case begins; the case in flight runs to completion.
///
/// # Errors
///
/// Returns an error only if the cases root itself cannot be enumerated.
pub fn run_all(runner: &Runner, cancel: &AtomicBool) -> Result<BatchReport> {
    let cases = list_cases(&runner.config().cases_dir)?;
    tracing::info!(count = cases.len(), "starting batch run");

    let mut report = BatchReport::default();
    for name in cases {
        if cancel.load(Ordering::SeqCst) {
            tracing::warn!(case = %name, "batch cancelled before case");
            break;
        }

        println!("==== {name} ====");
        // Flush so the delimiter lands before the container's inherited output.
        let _ = std::io::stdout().flush();

        let outcome = match runner.run_case(&name) {
            Ok(outcome) => outcome,
            Err(err) => CaseOutcome {
                case: name.clone(),
                outcome: RunOutcome::Error(err.to_string()),
                duration: Duration::ZERO,
            },
        };
        report.outcomes.push(outcome);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_cases_ignores_plain_files() {
        let root = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(root.path().join("basic")).expect("mkdir");
        std::fs::create_dir(root.path().join("broken")).expect("mkdir");
        std::fs::write(root.path().join("README.md"), "notes").expect("write file");

        let cases = list_cases(root.path()).expect("list succeeds");
        assert_eq!(cases.len(), 2);
        assert!(cases.iter().all(|c| c.as_str() != "README.md"));
    }

    #[test]
    fn list_cases_missing_root_is_an_error() {
        assert!(list_cases(Path::new("/nonexistent/cases")).is_err());
    }

    #[test]
    fn empty_report_counts_as_all_passed() {
        let report = BatchReport::default();
        assert!(report.all_passed());
        assert_eq!(report.failures(), 0);
    }
}
