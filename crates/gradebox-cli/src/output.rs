//! Formatted output helpers for CLI commands.

use std::time::Duration;

use gradebox_runtime::runner::{CaseOutcome, RunOutcome};

pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const GREEN: &str = "\x1b[32m";
pub const RED: &str = "\x1b[31m";
pub const YELLOW: &str = "\x1b[33m";
pub const RESET: &str = "\x1b[0m";

/// Formats a wall-clock duration as seconds with one decimal.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    format!("{:.1}s", duration.as_secs_f64())
}

/// Renders one case outcome as a report line.
#[must_use]
pub fn outcome_line(outcome: &CaseOutcome) -> String {
    match &outcome.outcome {
        RunOutcome::Exited(0) => format!(
            "{GREEN}PASS{RESET} {} {DIM}({}){RESET}",
            outcome.case,
            format_duration(outcome.duration)
        ),
        RunOutcome::Exited(code) => format!(
            "{RED}FAIL{RESET} {} {DIM}(exit {code}, {}){RESET}",
            outcome.case,
            format_duration(outcome.duration)
        ),
        RunOutcome::Error(message) => {
            format!("{YELLOW}ERROR{RESET} {}: {message}", outcome.case)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebox_common::types::CaseName;

    fn outcome(case: &str, run: RunOutcome) -> CaseOutcome {
        CaseOutcome {
            case: CaseName::new(case).expect("valid case name"),
            outcome: run,
            duration: Duration::from_millis(1500),
        }
    }

    #[test]
    fn format_duration_rounds_to_tenths() {
        assert_eq!(format_duration(Duration::from_millis(1540)), "1.5s");
        assert_eq!(format_duration(Duration::ZERO), "0.0s");
    }

    #[test]
    fn passing_outcome_renders_pass() {
        let line = outcome_line(&outcome("basic", RunOutcome::Exited(0)));
        assert!(line.contains("PASS"));
        assert!(line.contains("basic"));
    }

    #[test]
    fn failing_outcome_includes_exit_code() {
        let line = outcome_line(&outcome("broken", RunOutcome::Exited(1)));
        assert!(line.contains("FAIL"));
        assert!(line.contains("exit 1"));
    }

    #[test]
    fn error_outcome_includes_message() {
        let line = outcome_line(&outcome("bad", RunOutcome::Error("no submission".into())));
        assert!(line.contains("ERROR"));
        assert!(line.contains("no submission"));
    }
}
