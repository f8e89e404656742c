//! System-wide constants and default paths.
//!
//! The in-container paths are a fixed contract with the external grading
//! platform this harness emulates and must not change.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Root of the grading tree inside the container.
pub const AUTOGRADER_ROOT: &str = "/autograder";

/// In-container location of the grader payload.
pub const SOURCE_DIR: &str = "/autograder/source";

/// In-container location of the student submission.
pub const SUBMISSION_DIR: &str = "/autograder/submission";

/// In-container location where grading results are written.
pub const RESULTS_DIR: &str = "/autograder/results";

/// Entry-point executable invoked automatically on container start.
pub const ENTRYPOINT: &str = "/autograder/run_autograder";

/// Name of the entry-point file inside the grader payload.
pub const ENTRYPOINT_FILE: &str = "run_autograder";

/// Subdirectory of a test case holding the fixture submission.
pub const CASE_SUBMISSION_SUBDIR: &str = "submission";

/// Subdirectory of a test case holding an alternate grader payload.
pub const CASE_GRADER_SUBDIR: &str = "grader";

/// Subdirectory of a test case that captures `/autograder/results` output.
pub const CASE_RESULTS_SUBDIR: &str = "results";

/// Default directory of test-case fixtures, relative to the invocation dir.
pub const DEFAULT_CASES_DIR: &str = "cases";

/// Default tag applied to the built autograder image.
pub const DEFAULT_IMAGE_TAG: &str = "gradebox/autograder:latest";

/// Default base image for rendered Dockerfiles.
pub const DEFAULT_BASE_IMAGE: &str = "ubuntu:22.04";

/// Default container runtime binary.
pub const DEFAULT_RUNTIME_BIN: &str = "docker";

/// Unprivileged account the grading process runs as.
pub const STUDENT_USER: &str = "student";

/// Fixed uid of the unprivileged account.
pub const STUDENT_UID: u32 = 1000;

/// Application name used in CLI output and cache files.
pub const APP_NAME: &str = "gradebox";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "gbx";

/// Returns the data directory, preferring `$HOME/.gradebox`, falling back
/// to a temp-dir location when no home directory is usable.
fn resolve_data_dir() -> PathBuf {
    if let Ok(home) = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")) {
        let user_dir = PathBuf::from(home).join(".gradebox");
        if std::fs::create_dir_all(&user_dir).is_ok() {
            return user_dir;
        }
    }
    std::env::temp_dir().join("gradebox")
}

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Returns the resolved data directory for this session.
pub fn data_dir() -> &'static PathBuf {
    DATA_DIR.get_or_init(resolve_data_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_paths_live_under_autograder_root() {
        for path in [SOURCE_DIR, SUBMISSION_DIR, RESULTS_DIR, ENTRYPOINT] {
            assert!(path.starts_with(AUTOGRADER_ROOT));
        }
    }

    #[test]
    fn data_dir_is_stable_across_calls() {
        assert_eq!(data_dir(), data_dir());
    }
}
