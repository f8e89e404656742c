//! Single test-case execution.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use gradebox_common::config::HarnessConfig;
use gradebox_common::constants::{
    CASE_GRADER_SUBDIR, CASE_RESULTS_SUBDIR, CASE_SUBMISSION_SUBDIR, RESULTS_DIR, SOURCE_DIR,
    SUBMISSION_DIR,
};
use gradebox_common::error::{GradeboxError, Result};
use gradebox_common::types::{CaseName, ContainerName};

use crate::backend::{self, BindMount, ContainerRuntime, RunSpec};

/// A resolved test-case fixture on disk.
#[derive(Debug, Clone)]
pub struct TestCase {
    /// Case identity, equal to the fixture directory name.
    pub name: CaseName,
    /// Fixture submission directory (required).
    pub submission_dir: PathBuf,
    /// Alternate grader payload overriding the baked-in source (optional).
    pub grader_dir: Option<PathBuf>,
    /// Host directory capturing `/autograder/results` output (optional).
    pub results_dir: Option<PathBuf>,
}

impl TestCase {
    /// Loads and validates a test case from the cases root.
    ///
    /// # Errors
    ///
    /// Returns `GradeboxError::NotFound` if no directory with the case's
    /// name exists, and `GradeboxError::Config` if the case lacks its
    /// `submission` subdirectory.
    pub fn load(cases_root: &Path, name: &CaseName) -> Result<Self> {
        let case_dir = cases_root.join(name.as_str());
        if !case_dir.is_dir() {
            return Err(GradeboxError::NotFound {
                kind: "test case",
                id: name.to_string(),
            });
        }

        let submission_dir = case_dir.join(CASE_SUBMISSION_SUBDIR);
        if !submission_dir.is_dir() {
            return Err(GradeboxError::Config {
                message: format!("test case {name} has no {CASE_SUBMISSION_SUBDIR} directory"),
            });
        }

        let grader_dir = existing_dir(case_dir.join(CASE_GRADER_SUBDIR));
        let results_dir = existing_dir(case_dir.join(CASE_RESULTS_SUBDIR));

        Ok(Self {
            name: name.clone(),
            submission_dir,
            grader_dir,
            results_dir,
        })
    }

    /// Assembles the bind mounts for one run of this case.
    ///
    /// Fixtures are read-only at test-run time; only the results capture
    /// directory, when present, is writable.
    ///
    /// # Errors
    ///
    /// Returns an error if a fixture path cannot be canonicalized.
    pub fn binds(&self) -> Result<Vec<BindMount>> {
        let mut binds = vec![BindMount::read_only(
            canonical(&self.submission_dir)?,
            SUBMISSION_DIR,
        )];
        if let Some(grader) = &self.grader_dir {
            binds.push(BindMount::read_only(canonical(grader)?, SOURCE_DIR));
        }
        if let Some(results) = &self.results_dir {
            binds.push(BindMount::read_write(canonical(results)?, RESULTS_DIR));
        }
        Ok(binds)
    }
}

fn existing_dir(path: PathBuf) -> Option<PathBuf> {
    path.is_dir().then_some(path)
}

/// Bind mounts require absolute host paths.
fn canonical(path: &Path) -> Result<PathBuf> {
    path.canonicalize().map_err(|e| GradeboxError::io(path, e))
}

/// Result of one completed case invocation.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// The container ran to completion with this exit code.
    Exited(i32),
    /// The case could not be run at all (bad fixture, runtime missing).
    Error(String),
}

impl RunOutcome {
    /// Returns whether the case passed (container exited 0).
    #[must_use]
    pub fn passed(&self) -> bool {
        matches!(self, Self::Exited(0))
    }
}

/// One case's outcome plus timing, as reported by the batch runner.
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    /// Case that was run.
    pub case: CaseName,
    /// What happened.
    pub outcome: RunOutcome,
    /// Wall-clock duration of the run.
    pub duration: Duration,
}

/// Runs test cases against the autograder image.
pub struct Runner {
    backend: Box<dyn ContainerRuntime>,
    config: HarnessConfig,
}

impl Runner {
    /// Creates a runner with the default Docker CLI backend.
    #[must_use]
    pub fn new(config: HarnessConfig) -> Self {
        let backend = backend::detect_runtime(&config.runtime_bin);
        Self { backend, config }
    }

    /// Creates a runner with a custom backend.
    #[must_use]
    pub fn with_backend(config: HarnessConfig, backend: Box<dyn ContainerRuntime>) -> Self {
        Self { backend, config }
    }

    /// Returns the harness configuration this runner was built with.
    #[must_use]
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Runs one test case to completion in a fresh container.
    ///
    /// The container's exit status becomes the outcome; it is never
    /// retried, and the container is removed afterwards regardless.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture is invalid or the container could
    /// not be launched; a failing grader is a non-zero outcome, not an
    /// error.
    pub fn run_case(&self, name: &CaseName) -> Result<CaseOutcome> {
        let case = TestCase::load(&self.config.cases_dir, name)?;
        let spec = RunSpec {
            image: self.config.image.clone(),
            container_name: ContainerName::generate(name),
            binds: case.binds()?,
        };
        tracing::info!(case = %name, container = %spec.container_name, "running test case");

        let started = Instant::now();
        let code = self.backend.run_to_exit(&spec)?;
        Ok(CaseOutcome {
            case: name.clone(),
            outcome: RunOutcome::Exited(code),
            duration: started.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cases_root_with(case: &str, subdirs: &[&str]) -> tempfile::TempDir {
        let root = tempfile::tempdir().expect("tempdir");
        for sub in subdirs {
            std::fs::create_dir_all(root.path().join(case).join(sub)).expect("mkdir");
        }
        root
    }

    #[test]
    fn load_rejects_unknown_case() {
        let root = tempfile::tempdir().expect("tempdir");
        let name = CaseName::new("ghost").expect("valid");
        assert!(matches!(
            TestCase::load(root.path(), &name),
            Err(GradeboxError::NotFound { kind: "test case", .. })
        ));
    }

    #[test]
    fn load_rejects_case_without_submission() {
        let root = cases_root_with("basic", &["grader"]);
        let name = CaseName::new("basic").expect("valid");
        assert!(matches!(
            TestCase::load(root.path(), &name),
            Err(GradeboxError::Config { .. })
        ));
    }

    #[test]
    fn load_finds_optional_grader_and_results_dirs() {
        let root = cases_root_with("full", &["submission", "grader", "results"]);
        let case = TestCase::load(root.path(), &CaseName::new("full").expect("valid"))
            .expect("load succeeds");
        assert!(case.grader_dir.is_some());
        assert!(case.results_dir.is_some());
    }

    #[test]
    fn submission_only_case_mounts_one_read_only_volume() {
        let root = cases_root_with("basic", &["submission"]);
        let case = TestCase::load(root.path(), &CaseName::new("basic").expect("valid"))
            .expect("load succeeds");

        let binds = case.binds().expect("binds resolve");
        assert_eq!(binds.len(), 1);
        assert_eq!(binds[0].container, "/autograder/submission");
        assert!(binds[0].readonly);
    }

    #[test]
    fn grader_override_mounts_read_only_over_source() {
        let root = cases_root_with("override", &["submission", "grader"]);
        let case = TestCase::load(root.path(), &CaseName::new("override").expect("valid"))
            .expect("load succeeds");

        let binds = case.binds().expect("binds resolve");
        let grader = binds
            .iter()
            .find(|b| b.container == "/autograder/source")
            .expect("grader mount present");
        assert!(grader.readonly);
    }

    #[test]
    fn results_capture_mounts_read_write() {
        let root = cases_root_with("capture", &["submission", "results"]);
        let case = TestCase::load(root.path(), &CaseName::new("capture").expect("valid"))
            .expect("load succeeds");

        let binds = case.binds().expect("binds resolve");
        let results = binds
            .iter()
            .find(|b| b.container == "/autograder/results")
            .expect("results mount present");
        assert!(!results.readonly);
    }
}
