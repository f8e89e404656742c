//! Build-context validation and staging.

use std::path::{Path, PathBuf};

use gradebox_common::constants::ENTRYPOINT_FILE;
use gradebox_common::error::{GradeboxError, Result};
use gradebox_common::types::Sha256Hash;

use crate::dockerfile::{DOCKERFILE_NAME, SETUP_SCRIPT_NAME, render_dockerfile};
use crate::setup::SetupPlan;

/// Name of the development-only setup script emitted next to `setup.sh`.
pub const DEV_SCRIPT_NAME: &str = "setup-dev.sh";

/// Description of an autograder image build.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Host directory holding the grader payload.
    pub payload_dir: PathBuf,
    /// Base image the Dockerfile starts from.
    pub base_image: String,
    /// Setup plan rendered into the context when the payload does not
    /// carry its own `setup.sh`.
    pub plan: SetupPlan,
}

impl BuildContext {
    /// Creates a build context for the given payload directory.
    #[must_use]
    pub fn new(payload_dir: impl Into<PathBuf>, base_image: impl Into<String>) -> Self {
        Self {
            payload_dir: payload_dir.into(),
            base_image: base_image.into(),
            plan: SetupPlan::default(),
        }
    }

    /// Validates the payload before any staging or Docker invocation.
    ///
    /// # Errors
    ///
    /// Returns `GradeboxError::NotFound` if the payload directory does not
    /// exist, and `GradeboxError::Config` if it lacks the grading entry
    /// point.
    pub fn validate(&self) -> Result<()> {
        if !self.payload_dir.is_dir() {
            return Err(GradeboxError::NotFound {
                kind: "payload directory",
                id: self.payload_dir.display().to_string(),
            });
        }
        if !self.payload_dir.join(ENTRYPOINT_FILE).is_file() {
            return Err(GradeboxError::Config {
                message: format!(
                    "payload {} has no {ENTRYPOINT_FILE} entry point",
                    self.payload_dir.display()
                ),
            });
        }
        Ok(())
    }

    /// Stages the context into `dest` and returns its digest.
    ///
    /// Copies the payload to `dest/source`, renders the Dockerfile, and
    /// emits the setup scripts: a payload-provided `setup.sh` wins over
    /// the rendered plan, and the dev script only appears when the plan
    /// declares development packages.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or any file cannot be copied
    /// or written.
    pub fn stage(&self, dest: &Path) -> Result<Sha256Hash> {
        self.validate()?;
        tracing::info!(
            payload = %self.payload_dir.display(),
            dest = %dest.display(),
            "staging build context"
        );

        let source_dir = dest.join("source");
        copy_tree(&self.payload_dir, &source_dir)?;

        let setup_path = source_dir.join(SETUP_SCRIPT_NAME);
        if !setup_path.is_file() {
            write_file(&setup_path, &self.plan.render_setup_script())?;
        }
        if let Some(dev_script) = self.plan.render_dev_script() {
            write_file(&source_dir.join(DEV_SCRIPT_NAME), &dev_script)?;
        }

        write_file(&dest.join(DOCKERFILE_NAME), &render_dockerfile(&self.base_image))?;

        crate::hash::hash_dir(dest)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| GradeboxError::io(path, e))
}

/// Recursively copies `src` into `dest`, creating `dest` as needed.
fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    std::fs::create_dir_all(dest).map_err(|e| GradeboxError::io(dest, e))?;
    let entries = std::fs::read_dir(src).map_err(|e| GradeboxError::io(src, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| GradeboxError::io(src, e))?;
        let from = entry.path();
        let to = dest.join(entry.file_name());
        if from.is_dir() {
            copy_tree(&from, &to)?;
        } else {
            let _ = std::fs::copy(&from, &to).map_err(|e| GradeboxError::io(&from, e))?;
        }
    }
    Ok(())
}
