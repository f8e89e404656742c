//! Docker CLI backend.
//!
//! Wraps the `docker` binary with typed invocations. Stdio is inherited so
//! grader output streams straight to the operator's terminal; the harness
//! itself only consumes the exit status.

use std::path::Path;
use std::process::Command;

use gradebox_common::error::{GradeboxError, Result};
use gradebox_common::types::ImageTag;

use super::{ContainerRuntime, RunSpec};

/// Backend that drives the Docker command-line client.
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: String,
}

impl DockerCli {
    /// Creates a backend for the given Docker binary name or path.
    #[must_use]
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn spawn_error(&self, source: std::io::Error) -> GradeboxError {
        if source.kind() == std::io::ErrorKind::NotFound {
            GradeboxError::RuntimeUnavailable {
                message: format!("{} not found on PATH", self.binary),
            }
        } else {
            GradeboxError::io(&self.binary, source)
        }
    }
}

impl ContainerRuntime for DockerCli {
    fn build_image(&self, context: &Path, tag: &ImageTag) -> Result<()> {
        tracing::info!(context = %context.display(), tag = %tag, "docker build");
        let status = Command::new(&self.binary)
            .arg("build")
            .args(["-t", tag.as_str()])
            .arg(context)
            .status()
            .map_err(|e| self.spawn_error(e))?;

        if status.success() {
            Ok(())
        } else {
            Err(GradeboxError::Build {
                message: format!(
                    "docker build of {tag} exited with status {}",
                    status.code().unwrap_or(-1)
                ),
            })
        }
    }

    fn run_to_exit(&self, spec: &RunSpec) -> Result<i32> {
        tracing::info!(
            image = %spec.image,
            container = %spec.container_name,
            mounts = spec.binds.len(),
            "docker run"
        );

        let mut cmd = Command::new(&self.binary);
        let _ = cmd
            .arg("run")
            .arg("--rm")
            .args(["--name", spec.container_name.as_str()]);
        for bind in &spec.binds {
            let _ = cmd.args(["-v", &bind.to_volume_arg()]);
        }
        let _ = cmd.arg(spec.image.as_str());

        let status = cmd.status().map_err(|e| self.spawn_error(e))?;
        let code = status.code().unwrap_or(-1);
        tracing::info!(container = %spec.container_name, code, "container exited");
        Ok(code)
    }

    fn is_available(&self) -> bool {
        which::which(&self.binary).is_ok()
    }
}
