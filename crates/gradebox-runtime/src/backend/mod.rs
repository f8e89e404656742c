//! Container runtime abstraction.
//!
//! The harness never shells out ad hoc; every container operation goes
//! through this trait so tests can substitute a fake runtime and the CLI
//! can report availability before anything is launched.

pub mod docker;

use std::path::{Path, PathBuf};

use gradebox_common::error::Result;
use gradebox_common::types::{ContainerName, ImageTag};

/// A host directory exposed inside the container at a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindMount {
    /// Absolute host path.
    pub host: PathBuf,
    /// Absolute in-container path.
    pub container: String,
    /// Whether the mount is read-only.
    pub readonly: bool,
}

impl BindMount {
    /// Creates a read-only bind mount.
    #[must_use]
    pub fn read_only(host: impl Into<PathBuf>, container: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            container: container.into(),
            readonly: true,
        }
    }

    /// Creates a read-write bind mount.
    #[must_use]
    pub fn read_write(host: impl Into<PathBuf>, container: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            container: container.into(),
            readonly: false,
        }
    }

    /// Renders the mount as a `host:container[:ro]` volume argument.
    #[must_use]
    pub fn to_volume_arg(&self) -> String {
        let mut arg = format!("{}:{}", self.host.display(), self.container);
        if self.readonly {
            arg.push_str(":ro");
        }
        arg
    }
}

/// One single-use container run.
#[derive(Debug, Clone)]
pub struct RunSpec {
    /// Image to launch from.
    pub image: ImageTag,
    /// Unique name for this container instance.
    pub container_name: ContainerName,
    /// Fixture directories to expose inside the container.
    pub binds: Vec<BindMount>,
}

/// Platform-agnostic container runtime.
///
/// Implementors run containers to completion synchronously; there is no
/// daemon mode and no timeout, so a hung grading process blocks the caller.
pub trait ContainerRuntime: Send + Sync {
    /// Builds an image from a staged build context.
    ///
    /// A non-zero exit from the build (i.e. from the setup script) is
    /// fatal and never retried.
    ///
    /// # Errors
    ///
    /// Returns `GradeboxError::Build` if the build fails, or
    /// `GradeboxError::RuntimeUnavailable` if the runtime binary is missing.
    fn build_image(&self, context: &Path, tag: &ImageTag) -> Result<()>;

    /// Runs a single-use container to completion and returns its exit code.
    ///
    /// The container is removed after exit regardless of outcome.
    ///
    /// # Errors
    ///
    /// Returns an error only when the container could not be launched at
    /// all; a failing grader is a normal non-zero exit code, not an error.
    fn run_to_exit(&self, spec: &RunSpec) -> Result<i32>;

    /// Returns whether this runtime is operational on the current host.
    fn is_available(&self) -> bool;
}

/// Creates the default runtime for the given binary name.
#[must_use]
pub fn detect_runtime(binary: &str) -> Box<dyn ContainerRuntime> {
    Box::new(docker::DockerCli::new(binary))
}

/// Information about runtime availability on the current host.
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    /// Configured runtime binary name.
    pub binary: String,
    /// Resolved absolute path, if the binary is on `PATH`.
    pub resolved: Option<PathBuf>,
}

impl RuntimeInfo {
    /// Returns whether the runtime binary was found.
    #[must_use]
    pub fn available(&self) -> bool {
        self.resolved.is_some()
    }
}

/// Looks up the runtime binary on `PATH`.
#[must_use]
pub fn runtime_info(binary: &str) -> RuntimeInfo {
    RuntimeInfo {
        binary: binary.to_string(),
        resolved: which::which(binary).ok(),
    }
}
