//! Dockerfile rendering for the autograder image.

use gradebox_common::constants::{ENTRYPOINT, SOURCE_DIR};

/// Name of the rendered Dockerfile inside a staged context.
pub const DOCKERFILE_NAME: &str = "Dockerfile";

/// Name of the setup script inside the payload.
pub const SETUP_SCRIPT_NAME: &str = "setup.sh";

/// Renders the Dockerfile for a staged build context.
///
/// The payload is copied to the fixed grader-source path, the setup script
/// runs exactly once as root, and the apt cache is cleared in the same
/// layer so it never reaches the final image. The default command is the
/// fixed grading entry point.
#[must_use]
pub fn render_dockerfile(base_image: &str) -> String {
    let mut dockerfile = format!("FROM {base_image}\n\n");
    dockerfile.push_str(&format!("COPY source {SOURCE_DIR}\n"));
    dockerfile.push_str(&format!(
        "RUN cp {SOURCE_DIR}/{SETUP_SCRIPT_NAME} /autograder/setup.sh \\\n"
    ));
    dockerfile.push_str(&format!(
        " && cp {SOURCE_DIR}/run_autograder {ENTRYPOINT} \\\n"
    ));
    dockerfile.push_str(&format!(
        " && chmod +x /autograder/setup.sh {ENTRYPOINT} \\\n"
    ));
    dockerfile.push_str(" && bash /autograder/setup.sh \\\n");
    dockerfile.push_str(" && apt-get clean && rm -rf /var/lib/apt/lists/*\n\n");
    dockerfile.push_str("WORKDIR /autograder\n");
    dockerfile.push_str(&format!("CMD [\"{ENTRYPOINT}\"]\n"));
    dockerfile
}
