//! Harness configuration model.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::ImageTag;

/// Root configuration for the test harness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Directory holding one fixture subdirectory per test case.
    pub cases_dir: PathBuf,
    /// Image the runner launches containers from.
    pub image: ImageTag,
    /// Container runtime binary to invoke (`docker` unless overridden).
    pub runtime_bin: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            cases_dir: PathBuf::from(crate::constants::DEFAULT_CASES_DIR),
            image: ImageTag::new(crate::constants::DEFAULT_IMAGE_TAG),
            runtime_bin: crate::constants::DEFAULT_RUNTIME_BIN.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_cases_dir() {
        let config = HarnessConfig::default();
        assert_eq!(config.cases_dir, PathBuf::from("cases"));
        assert_eq!(config.image.as_str(), "gradebox/autograder:latest");
        assert_eq!(config.runtime_bin, "docker");
    }
}
