//! Domain primitive types used across the Gradebox workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GradeboxError, Result};

/// Name of a test case, identical to its fixture directory name.
///
/// Identity is the directory name itself, so names that would escape the
/// cases root (path separators, `.`/`..`) are rejected up front.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseName(String);

impl CaseName {
    /// Creates a case name after validating it is a plain directory name.
    ///
    /// # Errors
    ///
    /// Returns `GradeboxError::Config` if the name is empty, is `.` or
    /// `..`, or contains a path separator.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() || name == "." || name == ".." {
            return Err(GradeboxError::Config {
                message: format!("invalid test case name: {name:?}"),
            });
        }
        if name.contains(['/', '\\']) {
            return Err(GradeboxError::Config {
                message: format!("test case name must not contain path separators: {name:?}"),
            });
        }
        Ok(Self(name))
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tag identifying a built autograder image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageTag(String);

impl ImageTag {
    /// Creates a new image tag from a string value.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique name for a single-use container instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerName(String);

impl ContainerName {
    /// Generates a fresh container name for one run of the given case.
    ///
    /// Names are unique per run so that repeated runs of the same case can
    /// never collide with a container the runtime has not reaped yet.
    #[must_use]
    pub fn generate(case: &CaseName) -> Self {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Self(format!(
            "{}-{}-{}",
            crate::constants::APP_NAME,
            case.as_str(),
            &suffix[..8]
        ))
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// SHA-256 hash digest used for build-context fingerprinting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sha256Hash(String);

impl Sha256Hash {
    /// Creates a hash from a hex-encoded string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a valid 64-character hex string.
    pub fn from_hex(hex: impl Into<String>) -> Result<Self> {
        let hex = hex.into();
        if hex.len() != 64 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(GradeboxError::Config {
                message: format!("invalid SHA-256 hex string: {hex}"),
            });
        }
        Ok(Self(hex))
    }

    /// Returns the hex-encoded hash string.
    #[must_use]
    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sha256:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_name_accepts_plain_directory_names() {
        let name = CaseName::new("basic").expect("plain name is valid");
        assert_eq!(name.as_str(), "basic");
    }

    #[test]
    fn case_name_rejects_empty_and_dot_names() {
        assert!(CaseName::new("").is_err());
        assert!(CaseName::new(".").is_err());
        assert!(CaseName::new("..").is_err());
    }

    #[test]
    fn case_name_rejects_path_separators() {
        assert!(CaseName::new("a/b").is_err());
        assert!(CaseName::new("a\\b").is_err());
        assert!(CaseName::new("../escape").is_err());
    }

    #[test]
    fn container_names_are_unique_per_run() {
        let case = CaseName::new("basic").expect("valid");
        let a = ContainerName::generate(&case);
        let b = ContainerName::generate(&case);
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("gradebox-basic-"));
    }

    #[test]
    fn sha256_hash_display_is_prefixed() {
        let hash = Sha256Hash::from_hex(
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9",
        )
        .expect("valid hex");
        assert!(format!("{hash}").starts_with("sha256:"));
    }

    #[test]
    fn sha256_hash_invalid_hex_rejected() {
        assert!(Sha256Hash::from_hex("not-a-valid-hex").is_err());
        assert!(Sha256Hash::from_hex("abcdef").is_err());
    }
}
