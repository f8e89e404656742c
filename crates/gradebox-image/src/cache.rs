//! Build cache management.
//!
//! Maintains a JSON index of image tag to staged-context digest so that
//! `build` can skip the Docker invocation when nothing changed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use gradebox_common::error::{GradeboxError, Result};
use gradebox_common::types::{ImageTag, Sha256Hash};

/// Entry in the build cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Tag the image was built under.
    pub tag: ImageTag,
    /// Digest of the staged context the image was built from.
    pub digest: Sha256Hash,
    /// Build timestamp (ISO-8601).
    pub built_at: String,
}

/// Build cache backed by a JSON file.
#[derive(Debug)]
pub struct BuildCache {
    cache_path: PathBuf,
}

impl BuildCache {
    /// Opens or creates a build cache under the given data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache directory cannot be created.
    pub fn open(data_dir: &Path) -> Result<Self> {
        let cache_path = data_dir.join("builds").join("cache.json");
        if let Some(parent) = cache_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| GradeboxError::io(parent, e))?;
        }
        Ok(Self { cache_path })
    }

    /// Lists all cached builds.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache file cannot be read or parsed.
    pub fn list(&self) -> Result<Vec<CacheEntry>> {
        if !self.cache_path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.cache_path)
            .map_err(|e| GradeboxError::io(&self.cache_path, e))?;
        let entries: Vec<CacheEntry> = serde_json::from_str(&content)?;
        Ok(entries)
    }

    /// Returns the recorded digest for a tag, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache cannot be read.
    pub fn lookup(&self, tag: &ImageTag) -> Result<Option<Sha256Hash>> {
        Ok(self
            .list()?
            .into_iter()
            .find(|e| e.tag == *tag)
            .map(|e| e.digest))
    }

    /// Records a successful build, replacing any previous entry for the tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache cannot be read or written.
    pub fn record(&self, tag: &ImageTag, digest: &Sha256Hash) -> Result<()> {
        let mut entries = self.list()?;
        entries.retain(|e| e.tag != *tag);
        entries.push(CacheEntry {
            tag: tag.clone(),
            digest: digest.clone(),
            built_at: chrono::Utc::now().to_rfc3339(),
        });
        let json = serde_json::to_string_pretty(&entries)?;
        std::fs::write(&self.cache_path, json).map_err(|e| GradeboxError::io(&self.cache_path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest(byte: &str) -> Sha256Hash {
        Sha256Hash::from_hex(byte.repeat(64)).expect("valid hex")
    }

    #[test]
    fn cache_empty_on_first_open() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = BuildCache::open(dir.path()).expect("open");
        assert!(cache.list().expect("list").is_empty());
        assert!(
            cache
                .lookup(&ImageTag::new("missing:latest"))
                .expect("lookup")
                .is_none()
        );
    }

    #[test]
    fn record_and_lookup_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = BuildCache::open(dir.path()).expect("open");
        let tag = ImageTag::new("gradebox/autograder:latest");

        cache.record(&tag, &digest("a")).expect("record");
        assert_eq!(cache.lookup(&tag).expect("lookup"), Some(digest("a")));
    }

    #[test]
    fn record_replaces_previous_entry_for_tag() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = BuildCache::open(dir.path()).expect("open");
        let tag = ImageTag::new("gradebox/autograder:latest");

        cache.record(&tag, &digest("a")).expect("record first");
        cache.record(&tag, &digest("b")).expect("record second");

        assert_eq!(cache.list().expect("list").len(), 1);
        assert_eq!(cache.lookup(&tag).expect("lookup"), Some(digest("b")));
    }

    #[test]
    fn distinct_tags_are_cached_independently() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = BuildCache::open(dir.path()).expect("open");

        cache
            .record(&ImageTag::new("a:latest"), &digest("a"))
            .expect("record a");
        cache
            .record(&ImageTag::new("b:latest"), &digest("b"))
            .expect("record b");

        assert_eq!(cache.list().expect("list").len(), 2);
    }
}
