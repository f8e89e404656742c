//! SHA-256 fingerprinting of build contexts.

use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use gradebox_common::error::{GradeboxError, Result};
use gradebox_common::types::Sha256Hash;

/// Computes the SHA-256 hash of a single file.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn hash_file(path: &Path) -> Result<Sha256Hash> {
    tracing::debug!(path = %path.display(), "computing SHA-256 hash");
    let mut file = std::fs::File::open(path).map_err(|e| GradeboxError::io(path, e))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf).map_err(|e| GradeboxError::io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    finish(hasher)
}

/// Computes a SHA-256 digest over a directory tree.
///
/// Walks entries in sorted order and folds each file's relative path and
/// contents into the digest, so the result is stable across platforms and
/// re-staging but changes when any byte of the tree changes.
///
/// # Errors
///
/// Returns an error if the tree cannot be read.
pub fn hash_dir(root: &Path) -> Result<Sha256Hash> {
    tracing::debug!(root = %root.display(), "computing context digest");
    let mut hasher = Sha256::new();
    hash_dir_into(root, root, &mut hasher)?;
    finish(hasher)
}

fn hash_dir_into(root: &Path, dir: &Path, hasher: &mut Sha256) -> Result<()> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| GradeboxError::io(dir, e))?
        .collect::<std::io::Result<_>>()
        .map_err(|e| GradeboxError::io(dir, e))?;
    entries.sort_by_key(std::fs::DirEntry::file_name);

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            hash_dir_into(root, &path, hasher)?;
        } else {
            let rel = path.strip_prefix(root).unwrap_or(&path);
            hasher.update(rel.to_string_lossy().as_bytes());
            hasher.update([0]);
            let contents = std::fs::read(&path).map_err(|e| GradeboxError::io(&path, e))?;
            hasher.update(&contents);
            hasher.update([0]);
        }
    }
    Ok(())
}

fn finish(hasher: Sha256) -> Result<Sha256Hash> {
    let digest = hasher.finalize();
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    Sha256Hash::from_hex(hex)
}
