//! Byte-exact fingerprinting via BLAKE3.

use super::{FileHasher, Fingerprint, FingerprintStrategy};
use crate::error::HashError;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read buffer size for streaming hashing
const CHUNK_SIZE: usize = 64 * 1024;

/// Streams file bytes through BLAKE3
pub struct ExactHasher;

impl ExactHasher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExactHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl FileHasher for ExactHasher {
    fn fingerprint(&self, path: &Path) -> Result<Fingerprint, HashError> {
        let mut file = File::open(path).map_err(|e| HashError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = blake3::Hasher::new();
        let mut buffer = [0u8; CHUNK_SIZE];

        loop {
            let read = file.read(&mut buffer).map_err(|e| HashError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            if read == 0 {
                break;
            }
            hasher.update(&buffer[..read]);
        }

        Ok(Fingerprint::new(
            FingerprintStrategy::Exact,
            hasher.finalize().to_hex().to_string(),
        ))
    }

    fn strategy(&self) -> FingerprintStrategy {
        FingerprintStrategy::Exact
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    #[test]
    fn identical_content_has_identical_digest() {
        let temp_dir = TempDir::new().unwrap();
        let a = write_file(&temp_dir, "a.jpg", b"same bytes");
        let b = write_file(&temp_dir, "b.jpg", b"same bytes");

        let hasher = ExactHasher::new();
        assert_eq!(
            hasher.fingerprint(&a).unwrap(),
            hasher.fingerprint(&b).unwrap()
        );
    }

    #[test]
    fn any_byte_difference_changes_digest() {
        let temp_dir = TempDir::new().unwrap();
        let a = write_file(&temp_dir, "a.jpg", b"same bytes");
        let b = write_file(&temp_dir, "b.jpg", b"same byteX");

        let hasher = ExactHasher::new();
        assert_ne!(
            hasher.fingerprint(&a).unwrap().digest,
            hasher.fingerprint(&b).unwrap().digest
        );
    }

    #[test]
    fn missing_file_returns_io_error() {
        let hasher = ExactHasher::new();
        let result = hasher.fingerprint(Path::new("/nonexistent/file.jpg"));
        assert!(matches!(result, Err(HashError::Io { .. })));
    }

    #[test]
    fn empty_file_hashes_successfully() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "empty.jpg", b"");

        let hasher = ExactHasher::new();
        let fingerprint = hasher.fingerprint(&path).unwrap();
        assert!(!fingerprint.digest.is_empty());
    }
}
