//! # Relocate Module
//!
//! Filesystem moves for organized originals and quarantined
//! duplicates.
//!
//! Moves are rename-first with a copy+verify+delete fallback for
//! cross-filesystem destinations. On any failure the source file is
//! left untouched and the error surfaces to the caller for logging;
//! nothing is retried automatically and nothing is ever deleted
//! outright.

use crate::core::planner::Destination;
use crate::error::RelocateError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Performs the filesystem moves for one run
pub struct Relocator;

impl Relocator {
    pub fn new() -> Self {
        Self
    }

    /// Move an original to its computed destination, creating the
    /// directory tree as needed. Returns the new path.
    pub fn place(
        &self,
        source: &Path,
        destination: &Destination,
    ) -> Result<PathBuf, RelocateError> {
        if !source.exists() {
            return Err(RelocateError::SourceMissing {
                path: source.to_path_buf(),
            });
        }

        fs::create_dir_all(&destination.directory).map_err(|e| {
            RelocateError::CreateDirectory {
                path: destination.directory.clone(),
                source: e,
            }
        })?;

        let dest_path = destination.full_path();
        self.move_file(source, &dest_path)?;

        debug!(source = %source.display(), destination = %dest_path.display(), "relocated");
        Ok(dest_path)
    }

    /// Move a duplicate under the trash root by its base filename.
    ///
    /// When a file of the same name already sits in the trash, the
    /// stem gets a counter suffix so no quarantined duplicate is ever
    /// overwritten.
    pub fn quarantine(&self, source: &Path, trash_root: &Path) -> Result<PathBuf, RelocateError> {
        if !source.exists() {
            return Err(RelocateError::SourceMissing {
                path: source.to_path_buf(),
            });
        }

        fs::create_dir_all(trash_root).map_err(|e| RelocateError::CreateDirectory {
            path: trash_root.to_path_buf(),
            source: e,
        })?;

        let filename = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "duplicate".to_string());

        let dest_path = unique_trash_path(trash_root, &filename);
        self.move_file(source, &dest_path)?;

        debug!(source = %source.display(), trash = %dest_path.display(), "quarantined duplicate");
        Ok(dest_path)
    }

    /// Rename, falling back to copy+size-verify+delete across
    /// filesystem boundaries
    fn move_file(&self, source: &Path, dest: &Path) -> Result<(), RelocateError> {
        if fs::rename(source, dest).is_ok() {
            return Ok(());
        }

        let wrap = |e: std::io::Error| RelocateError::Move {
            source_path: source.to_path_buf(),
            dest_path: dest.to_path_buf(),
            source: e,
        };

        let source_size = fs::metadata(source).map_err(wrap)?.len();
        fs::copy(source, dest).map_err(wrap)?;

        // Verify the copy before deleting the source
        let dest_size = fs::metadata(dest).map_err(wrap)?.len();
        if dest_size != source_size {
            let _ = fs::remove_file(dest);
            return Err(RelocateError::VerifyFailed {
                path: dest.to_path_buf(),
                expected: source_size,
                actual: dest_size,
            });
        }

        fs::remove_file(source).map_err(wrap)
    }
}

impl Default for Relocator {
    fn default() -> Self {
        Self::new()
    }
}

/// First non-colliding path for `filename` under the trash root
fn unique_trash_path(trash_root: &Path, filename: &str) -> PathBuf {
    let candidate = trash_root.join(filename);
    if !candidate.exists() {
        return candidate;
    }

    let path = Path::new(filename);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("duplicate");
    let ext = path.extension().and_then(|e| e.to_str());

    let mut counter = 1;
    loop {
        let name = match ext {
            Some(ext) => format!("{stem}_{counter}.{ext}"),
            None => format!("{stem}_{counter}"),
        };
        let candidate = trash_root.join(name);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    #[test]
    fn place_moves_file_and_creates_directories() {
        let src_dir = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();

        let source = write_file(src_dir.path(), "photo.jpg", b"bytes");
        let destination = Destination {
            directory: out_dir.path().join("2023/2023-05"),
            filename: "20230501_143000_Lincoln_USA.jpg".to_string(),
        };

        let relocator = Relocator::new();
        let new_path = relocator.place(&source, &destination).unwrap();

        assert!(!source.exists());
        assert!(new_path.exists());
        assert_eq!(fs::read(&new_path).unwrap(), b"bytes");
    }

    #[test]
    fn place_missing_source_fails_without_side_effects() {
        let out_dir = TempDir::new().unwrap();
        let destination = Destination {
            directory: out_dir.path().join("2023/2023-05"),
            filename: "x.jpg".to_string(),
        };

        let relocator = Relocator::new();
        let result = relocator.place(Path::new("/nonexistent/photo.jpg"), &destination);

        assert!(matches!(result, Err(RelocateError::SourceMissing { .. })));
    }

    #[test]
    fn quarantine_uses_base_filename() {
        let src_dir = TempDir::new().unwrap();
        let trash_dir = TempDir::new().unwrap();

        let nested = src_dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        let source = write_file(&nested, "dup.jpg", b"bytes");

        let relocator = Relocator::new();
        let trash_path = relocator.quarantine(&source, trash_dir.path()).unwrap();

        assert_eq!(trash_path, trash_dir.path().join("dup.jpg"));
        assert!(trash_path.exists());
        assert!(!source.exists());
    }

    #[test]
    fn quarantine_collisions_get_counter_suffixes() {
        let src_dir = TempDir::new().unwrap();
        let trash_dir = TempDir::new().unwrap();

        let relocator = Relocator::new();

        let first = write_file(src_dir.path(), "dup.jpg", b"first");
        relocator.quarantine(&first, trash_dir.path()).unwrap();

        let nested = src_dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        let second = write_file(&nested, "dup.jpg", b"second");
        let second_trash = relocator.quarantine(&second, trash_dir.path()).unwrap();

        assert_eq!(second_trash, trash_dir.path().join("dup_1.jpg"));
        assert_eq!(fs::read(trash_dir.path().join("dup.jpg")).unwrap(), b"first");
        assert_eq!(fs::read(&second_trash).unwrap(), b"second");
    }

    #[test]
    fn no_file_is_ever_deleted_outright() {
        let src_dir = TempDir::new().unwrap();
        let trash_dir = TempDir::new().unwrap();

        let relocator = Relocator::new();

        for (i, content) in [b"one" as &[u8], b"two", b"three"].iter().enumerate() {
            let dir = src_dir.path().join(format!("d{i}"));
            fs::create_dir(&dir).unwrap();
            let source = write_file(&dir, "same.jpg", content);
            relocator.quarantine(&source, trash_dir.path()).unwrap();
        }

        let trash_count = fs::read_dir(trash_dir.path()).unwrap().count();
        assert_eq!(trash_count, 3);
    }
}
