//! Directory walking implementation using walkdir.

use super::{filter::MediaFilter, MediaFile, MediaScanner, ScanResult};
use crate::error::ScanError;
use std::fs;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Configuration for the directory scanner
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Whether to include hidden files and directories
    pub include_hidden: bool,
    /// Maximum directory depth (None = unlimited)
    pub max_depth: Option<usize>,
    /// Restrict supported extensions to this set (None = use defaults)
    pub included_extensions: Option<Vec<String>>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            include_hidden: false,
            max_depth: None,
            included_extensions: None,
        }
    }
}

/// Scanner implementation using the walkdir crate
pub struct WalkDirScanner {
    config: ScanConfig,
    filter: MediaFilter,
}

impl WalkDirScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        let mut filter = MediaFilter::new().with_hidden(config.include_hidden);

        if let Some(ref extensions) = config.included_extensions {
            filter = filter.with_included_extensions(extensions.clone());
        }

        Self { config, filter }
    }
}

impl MediaScanner for WalkDirScanner {
    fn scan(&self, root: &Path) -> Result<ScanResult, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        let mut files = Vec::new();
        let mut errors = Vec::new();

        let mut walker = WalkDir::new(root).follow_links(self.config.follow_symlinks);

        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut iter = walker.into_iter();
        while let Some(entry_result) = iter.next() {
            match entry_result {
                Ok(entry) => {
                    let path = entry.path();

                    if path.is_dir() {
                        // Prune hidden directories so their contents are
                        // never enumerated, unless configured otherwise
                        if !self.config.include_hidden {
                            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                                if name.starts_with('.') && path != root {
                                    iter.skip_current_dir();
                                }
                            }
                        }
                        continue;
                    }

                    if !self.filter.should_include(path) {
                        continue;
                    }

                    match fs::metadata(path) {
                        Ok(metadata) => {
                            files.push(MediaFile {
                                path: path.to_path_buf(),
                                kind: self.filter.classify(path),
                                size: metadata.len(),
                                modified: metadata
                                    .modified()
                                    .unwrap_or(std::time::SystemTime::UNIX_EPOCH),
                            });
                        }
                        Err(e) => {
                            debug!(path = %path.display(), error = %e, "failed to stat file");
                            errors.push(ScanError::ReadDirectory {
                                path: path.to_path_buf(),
                                source: e,
                            });
                        }
                    }
                }
                Err(e) => {
                    let path = e.path().map(|p| p.to_path_buf()).unwrap_or_default();

                    let error = if e.io_error().map(|e| e.kind())
                        == Some(std::io::ErrorKind::PermissionDenied)
                    {
                        ScanError::PermissionDenied { path }
                    } else {
                        ScanError::ReadDirectory {
                            path,
                            source: std::io::Error::other(e.to_string()),
                        }
                    };

                    errors.push(error);
                }
            }
        }

        Ok(ScanResult { files, errors })
    }
}

#[cfg(test)]
mod tests {
    use super::super::MediaKind;
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_file(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(b"content").unwrap();
        path
    }

    #[test]
    fn scan_empty_directory_returns_empty_vec() {
        let temp_dir = TempDir::new().unwrap();
        let scanner = WalkDirScanner::new(ScanConfig::default());

        let result = scanner.scan(temp_dir.path()).unwrap();

        assert!(result.files.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn scan_classifies_files_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(&temp_dir, "photo.jpg");
        create_test_file(&temp_dir, "clip.mp4");
        create_test_file(&temp_dir, "notes.txt");

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(result.files.len(), 3);

        let kind_of = |name: &str| {
            result
                .files
                .iter()
                .find(|f| f.path.ends_with(name))
                .map(|f| f.kind)
                .unwrap()
        };
        assert_eq!(kind_of("photo.jpg"), MediaKind::Image);
        assert_eq!(kind_of("clip.mp4"), MediaKind::Video);
        assert_eq!(kind_of("notes.txt"), MediaKind::Unsupported);
    }

    #[test]
    fn scan_traverses_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();

        create_test_file(&temp_dir, "root.jpg");
        let mut file = File::create(subdir.join("nested.jpg")).unwrap();
        file.write_all(b"nested").unwrap();

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(result.files.len(), 2);
    }

    #[test]
    fn scan_excludes_hidden_files_by_default() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(&temp_dir, "visible.jpg");
        create_test_file(&temp_dir, ".hidden.jpg");

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(result.files.len(), 1);
        assert!(result.files[0].path.ends_with("visible.jpg"));
    }

    #[test]
    fn scan_never_descends_into_hidden_directories() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(&temp_dir, "visible.jpg");
        let hidden_dir = temp_dir.path().join(".thumbnails");
        fs::create_dir(&hidden_dir).unwrap();
        let mut file = File::create(hidden_dir.join("photo.jpg")).unwrap();
        file.write_all(b"cached").unwrap();

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(result.files.len(), 1);
        assert!(result.files[0].path.ends_with("visible.jpg"));
    }

    #[test]
    fn scan_can_include_hidden_directories() {
        let temp_dir = TempDir::new().unwrap();
        let hidden_dir = temp_dir.path().join(".thumbnails");
        fs::create_dir(&hidden_dir).unwrap();
        let mut file = File::create(hidden_dir.join("photo.jpg")).unwrap();
        file.write_all(b"cached").unwrap();

        let config = ScanConfig {
            include_hidden: true,
            ..Default::default()
        };
        let scanner = WalkDirScanner::new(config);
        let result = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(result.files.len(), 1);
        assert!(result.files[0].path.ends_with("photo.jpg"));
    }

    #[test]
    fn scan_can_include_hidden_files() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(&temp_dir, "visible.jpg");
        create_test_file(&temp_dir, ".hidden.jpg");

        let config = ScanConfig {
            include_hidden: true,
            ..Default::default()
        };
        let scanner = WalkDirScanner::new(config);
        let result = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(result.files.len(), 2);
    }

    #[test]
    fn scan_nonexistent_directory_returns_error() {
        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(Path::new("/nonexistent/path/12345"));

        assert!(result.is_err());
    }

    #[test]
    fn include_list_downgrades_other_extensions() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(&temp_dir, "photo.jpg");
        create_test_file(&temp_dir, "photo.png");

        let config = ScanConfig {
            included_extensions: Some(vec!["jpg".to_string()]),
            ..Default::default()
        };
        let scanner = WalkDirScanner::new(config);
        let result = scanner.scan(temp_dir.path()).unwrap();

        let png = result
            .files
            .iter()
            .find(|f| f.path.ends_with("photo.png"))
            .unwrap();
        assert_eq!(png.kind, MediaKind::Unsupported);
    }
}
