//! File filtering and classification logic for the scanner.

use super::{extension_of, MediaKind};
use std::collections::HashSet;
use std::path::Path;

/// Classifies files and decides which ones enter the enumeration
pub struct MediaFilter {
    /// When set, only these extensions count as supported
    included: Option<HashSet<String>>,
    /// Whether to include hidden files
    include_hidden: bool,
}

impl MediaFilter {
    /// Create a filter with the default extension classification
    pub fn new() -> Self {
        Self {
            included: None,
            include_hidden: false,
        }
    }

    /// Include hidden files (starting with .)
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Restrict supported extensions to the given set (lowercased, no dot)
    pub fn with_included_extensions(mut self, extensions: Vec<String>) -> Self {
        self.included = Some(
            extensions
                .into_iter()
                .map(|e| e.to_lowercase())
                .collect(),
        );
        self
    }

    /// Whether a file should appear in the enumeration at all
    pub fn should_include(&self, path: &Path) -> bool {
        if !self.include_hidden {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with('.') {
                    return false;
                }
            }
        }
        true
    }

    /// Classify a file by extension, honoring the include list
    pub fn classify(&self, path: &Path) -> MediaKind {
        let Some(ext) = extension_of(path) else {
            return MediaKind::Unsupported;
        };

        if let Some(ref included) = self.included {
            if !included.contains(&ext) {
                return MediaKind::Unsupported;
            }
        }

        MediaKind::from_extension(&ext)
    }
}

impl Default for MediaFilter {
    fn default() -> Self {
        Self::new()
    }
}
