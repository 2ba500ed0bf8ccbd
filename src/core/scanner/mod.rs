//! # Scanner Module
//!
//! Enumerates media files under the input root.
//!
//! Every regular file encountered is classified by extension into
//! image, video, or unsupported. Unsupported files stay in the
//! enumeration so the pipeline can log and skip them (and count them
//! toward progress).
//!
//! ## Supported Formats
//! - Images: JPEG (.jpg/.jpeg), PNG, TIFF, BMP, HEIC
//! - Videos: MP4, MOV, AVI, MKV, WMV
//!
//! ## Example
//! ```rust,ignore
//! use media_organizer::core::scanner::{MediaScanner, ScanConfig, WalkDirScanner};
//!
//! let scanner = WalkDirScanner::new(ScanConfig::default());
//! let result = scanner.scan(&input_dir)?;
//! ```

mod filter;
mod walker;

pub use filter::MediaFilter;
pub use walker::{ScanConfig, WalkDirScanner};

use crate::error::ScanError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A media file discovered by enumeration.
///
/// Read-only to the pipeline except for its eventual relocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaFile {
    /// Absolute source path
    pub path: PathBuf,
    /// Classification by extension
    pub kind: MediaKind,
    /// File size in bytes
    pub size: u64,
    /// Last modified time
    pub modified: SystemTime,
}

impl MediaFile {
    /// The file extension, lowercased, without the leading dot
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.path)
    }
}

/// Classification of a file by its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
    Unsupported,
}

impl MediaKind {
    /// Classify an extension (without dot, any case)
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "tiff" | "bmp" | "heic" => MediaKind::Image,
            "mp4" | "mov" | "avi" | "mkv" | "wmv" => MediaKind::Video,
            _ => MediaKind::Unsupported,
        }
    }

    /// Whether the pipeline can organize this kind
    pub fn is_supported(&self) -> bool {
        !matches!(self, MediaKind::Unsupported)
    }
}

/// Lowercased extension of a path, if any
pub(crate) fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Result of a scan operation
#[derive(Debug)]
pub struct ScanResult {
    /// All regular files found, in enumeration order
    pub files: Vec<MediaFile>,
    /// Errors that occurred during scanning (non-fatal)
    pub errors: Vec<ScanError>,
}

/// Trait for media scanners
///
/// Implement this trait to create custom scanners (e.g., for testing).
pub trait MediaScanner: Send + Sync {
    /// Enumerate all regular files under the root
    fn scan(&self, root: &Path) -> Result<ScanResult, ScanError>;
}
