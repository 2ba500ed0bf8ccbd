//! # Error Module
//!
//! User-friendly error types for the media organizer.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **User-friendly messages** - non-technical users should understand
//! - **Recovery hints** - suggest how to fix when possible

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum OrganizerError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Fingerprinting error: {0}")]
    Hash(#[from] HashError),

    #[error("Metadata error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Geocode cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Relocation error: {0}")]
    Relocate(#[from] RelocateError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that occur while enumerating the input tree
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while fingerprinting file content
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not an image or undecodable content: {path} ({reason})")]
    UnsupportedContent { path: PathBuf, reason: String },
}

/// Errors that occur while extracting capture metadata
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to open {path} for metadata extraction: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file times for {path}: {source}")]
    FileTimes {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the reverse-geocoding collaborator.
///
/// These never escape the geocode cache; they are retried and then
/// degraded to an `Unknown_Location` label.
#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Reverse-geocode request timed out")]
    Timeout,

    #[error("Reverse-geocode service error: {0}")]
    Service(String),
}

/// Errors from the durable geocode cache store
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to open cache file at {path}: {reason}")]
    OpenFailed { path: PathBuf, reason: String },

    #[error("Failed to write cache file at {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },
}

/// Errors that occur while moving a file to its destination
#[derive(Error, Debug)]
pub enum RelocateError {
    #[error("Source file not found: {path}")]
    SourceMissing { path: PathBuf },

    #[error("Failed to create directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move {source_path} to {dest_path}: {source}")]
    Move {
        source_path: PathBuf,
        dest_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Copy verification failed for {path}: source {expected} bytes, destination {actual} bytes")]
    VerifyFailed {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, OrganizerError>;
