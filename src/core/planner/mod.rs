//! # Planner Module
//!
//! Derives a deterministic destination path and filename from a
//! capture timestamp, a resolved location, and a naming-convention
//! policy.
//!
//! `plan` is pure and total: given the same inputs it always yields
//! the same destination, performs no I/O, and never errors. An
//! unparseable timestamp falls back to the source file's modification
//! time, which the caller passes in.

use crate::core::geocode::{ResolvedLocation, UNKNOWN_LOCATION};
use crate::core::metadata::TIMESTAMP_FORMAT;
use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Policy governing which metadata fields appear in a filename
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingConvention {
    /// `<YYYYMMDD_HHMMSS>_<location>` (default)
    #[default]
    DateLocation,
    /// `<YYYYMMDD_HHMMSS>`
    Date,
    /// `<location>`
    Location,
}

/// A computed (directory, filename) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Always `<output_root>/<year>/<year>-<month>`
    pub directory: PathBuf,
    /// Stem per the naming convention; extension preserved verbatim
    pub filename: String,
}

impl Destination {
    /// The full destination path
    pub fn full_path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }
}

/// Compute the destination for one file.
///
/// `timestamp` is the canonical `YYYY:MM:DD HH:MM:SS` capture time;
/// `fallback` is the source file's modification time, used when the
/// timestamp is absent or unparseable. `extension` is the source
/// file's extension without the dot, preserved verbatim (empty for
/// extensionless files).
pub fn plan(
    timestamp: Option<&str>,
    fallback: NaiveDateTime,
    location: &ResolvedLocation,
    extension: &str,
    output_root: &Path,
    convention: NamingConvention,
) -> Destination {
    let date = timestamp
        .and_then(|ts| NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).ok())
        .unwrap_or(fallback);

    let directory = output_root
        .join(format!("{}", date.year()))
        .join(format!("{}-{:02}", date.year(), date.month()));

    let date_segment = date.format("%Y%m%d_%H%M%S").to_string();
    let location_segment = location_segment(location);

    let stem = match convention {
        NamingConvention::DateLocation => format!("{date_segment}_{location_segment}"),
        NamingConvention::Date => date_segment,
        NamingConvention::Location => location_segment,
    };

    let filename = if extension.is_empty() {
        stem
    } else {
        format!("{stem}.{extension}")
    };

    Destination {
        directory,
        filename,
    }
}

/// Filename-safe location segment: commas stripped, spaces replaced
/// with underscores; `Unknown_Location` when geocoding did not succeed
fn location_segment(location: &ResolvedLocation) -> String {
    if !location.found {
        return UNKNOWN_LOCATION.to_string();
    }
    location.label.replace(',', "").replace(' ', "_")
}
