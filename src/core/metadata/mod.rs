//! # Metadata Module
//!
//! Extracts the capture timestamp and GPS coordinates from a media
//! file.
//!
//! ## Sources
//! - Images: the EXIF tag set, preferring `DateTimeOriginal`, then
//!   `CreateDate` (DateTimeDigitized), then `ModifyDate` (DateTime).
//!   GPS rationals or exiftool-style DMS strings normalize to signed
//!   decimal degrees (South and West are negative).
//! - Videos: the MP4/MOV container creation time. GPS is not expected
//!   from video containers.
//!
//! A file that cannot be opened fails with `ExtractError`; a readable
//! file with no usable tags yields empty metadata and the planner
//! falls back to the file's own modification time.

use crate::core::scanner::{MediaFile, MediaKind};
use crate::error::ExtractError;
use chrono::{DateTime, Local, NaiveDateTime};
use exif::{In, Reader, Tag, Value};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::OnceLock;
use std::time::SystemTime;
use tracing::debug;

/// Canonical timestamp form carried through the pipeline
pub const TIMESTAMP_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Seconds between the MP4 epoch (1904-01-01) and the Unix epoch
const SECONDS_FROM_1904_TO_1970: u64 = 2_082_844_800;

/// A decimal-degree coordinate pair (South and West negative)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Capture metadata for one file, derived once and never mutated
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaptureMetadata {
    /// Capture timestamp in `YYYY:MM:DD HH:MM:SS` form, if recorded
    pub timestamp: Option<String>,
    /// GPS coordinates, if recorded (always absent for video)
    pub gps: Option<Coordinates>,
}

/// Resolves capture metadata per file kind
pub struct MetadataResolver;

impl MetadataResolver {
    pub fn new() -> Self {
        Self
    }

    /// Extract capture metadata for a discovered media file
    pub fn extract(&self, file: &MediaFile) -> Result<CaptureMetadata, ExtractError> {
        match file.kind {
            MediaKind::Image => self.extract_image(&file.path),
            MediaKind::Video => Ok(self.extract_video(&file.path)),
            MediaKind::Unsupported => Ok(CaptureMetadata::default()),
        }
    }

    /// Read the EXIF tag set of an image
    fn extract_image(&self, path: &Path) -> Result<CaptureMetadata, ExtractError> {
        let file = File::open(path).map_err(|e| ExtractError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut bufreader = BufReader::new(&file);
        let exif = match Reader::new().read_from_container(&mut bufreader) {
            Ok(exif) => exif,
            Err(e) => {
                // No EXIF container; the planner falls back to mtime
                debug!(path = %path.display(), error = %e, "no EXIF data");
                return Ok(CaptureMetadata::default());
            }
        };

        let timestamp = [Tag::DateTimeOriginal, Tag::DateTimeDigitized, Tag::DateTime]
            .iter()
            .find_map(|tag| {
                exif.get_field(*tag, In::PRIMARY)
                    .and_then(|field| ascii_value(&field.value))
            });

        let latitude = gps_coordinate(&exif, Tag::GPSLatitude, Tag::GPSLatitudeRef);
        let longitude = gps_coordinate(&exif, Tag::GPSLongitude, Tag::GPSLongitudeRef);

        let gps = match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        };

        Ok(CaptureMetadata { timestamp, gps })
    }

    /// Read the container creation time of a video.
    ///
    /// Only MP4-family containers carry a parseable date here; other
    /// containers (and unparseable files) yield empty metadata so the
    /// planner falls back to mtime.
    fn extract_video(&self, path: &Path) -> CaptureMetadata {
        let timestamp = container_creation_time(path)
            // Muxers write zero when the capture time is unknown
            .filter(|&creation| creation != 0)
            .and_then(|creation| {
                let unix_secs = creation.saturating_sub(SECONDS_FROM_1904_TO_1970);
                DateTime::from_timestamp(unix_secs as i64, 0)
                    .map(|dt| dt.naive_utc().format(TIMESTAMP_FORMAT).to_string())
            });

        if timestamp.is_none() {
            debug!(path = %path.display(), "no container date; will fall back to mtime");
        }

        CaptureMetadata {
            timestamp,
            gps: None,
        }
    }
}

impl Default for MetadataResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a file modification time into the planner's fallback form
pub fn mtime_naive(modified: SystemTime) -> NaiveDateTime {
    DateTime::<Local>::from(modified).naive_local()
}

/// Movie-header creation time of an MP4-family container, in seconds
/// since the MP4 epoch (1904-01-01). `None` when the file is not a
/// parseable MP4/MOV.
fn container_creation_time(path: &Path) -> Option<u64> {
    let file = File::open(path).ok()?;
    let size = file.metadata().ok()?.len();
    let reader = mp4::Mp4Reader::read_header(BufReader::new(file), size).ok()?;
    Some(reader.moov.mvhd.creation_time)
}

/// Read one GPS coordinate (value + hemisphere reference) from the tag set
fn gps_coordinate(exif: &exif::Exif, value_tag: Tag, ref_tag: Tag) -> Option<f64> {
    let value_field = exif.get_field(value_tag, In::PRIMARY)?;
    let reference = exif
        .get_field(ref_tag, In::PRIMARY)
        .and_then(|field| ascii_value(&field.value))
        .unwrap_or_default();

    match &value_field.value {
        Value::Rational(parts) if !parts.is_empty() => {
            let degrees = parts.first().map(|r| r.to_f64()).unwrap_or(0.0);
            let minutes = parts.get(1).map(|r| r.to_f64()).unwrap_or(0.0);
            let seconds = parts.get(2).map(|r| r.to_f64()).unwrap_or(0.0);
            let decimal = degrees + minutes / 60.0 + seconds / 3600.0;
            Some(apply_hemisphere(decimal, &reference))
        }
        Value::Ascii(_) => {
            let raw = ascii_value(&value_field.value)?;
            convert_to_decimal(&raw, &reference)
        }
        _ => None,
    }
}

/// Normalize a coordinate string to signed decimal degrees.
///
/// Accepts plain decimals (`"40.810936"`) and exiftool-style DMS
/// strings (`"40 deg 48' 39.37\" N"`). The hemisphere reference may be
/// a single letter or a full word; South and West negate the value.
pub fn convert_to_decimal(value: &str, reference: &str) -> Option<f64> {
    static DMS_PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = DMS_PATTERN.get_or_init(|| {
        Regex::new(r#"^\s*(\d+(?:\.\d+)?)\s*deg\s*(\d+(?:\.\d+)?)'\s*(\d+(?:\.\d+)?)"\s*([NSEW])?\s*$"#)
            .expect("DMS pattern is valid")
    });

    let trimmed = value.trim();

    if let Ok(decimal) = trimmed.parse::<f64>() {
        return Some(apply_hemisphere(decimal, reference));
    }

    let captures = pattern.captures(trimmed)?;
    let degrees: f64 = captures[1].parse().ok()?;
    let minutes: f64 = captures[2].parse().ok()?;
    let seconds: f64 = captures[3].parse().ok()?;
    let decimal = degrees + minutes / 60.0 + seconds / 3600.0;

    // Hemisphere may ride in the string itself or in the reference tag
    let hemisphere = captures
        .get(4)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| reference.to_string());

    Some(apply_hemisphere(decimal, &hemisphere))
}

/// Negate for the southern/western hemisphere
fn apply_hemisphere(decimal: f64, reference: &str) -> f64 {
    match reference.trim().chars().next() {
        Some('S') | Some('s') | Some('W') | Some('w') => -decimal,
        _ => decimal,
    }
}

/// First ASCII string carried by an EXIF value
fn ascii_value(value: &Value) -> Option<String> {
    if let Value::Ascii(ref vec) = value {
        if let Some(bytes) = vec.first() {
            if let Ok(s) = std::str::from_utf8(bytes) {
                let trimmed = s.trim_end_matches('\0').trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
    }
    None
}
