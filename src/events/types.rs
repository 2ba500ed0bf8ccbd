//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the organization pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Run lifecycle events
    Run(RunEvent),
    /// Per-file outcome events
    File(FileEvent),
    /// Progress update (processed/total as a percentage)
    Progress(ProgressUpdate),
    /// Human-readable status line (current file being processed)
    Status { message: String },
    /// Log line for the caller's log pane
    Log { message: String },
}

/// Run lifecycle events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RunEvent {
    /// The run has started; total files computed up front
    Started { total_files: usize },
    /// The run suspended at a file boundary
    Paused,
    /// The run resumed from the next unprocessed file
    Resumed,
    /// All files were processed
    Completed { summary: RunSummary },
    /// The run stopped on a cancel request; processed files stay in place
    Cancelled { processed: usize },
    /// An unexpected error escaped the run loop
    Failed { message: String },
}

/// Per-file outcome events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FileEvent {
    /// An original was relocated to its computed destination
    Organized {
        source: PathBuf,
        destination: PathBuf,
    },
    /// A duplicate was quarantined under the trash root
    Duplicate {
        source: PathBuf,
        trash_path: PathBuf,
    },
    /// The file was skipped; it remains at its source path
    Skipped { path: PathBuf, reason: String },
}

/// Progress information, emitted after each file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Number of files processed so far
    pub processed: usize,
    /// Total number of files in this run
    pub total: usize,
    /// Completion percentage (0-100)
    pub percent: f64,
}

impl ProgressUpdate {
    /// Build a progress update from raw counts
    pub fn new(processed: usize, total: usize) -> Self {
        let percent = if total == 0 {
            100.0
        } else {
            (processed as f64 / total as f64) * 100.0
        };
        Self {
            processed,
            total,
            percent,
        }
    }
}

/// Summary of a completed run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Total files enumerated
    pub total_files: usize,
    /// Originals relocated into the output tree
    pub organized: usize,
    /// Duplicates moved to the trash root
    pub duplicates: usize,
    /// Files skipped (unsupported, unreadable, unmovable)
    pub skipped: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_serializable() {
        let event = Event::Progress(ProgressUpdate::new(50, 100));

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();

        match deserialized {
            Event::Progress(p) => {
                assert_eq!(p.processed, 50);
                assert_eq!(p.percent, 50.0);
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn progress_with_zero_total_is_complete() {
        let progress = ProgressUpdate::new(0, 0);
        assert_eq!(progress.percent, 100.0);
    }

    #[test]
    fn run_summary_is_serializable() {
        let summary = RunSummary {
            total_files: 100,
            organized: 80,
            duplicates: 15,
            skipped: 5,
            duration_ms: 5000,
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("5000"));
    }
}
