//! Pipeline execution implementation.

use crate::core::geocode::{GeocodeCache, GeocodeStore, ResolvedLocation};
use crate::core::hasher::{ContentHasher, FingerprintStrategy};
use crate::core::metadata::{mtime_naive, MetadataResolver};
use crate::core::planner::{self, NamingConvention};
use crate::core::registry::{Classification, DuplicateRegistry};
use crate::core::relocate::Relocator;
use crate::core::scanner::{MediaFile, MediaKind, MediaScanner, ScanConfig, WalkDirScanner};
use crate::error::OrganizerError;
use crate::events::{
    Event, EventSender, FileEvent, ProgressUpdate, RunControls, RunEvent, RunSummary,
};
use serde::{Deserialize, Serialize};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Poll interval while waiting in the paused state
const PAUSE_POLL: Duration = Duration::from_millis(50);

/// Options for one pipeline invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOptions {
    /// Duplicate-comparison strategy
    pub strategy: FingerprintStrategy,
    /// Filename policy
    pub naming: NamingConvention,
    /// Restrict supported extensions (None = defaults)
    pub included_extensions: Option<Vec<String>>,
    /// Include hidden files and directories
    pub include_hidden: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            strategy: FingerprintStrategy::Exact,
            naming: NamingConvention::default(),
            included_extensions: None,
            include_hidden: false,
        }
    }
}

/// Terminal state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// All files processed
    Completed,
    /// Stopped on a cancel request; processed files remain in place
    Cancelled,
    /// An unexpected error escaped the run
    Failed,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Completed => write!(f, "Completed"),
            RunStatus::Cancelled => write!(f, "Cancelled"),
            RunStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// Aggregated outcome of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Terminal state
    pub status: RunStatus,
    /// Counts and duration
    pub summary: RunSummary,
    /// Every skip, failure, and success, in processing order
    pub log: Vec<String>,
}

/// Counters and status for a run in progress.
///
/// Owned by the runner; the caller observes it only through events.
#[derive(Debug, Default)]
struct RunState {
    processed: usize,
    total: usize,
    organized: usize,
    duplicates: usize,
    skipped: usize,
}

/// Outcome of processing a single file
enum FileOutcome {
    Organized(PathBuf),
    Duplicate(PathBuf),
    Skipped(String),
}

/// Builder for an [`Organizer`]
pub struct OrganizerBuilder {
    input_dir: PathBuf,
    output_dir: PathBuf,
    trash_dir: PathBuf,
    options: RunOptions,
    geocode: Option<GeocodeCache>,
}

impl OrganizerBuilder {
    /// Set pipeline options
    pub fn options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the geocode cache (provider + durable store)
    pub fn geocode(mut self, geocode: GeocodeCache) -> Self {
        self.geocode = Some(geocode);
        self
    }

    /// Validate directories and build the organizer
    pub fn build(self) -> Result<Organizer, OrganizerError> {
        if !self.input_dir.is_dir() {
            return Err(OrganizerError::Config(format!(
                "input directory does not exist: {}",
                self.input_dir.display()
            )));
        }

        Ok(Organizer {
            input_dir: self.input_dir,
            output_dir: self.output_dir,
            trash_dir: self.trash_dir,
            options: self.options,
            geocode: self
                .geocode
                .unwrap_or_else(|| GeocodeCache::offline(GeocodeStore::in_memory())),
        })
    }
}

/// Runs the media organization pipeline over one input tree.
///
/// One organizer performs one run: `run` consumes it, so run-scoped
/// state (the duplicate registry, the counters) can never leak into a
/// second invocation.
pub struct Organizer {
    input_dir: PathBuf,
    output_dir: PathBuf,
    trash_dir: PathBuf,
    options: RunOptions,
    geocode: GeocodeCache,
}

impl Organizer {
    /// Start building an organizer for the three run directories
    pub fn builder(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        trash_dir: impl Into<PathBuf>,
    ) -> OrganizerBuilder {
        OrganizerBuilder {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            trash_dir: trash_dir.into(),
            options: RunOptions::default(),
            geocode: None,
        }
    }

    /// Run the pipeline to a terminal state.
    ///
    /// Every per-file error is recovered locally; only a panic escaping
    /// the loop produces the `Failed` status, reported exactly once.
    pub fn run(self, events: &EventSender, controls: &RunControls) -> RunReport {
        let events_clone = events.clone();
        let result = catch_unwind(AssertUnwindSafe(move || {
            self.run_inner(&events_clone, controls)
        }));

        match result {
            Ok(report) => report,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(message, "run failed with an unexpected error");
                events.send(Event::Run(RunEvent::Failed {
                    message: message.to_string(),
                }));
                RunReport {
                    status: RunStatus::Failed,
                    summary: RunSummary::default(),
                    log: vec![format!("Run failed: {message}")],
                }
            }
        }
    }

    fn run_inner(mut self, events: &EventSender, controls: &RunControls) -> RunReport {
        let start = Instant::now();
        let mut log = Vec::new();

        info!(
            input = %self.input_dir.display(),
            output = %self.output_dir.display(),
            trash = %self.trash_dir.display(),
            "starting organization"
        );

        // Total count is computed up front for progress percentages
        let scan_config = ScanConfig {
            include_hidden: self.options.include_hidden,
            included_extensions: self.options.included_extensions.clone(),
            ..Default::default()
        };
        let scanner = WalkDirScanner::new(scan_config);
        let scan = match scanner.scan(&self.input_dir) {
            Ok(scan) => scan,
            Err(e) => {
                error!(error = %e, "enumeration failed");
                events.send(Event::Run(RunEvent::Failed {
                    message: e.to_string(),
                }));
                return RunReport {
                    status: RunStatus::Failed,
                    summary: RunSummary::default(),
                    log: vec![format!("Enumeration failed: {e}")],
                };
            }
        };

        for scan_error in &scan.errors {
            warn!(error = %scan_error, "enumeration warning");
            log.push(format!("Enumeration warning: {scan_error}"));
        }

        let mut state = RunState {
            total: scan.files.len(),
            ..Default::default()
        };

        events.send(Event::Run(RunEvent::Started {
            total_files: state.total,
        }));

        let hasher = ContentHasher::new(self.options.strategy);
        let resolver = MetadataResolver::new();
        let relocator = Relocator::new();
        let mut registry = DuplicateRegistry::new();

        let mut cancelled = false;

        for file in &scan.files {
            // Cooperative control, checked once per file boundary
            if controls.cancel_requested() {
                cancelled = true;
                break;
            }
            if controls.pause_requested() {
                events.send(Event::Run(RunEvent::Paused));
                events.status("Paused");
                loop {
                    if controls.cancel_requested() {
                        cancelled = true;
                        break;
                    }
                    if !controls.pause_requested() {
                        events.send(Event::Run(RunEvent::Resumed));
                        break;
                    }
                    thread::sleep(PAUSE_POLL);
                }
                if cancelled {
                    break;
                }
            }

            let filename = file
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            events.status(&filename);

            let outcome = self.process_file(file, &hasher, &resolver, &relocator, &mut registry);

            let line = match &outcome {
                FileOutcome::Organized(destination) => {
                    state.organized += 1;
                    events.send(Event::File(FileEvent::Organized {
                        source: file.path.clone(),
                        destination: destination.clone(),
                    }));
                    match file.kind {
                        MediaKind::Video => format!("Video processed: {}", destination.display()),
                        _ => format!("Image processed: {}", destination.display()),
                    }
                }
                FileOutcome::Duplicate(trash_path) => {
                    state.duplicates += 1;
                    events.send(Event::File(FileEvent::Duplicate {
                        source: file.path.clone(),
                        trash_path: trash_path.clone(),
                    }));
                    format!("Duplicate moved to trash: {}", file.path.display())
                }
                FileOutcome::Skipped(reason) => {
                    state.skipped += 1;
                    events.send(Event::File(FileEvent::Skipped {
                        path: file.path.clone(),
                        reason: reason.clone(),
                    }));
                    format!("Skipping ({reason}): {}", file.path.display())
                }
            };
            events.log(&line);
            log.push(line);

            state.processed += 1;
            events.send(Event::Progress(ProgressUpdate::new(
                state.processed,
                state.total,
            )));
        }

        let summary = RunSummary {
            total_files: state.total,
            organized: state.organized,
            duplicates: state.duplicates,
            skipped: state.skipped,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        if cancelled {
            info!(processed = state.processed, "run cancelled");
            events.log("Organization cancelled.");
            events.send(Event::Run(RunEvent::Cancelled {
                processed: state.processed,
            }));
            log.push("Organization cancelled.".to_string());
            return RunReport {
                status: RunStatus::Cancelled,
                summary,
                log,
            };
        }

        info!(
            organized = summary.organized,
            duplicates = summary.duplicates,
            skipped = summary.skipped,
            "organization completed"
        );
        events.log("Organization completed.");
        events.send(Event::Run(RunEvent::Completed {
            summary: summary.clone(),
        }));
        log.push("Organization completed.".to_string());

        RunReport {
            status: RunStatus::Completed,
            summary,
            log,
        }
    }

    /// The full per-file sequence: duplicate check, metadata, geocode,
    /// plan, relocate. Every error is absorbed into the outcome.
    fn process_file(
        &mut self,
        file: &MediaFile,
        hasher: &ContentHasher,
        resolver: &MetadataResolver,
        relocator: &Relocator,
        registry: &mut DuplicateRegistry,
    ) -> FileOutcome {
        // Duplicate detection first; a hashing failure means we cannot
        // prove the file is a duplicate, so it is treated as original
        match hasher.fingerprint(&file.path) {
            Ok(fingerprint) => {
                if registry.classify(fingerprint) == Classification::Duplicate {
                    return match relocator.quarantine(&file.path, &self.trash_dir) {
                        Ok(trash_path) => FileOutcome::Duplicate(trash_path),
                        Err(e) => {
                            warn!(path = %file.path.display(), error = %e, "quarantine failed");
                            FileOutcome::Skipped(format!("quarantine failed: {e}"))
                        }
                    };
                }
            }
            Err(e) => {
                warn!(path = %file.path.display(), error = %e, "fingerprint failed; treating as original");
            }
        }

        if !file.kind.is_supported() {
            return FileOutcome::Skipped("unsupported format".to_string());
        }

        let metadata = match resolver.extract(file) {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!(path = %file.path.display(), error = %e, "metadata extraction failed");
                return FileOutcome::Skipped(format!("metadata extraction failed: {e}"));
            }
        };

        // Videos never carry GPS, so this degrades to Unknown_Location
        // without an external call
        let location = if metadata.gps.is_some() {
            self.geocode.resolve(metadata.gps)
        } else {
            ResolvedLocation::unknown()
        };

        let extension = file
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        let destination = planner::plan(
            metadata.timestamp.as_deref(),
            mtime_naive(file.modified),
            &location,
            extension,
            &self.output_dir,
            self.options.naming,
        );

        match relocator.place(&file.path, &destination) {
            Ok(new_path) => FileOutcome::Organized(new_path),
            Err(e) => {
                warn!(path = %file.path.display(), error = %e, "relocation failed");
                FileOutcome::Skipped(format!("relocation failed: {e}"))
            }
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
