//! # CLI Module
//!
//! Command-line interface for the media organizer.
//!
//! ## Usage
//! ```bash
//! # Organize into the default Pictures-based destinations
//! media-organize run ~/Pictures/incoming
//!
//! # Explicit destinations and perceptual duplicate matching
//! media-organize run ~/Pictures/incoming --output ~/Pictures/organized --strategy perceptual
//!
//! # JSON report for scripting
//! media-organize run ~/Pictures/incoming --format json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use media_organizer::core::geocode::{GeocodeCache, GeocodeStore};
use media_organizer::core::hasher::FingerprintStrategy;
use media_organizer::core::pipeline::{Organizer, RunOptions, RunReport, RunStatus};
use media_organizer::core::planner::NamingConvention;
use media_organizer::error::Result;
use media_organizer::events::{Event, EventChannel, FileEvent, RunControls, RunEvent};
use std::path::PathBuf;
use std::thread;

/// Media Organizer - Sort photos and videos by date and place
#[derive(Parser, Debug)]
#[command(name = "media-organize")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Organize a directory of media files
    Run {
        /// Directory to organize
        input: PathBuf,

        /// Destination root for organized files
        /// (default: <Pictures>/organized)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Destination for quarantined duplicates
        /// (default: <Pictures>/trash)
        #[arg(short, long)]
        trash: Option<PathBuf>,

        /// Duplicate detection strategy
        #[arg(short, long, default_value = "exact")]
        strategy: Strategy,

        /// Filename policy
        #[arg(short, long, default_value = "date-location")]
        naming: Naming,

        /// Report format
        #[arg(short, long, default_value = "pretty")]
        format: OutputFormat,

        /// Include hidden files
        #[arg(long)]
        include_hidden: bool,

        /// Print each file's outcome as it is processed
        #[arg(short, long)]
        verbose: bool,

        /// Geocode cache file path
        #[arg(long)]
        cache: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    /// Byte-for-byte content hash (default)
    Exact,
    /// Perceptual image hash, robust to re-encoding
    Perceptual,
}

impl From<Strategy> for FingerprintStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Exact => FingerprintStrategy::Exact,
            Strategy::Perceptual => FingerprintStrategy::Perceptual,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Naming {
    /// Timestamp plus location label (default)
    DateLocation,
    /// Timestamp only
    Date,
    /// Location label only
    Location,
}

impl From<Naming> for NamingConvention {
    fn from(naming: Naming) -> Self {
        match naming {
            Naming::DateLocation => NamingConvention::DateLocation,
            Naming::Date => NamingConvention::Date,
            Naming::Location => NamingConvention::Location,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
}

/// Run the CLI
pub fn run() -> Result<()> {
    media_organizer::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            output,
            trash,
            strategy,
            naming,
            format,
            include_hidden,
            verbose,
            cache,
        } => run_organize(
            input,
            output,
            trash,
            strategy.into(),
            naming.into(),
            format,
            include_hidden,
            verbose,
            cache,
        ),
    }
}

/// Base directory for default destinations: the user's Pictures
/// folder, falling back to the current directory
fn pictures_root() -> PathBuf {
    dirs::picture_dir().unwrap_or_else(|| PathBuf::from("."))
}

#[allow(clippy::too_many_arguments)]
fn run_organize(
    input: PathBuf,
    output: Option<PathBuf>,
    trash: Option<PathBuf>,
    strategy: FingerprintStrategy,
    naming: NamingConvention,
    format: OutputFormat,
    include_hidden: bool,
    verbose: bool,
    cache_path: Option<PathBuf>,
) -> Result<()> {
    let term = Term::stderr();

    // Print header
    if matches!(format, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("Media Organizer").bold().cyan(),
            style(env!("CARGO_PKG_VERSION")).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    // The geocode cache survives across runs
    let cache_path = cache_path.unwrap_or_else(|| {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("media-organizer")
            .join("geocache.json")
    });
    let store = GeocodeStore::open(&cache_path)?;

    let output = output.unwrap_or_else(|| pictures_root().join("organized"));
    let trash = trash.unwrap_or_else(|| pictures_root().join("trash"));

    let options = RunOptions {
        strategy,
        naming,
        included_extensions: None,
        include_hidden,
    };

    let organizer = Organizer::builder(&input, &output, &trash)
        .options(options)
        .geocode(GeocodeCache::offline(store))
        .build()?;

    // Set up event handling
    let (sender, receiver) = EventChannel::new();
    let controls = RunControls::new();

    // Progress bar for pretty output
    let progress = if matches!(format, OutputFormat::Pretty) {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();
    let term_clone = term.clone();

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            match event {
                Event::Run(RunEvent::Started { total_files }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_length(total_files as u64);
                    }
                }
                Event::Progress(p) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_position(p.processed as u64);
                    }
                }
                Event::Status { message } => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_message(message);
                    }
                }
                Event::File(file_event) if verbose => {
                    let line = match file_event {
                        FileEvent::Organized {
                            source,
                            destination,
                        } => format!(
                            "{} {} -> {}",
                            style("organized").green(),
                            source.display(),
                            destination.display()
                        ),
                        FileEvent::Duplicate { source, .. } => {
                            format!("{} {}", style("duplicate").yellow(), source.display())
                        }
                        FileEvent::Skipped { path, reason } => {
                            format!(
                                "{} {} ({})",
                                style("skipped").dim(),
                                path.display(),
                                reason
                            )
                        }
                    };
                    if let Some(ref pb) = progress_clone {
                        pb.println(line);
                    } else {
                        term_clone.write_line(&line).ok();
                    }
                }
                Event::Run(
                    RunEvent::Completed { .. }
                    | RunEvent::Cancelled { .. }
                    | RunEvent::Failed { .. },
                ) => {
                    if let Some(ref pb) = progress_clone {
                        pb.finish_and_clear();
                    }
                }
                _ => {}
            }
        }
    });

    // Run the pipeline
    let report = organizer.run(&sender, &controls);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();

    match format {
        OutputFormat::Pretty => print_pretty_report(&term, &report),
        OutputFormat::Json => print_json_report(&report),
    }

    Ok(())
}

fn print_pretty_report(term: &Term, report: &RunReport) {
    term.write_line("").ok();

    let status = match report.status {
        RunStatus::Completed => style("✓").green().bold().to_string(),
        RunStatus::Cancelled => style("◼").yellow().bold().to_string(),
        RunStatus::Failed => style("✗").red().bold().to_string(),
    };
    term.write_line(&format!("{} Run {}", status, report.status))
        .ok();
    term.write_line("").ok();

    let summary = &report.summary;
    term.write_line(&format!(
        "  {} files found in {:.1}s",
        style(summary.total_files).cyan(),
        summary.duration_ms as f64 / 1000.0
    ))
    .ok();
    term.write_line(&format!("  {} organized", style(summary.organized).cyan()))
        .ok();
    term.write_line(&format!(
        "  {} duplicates moved to trash",
        style(summary.duplicates).yellow()
    ))
    .ok();
    term.write_line(&format!("  {} skipped", style(summary.skipped).dim()))
        .ok();
    term.write_line("").ok();

    // Footer
    term.write_line(&format!(
        "{}",
        style("Remember: No files were deleted. Duplicates sit in the trash folder for review.")
            .dim()
    ))
    .ok();
}

fn print_json_report(report: &RunReport) {
    let output = serde_json::json!({
        "status": report.status,
        "total_files": report.summary.total_files,
        "organized": report.summary.organized,
        "duplicates": report.summary.duplicates,
        "skipped": report.summary.skipped,
        "duration_ms": report.summary.duration_ms,
        "log": report.log,
    });

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("failed to serialize report: {e}"),
    }
}
