//! # Pipeline Module
//!
//! Orchestrates the media organization workflow.
//!
//! ## Per-File Sequence
//! 1. **Fingerprint** - hash content under the configured strategy
//! 2. **Classify** - duplicate files route to the trash root
//! 3. **Extract** - capture timestamp and GPS for originals
//! 4. **Resolve** - GPS to a place label through the geocode cache
//! 5. **Plan** - deterministic destination path
//! 6. **Relocate** - move into the output tree
//!
//! The run is a single sequential worker; the caller pauses, resumes,
//! or cancels through cooperative flags checked at file boundaries,
//! and observes progress through the event channel.

mod executor;

pub use executor::{Organizer, OrganizerBuilder, RunOptions, RunReport, RunStatus};
