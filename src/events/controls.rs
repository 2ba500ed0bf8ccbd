//! Cooperative pause/cancel flags for a pipeline run.
//!
//! The pipeline worker polls these at the per-file loop boundary; the
//! caller flips them from its own thread. No preemptive interruption:
//! a file in progress always completes before a pause or cancel takes
//! effect.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared pause/cancel signaling for one run.
///
/// Cheap to clone; all clones observe the same flags.
#[derive(Clone, Debug, Default)]
pub struct RunControls {
    pause: Arc<AtomicBool>,
    cancel: Arc<AtomicBool>,
}

impl RunControls {
    /// Create a fresh set of controls with both flags clear
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that the run suspend after the file in progress
    pub fn request_pause(&self) {
        self.pause.store(true, Ordering::SeqCst);
    }

    /// Clear the pause flag so the run continues with the next file
    pub fn resume(&self) {
        self.pause.store(false, Ordering::SeqCst);
    }

    /// Request that the run stop before starting the next file
    pub fn request_cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    /// Whether a pause is currently requested
    pub fn pause_requested(&self) -> bool {
        self.pause.load(Ordering::SeqCst)
    }

    /// Whether a cancel is currently requested
    pub fn cancel_requested(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_controls_have_no_requests() {
        let controls = RunControls::new();
        assert!(!controls.pause_requested());
        assert!(!controls.cancel_requested());
    }

    #[test]
    fn pause_and_resume_round_trip() {
        let controls = RunControls::new();

        controls.request_pause();
        assert!(controls.pause_requested());

        controls.resume();
        assert!(!controls.pause_requested());
    }

    #[test]
    fn clones_observe_the_same_flags() {
        let controls = RunControls::new();
        let observer = controls.clone();

        controls.request_cancel();
        assert!(observer.cancel_requested());
    }
}
