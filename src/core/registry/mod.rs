//! # Registry Module
//!
//! Run-scoped duplicate classification.
//!
//! The registry owns the set of fingerprints seen so far in one run.
//! The first file observed with a given fingerprint is the original;
//! every later file with the same fingerprint is a duplicate. The set
//! is never persisted across runs.

use crate::core::hasher::Fingerprint;
use std::collections::HashSet;

/// Outcome of classifying a fingerprint against the run's history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// First file in this run with this fingerprint
    Original,
    /// A file with this fingerprint was already seen
    Duplicate,
}

/// Tracks fingerprints seen in the current run.
///
/// Single-threaded per run; `classify` is a single check-and-insert so
/// a future parallel variant only needs a lock around it.
#[derive(Debug, Default)]
pub struct DuplicateRegistry {
    seen: HashSet<Fingerprint>,
}

impl DuplicateRegistry {
    /// Create an empty registry for a new run
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a fingerprint, recording it if unseen
    pub fn classify(&mut self, fingerprint: Fingerprint) -> Classification {
        if self.seen.insert(fingerprint) {
            Classification::Original
        } else {
            Classification::Duplicate
        }
    }

    /// Number of distinct fingerprints seen so far
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether no fingerprints have been recorded yet
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hasher::FingerprintStrategy;

    fn fingerprint(digest: &str) -> Fingerprint {
        Fingerprint::new(FingerprintStrategy::Exact, digest.to_string())
    }

    #[test]
    fn first_sighting_is_original() {
        let mut registry = DuplicateRegistry::new();
        assert_eq!(
            registry.classify(fingerprint("abc")),
            Classification::Original
        );
    }

    #[test]
    fn second_sighting_is_duplicate() {
        let mut registry = DuplicateRegistry::new();
        registry.classify(fingerprint("abc"));
        assert_eq!(
            registry.classify(fingerprint("abc")),
            Classification::Duplicate
        );
    }

    #[test]
    fn distinct_digests_are_independent() {
        let mut registry = DuplicateRegistry::new();
        registry.classify(fingerprint("abc"));
        assert_eq!(
            registry.classify(fingerprint("def")),
            Classification::Original
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn same_digest_under_different_strategy_is_original() {
        let mut registry = DuplicateRegistry::new();
        registry.classify(Fingerprint::new(
            FingerprintStrategy::Exact,
            "abc".to_string(),
        ));
        assert_eq!(
            registry.classify(Fingerprint::new(
                FingerprintStrategy::Perceptual,
                "abc".to_string(),
            )),
            Classification::Original
        );
    }
}
