//! # Hasher Module
//!
//! Computes a stable fingerprint for a file under a selectable strategy.
//!
//! ## Strategies
//! - **Exact** - streams the file through BLAKE3; any byte difference
//!   changes the digest. Works for every file kind.
//! - **Perceptual** - decodes the file as an image and computes a
//!   gradient hash tolerant to minor re-encoding/resizing. Fails for
//!   non-image content.
//!
//! Two files whose (strategy, digest) pairs are equal are duplicates.
//!
//! ## Example
//! ```rust,ignore
//! use media_organizer::core::hasher::{ContentHasher, FingerprintStrategy};
//!
//! let hasher = ContentHasher::new(FingerprintStrategy::Exact);
//! let fingerprint = hasher.fingerprint(&path)?;
//! ```

mod exact;
mod perceptual;

pub use exact::ExactHasher;
pub use perceptual::PerceptualHasher;

use crate::error::HashError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Selectable duplicate-comparison strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerprintStrategy {
    /// Byte-exact content hash (BLAKE3)
    Exact,
    /// Perceptual image hash (gradient)
    Perceptual,
}

impl std::fmt::Display for FingerprintStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FingerprintStrategy::Exact => write!(f, "exact"),
            FingerprintStrategy::Perceptual => write!(f, "perceptual"),
        }
    }
}

/// A (strategy, digest) pair identifying file content.
///
/// Computed once per file; immutable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    /// Strategy that produced the digest
    pub strategy: FingerprintStrategy,
    /// Opaque digest string
    pub digest: String,
}

impl Fingerprint {
    /// Create a fingerprint from a computed digest
    pub fn new(strategy: FingerprintStrategy, digest: String) -> Self {
        Self { strategy, digest }
    }
}

/// Trait for fingerprint implementations
pub trait FileHasher: Send + Sync {
    /// Compute a fingerprint for the file at `path`. Read-only.
    fn fingerprint(&self, path: &Path) -> Result<Fingerprint, HashError>;

    /// The strategy this hasher implements
    fn strategy(&self) -> FingerprintStrategy;
}

/// Strategy-dispatching content hasher
pub struct ContentHasher {
    inner: Box<dyn FileHasher>,
}

impl ContentHasher {
    /// Create a hasher for the given strategy
    pub fn new(strategy: FingerprintStrategy) -> Self {
        let inner: Box<dyn FileHasher> = match strategy {
            FingerprintStrategy::Exact => Box::new(ExactHasher::new()),
            FingerprintStrategy::Perceptual => Box::new(PerceptualHasher::new()),
        };
        Self { inner }
    }

    /// Compute a fingerprint for the file at `path`
    pub fn fingerprint(&self, path: &Path) -> Result<Fingerprint, HashError> {
        self.inner.fingerprint(path)
    }

    /// The configured strategy
    pub fn strategy(&self) -> FingerprintStrategy {
        self.inner.strategy()
    }
}
