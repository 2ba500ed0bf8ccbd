//! Perceptual fingerprinting via a gradient image hash.
//!
//! Tolerant to minor re-encoding and resizing; two re-saves of the
//! same photo normally produce the same digest. Non-image content
//! fails with `UnsupportedContent` and the caller decides fallback
//! policy.

use super::{FileHasher, Fingerprint, FingerprintStrategy};
use crate::error::HashError;
use image_hasher::{HashAlg, Hasher, HasherConfig};
use std::path::Path;

/// Hash grid width/height; 16x16 gives a 256-bit hash
const HASH_SIZE: u32 = 16;

/// Decodes images and computes a gradient hash
pub struct PerceptualHasher {
    hasher: Hasher,
}

impl PerceptualHasher {
    pub fn new() -> Self {
        let hasher = HasherConfig::new()
            .hash_alg(HashAlg::Gradient)
            .hash_size(HASH_SIZE, HASH_SIZE)
            .to_hasher();
        Self { hasher }
    }
}

impl Default for PerceptualHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl FileHasher for PerceptualHasher {
    fn fingerprint(&self, path: &Path) -> Result<Fingerprint, HashError> {
        let image = image::open(path).map_err(|e| match e {
            image::ImageError::IoError(io) => HashError::Io {
                path: path.to_path_buf(),
                source: io,
            },
            other => HashError::UnsupportedContent {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        })?;

        let hash = self.hasher.hash_image(&image);

        Ok(Fingerprint::new(
            FingerprintStrategy::Perceptual,
            hash.to_base64(),
        ))
    }

    fn strategy(&self) -> FingerprintStrategy {
        FingerprintStrategy::Perceptual
    }
}
