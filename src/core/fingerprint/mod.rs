//! # Fingerprint Module
//!
//! Computes 64-bit perceptual fingerprints for image files.
//!
//! ## How It Works
//! 1. Decode the image (zune-jpeg fast path for JPEGs, `image` crate
//!    otherwise)
//! 2. DCT-preprocess and mean-hash at 8x8 via `image_hasher`
//! 3. Pack the 64 hash bits into a `u64`
//!
//! Fingerprints of visually similar images differ in few bits, so similarity
//! is measured by Hamming distance. The `FingerprintSource` trait is the seam
//! between the parallel pipeline and the actual image decoding, which also
//! lets tests substitute a deterministic stub.

mod decode;
mod perceptual;
mod pipeline;

pub use perceptual::PerceptualFingerprinter;
pub use pipeline::{FingerprintBatch, FingerprintPipeline};

use crate::error::FingerprintError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A fingerprinted image file.
///
/// Produced at most once per input path; immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFingerprint {
    /// Path to the image file
    pub path: PathBuf,
    /// 64-bit perceptual fingerprint
    pub hash: u64,
}

/// Produces a perceptual fingerprint for an image file.
///
/// Implementations must be deterministic for a given image's pixel content;
/// classification is only reproducible across runs if the fingerprints are.
pub trait FingerprintSource: Send + Sync {
    /// Compute the fingerprint, or fail if the file is not a decodable image.
    fn fingerprint(&self, path: &Path) -> Result<u64, FingerprintError>;
}
