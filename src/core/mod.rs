//! # Core Module
//!
//! The UI-agnostic duplicate detection engine.
//!
//! ## Modules
//! - `scanner` - discovers image files under a root directory
//! - `fingerprint` - computes 64-bit perceptual fingerprints in parallel
//! - `classify` - partitions fingerprints into uniques and duplicates
//! - `relocate` - moves duplicates into the quarantine folder
//! - `pipeline` - orchestrates scan, fingerprint and classify
//! - `cancel` - cooperative cancellation token

pub mod cancel;
pub mod classify;
pub mod fingerprint;
pub mod pipeline;
pub mod relocate;
pub mod scanner;

// Re-export commonly used types
pub use cancel::CancelToken;
pub use classify::{hamming_distance, GreedyClassifier, Partition};
pub use fingerprint::{FileFingerprint, FingerprintSource, PerceptualFingerprinter};
pub use pipeline::{Pipeline, ScanReport};
pub use relocate::{RelocateSummary, Relocator};
