//! # Image Dupe Finder
//!
//! Scans a directory tree for images, fingerprints them with a perceptual
//! hash, groups visually near-identical files under a Hamming-distance
//! tolerance, and quarantines the duplicates.
//!
//! ## Architecture
//! The library is split into a core engine (UI-agnostic) and presentation
//! layers:
//! - `core` - scanning, fingerprinting, classification, relocation
//! - `events` - event-driven progress reporting (GUI-ready)
//! - `error` - error types
//! - `cli` - command-line interface (lives in the binary)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{DupeFinderError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point (CLI or GUI).
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
