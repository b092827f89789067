//! # Error Module
//!
//! Error types for the duplicate image finder.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - Failures intrinsic to a single file are reported as events and never
//!   abort a batch; only configuration-level problems surface here

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum DupeFinderError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Fingerprinting error: {0}")]
    Fingerprint(#[from] FingerprintError),

    #[error("Relocation error: {0}")]
    Relocate(#[from] RelocateError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that occur during image discovery
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory entry {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while fingerprinting a single image
#[derive(Error, Debug)]
pub enum FingerprintError {
    #[error("Failed to open image file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Failed to start worker pool: {0}")]
    WorkerPool(String),
}

/// Errors that occur while moving duplicates into quarantine
#[derive(Error, Debug)]
pub enum RelocateError {
    #[error("Failed to create quarantine folder {path}: {source}")]
    CreateTarget {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, DupeFinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_error_includes_path() {
        let error = ScanError::DirectoryNotFound {
            path: PathBuf::from("/pictures/vacation"),
        };
        let message = error.to_string();
        assert!(message.contains("/pictures/vacation"));
    }

    #[test]
    fn fingerprint_error_includes_reason() {
        let error = FingerprintError::Decode {
            path: PathBuf::from("/pictures/broken.jpg"),
            reason: "invalid JPEG".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("/pictures/broken.jpg"));
        assert!(message.contains("invalid JPEG"));
    }

    #[test]
    fn config_error_wraps_message() {
        let error = DupeFinderError::Config("no file extensions selected".to_string());
        assert!(error.to_string().contains("no file extensions selected"));
    }
}
