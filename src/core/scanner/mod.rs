//! # Scanner Module
//!
//! Discovers image files under a root directory.
//!
//! Filtering is by a case-insensitive extension allow-list (defaults:
//! `.jpg .jpeg .png .bmp .webp .tiff`) plus an optional case-insensitive
//! path-substring exclusion, which the pipeline uses to keep the quarantine
//! folder out of subsequent scans.

mod filter;
mod walker;

pub use filter::{ImageFilter, DEFAULT_EXTENSIONS};
pub use walker::{ImageScanner, ScanConfig};
