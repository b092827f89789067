//! File filtering logic for the scanner.

use std::collections::HashSet;
use std::path::Path;

/// Default extensions considered image files.
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "webp", "tiff"];

/// Decides which files count as scannable images.
///
/// Matching is case-insensitive for both the extension allow-list and the
/// exclusion substring (used to keep the quarantine folder out of re-scans).
pub struct ImageFilter {
    extensions: HashSet<String>,
    exclude: Option<String>,
}

impl ImageFilter {
    /// Create a new filter with the default supported extensions
    pub fn new() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            exclude: None,
        }
    }

    /// Override the list of extensions to accept.
    ///
    /// A leading dot is tolerated, so both `jpg` and `.jpg` work.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    /// Exclude any path containing this substring (case-insensitive)
    pub fn with_exclude(mut self, exclude: Option<String>) -> Self {
        self.exclude = exclude.map(|e| e.to_lowercase());
        self
    }

    /// Check if a file should be included
    pub fn should_include(&self, path: &Path) -> bool {
        if let Some(ref exclude) = self.exclude {
            if path.to_string_lossy().to_lowercase().contains(exclude) {
                return false;
            }
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self.extensions.contains(&ext.to_lowercase()),
            None => false,
        }
    }
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self::new()
    }
}
