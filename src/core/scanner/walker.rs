//! Directory walking implementation using walkdir.

use super::filter::ImageFilter;
use crate::error::ScanError;
use crate::events::{Event, EventSender, ScanEvent};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Configuration for image discovery
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Custom extensions to include (None = use defaults)
    pub extensions: Option<Vec<String>>,
    /// Exclude any path containing this substring (case-insensitive)
    pub exclude: Option<String>,
}

/// Recursively discovers image files under a root directory.
///
/// Unreadable entries are reported as `ScanEvent::Error` and skipped; only a
/// missing root aborts the scan.
pub struct ImageScanner {
    filter: ImageFilter,
}

impl ImageScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        let mut filter = ImageFilter::new().with_exclude(config.exclude);

        if let Some(extensions) = config.extensions {
            filter = filter.with_extensions(extensions);
        }

        Self { filter }
    }

    /// List every image file under `root` that passes the filter.
    pub fn scan(&self, root: &Path, events: &EventSender) -> Result<Vec<PathBuf>, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        events.send(Event::Scan(ScanEvent::Started {
            root: root.to_path_buf(),
        }));

        let mut files = Vec::new();

        for entry_result in WalkDir::new(root) {
            match entry_result {
                Ok(entry) => {
                    let path = entry.path();
                    if entry.file_type().is_file() && self.filter.should_include(path) {
                        files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    let path = e.path().map(|p| p.to_path_buf()).unwrap_or_default();

                    let error = if e.io_error().map(|io| io.kind())
                        == Some(std::io::ErrorKind::PermissionDenied)
                    {
                        ScanError::PermissionDenied { path: path.clone() }
                    } else {
                        ScanError::ReadEntry {
                            path: path.clone(),
                            source: std::io::Error::other(e.to_string()),
                        }
                    };

                    events.send(Event::Scan(ScanEvent::Error {
                        path,
                        message: error.to_string(),
                    }));
                }
            }
        }

        events.send(Event::Scan(ScanEvent::Completed {
            total_files: files.len(),
        }));

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::null_sender;
    use std::fs::{self, File};
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        File::create(&path).unwrap();
        path
    }

    #[test]
    fn scan_empty_directory_returns_empty_vec() {
        let temp_dir = TempDir::new().unwrap();
        let scanner = ImageScanner::new(ScanConfig::default());

        let files = scanner.scan(temp_dir.path(), &null_sender()).unwrap();

        assert!(files.is_empty());
    }

    #[test]
    fn scan_finds_images_and_skips_other_files() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "photo.jpg");
        touch(temp_dir.path(), "notes.txt");

        let scanner = ImageScanner::new(ScanConfig::default());
        let files = scanner.scan(temp_dir.path(), &null_sender()).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("photo.jpg"));
    }

    #[test]
    fn scan_traverses_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();

        touch(temp_dir.path(), "root.jpg");
        touch(&subdir, "nested.png");

        let scanner = ImageScanner::new(ScanConfig::default());
        let files = scanner.scan(temp_dir.path(), &null_sender()).unwrap();

        assert_eq!(files.len(), 2);
    }

    #[test]
    fn scan_skips_excluded_subfolder() {
        let temp_dir = TempDir::new().unwrap();
        let quarantine = temp_dir.path().join("duplicates");
        fs::create_dir(&quarantine).unwrap();

        touch(temp_dir.path(), "keep.jpg");
        touch(&quarantine, "moved.jpg");

        let config = ScanConfig {
            exclude: Some(quarantine.to_string_lossy().into_owned()),
            ..Default::default()
        };
        let scanner = ImageScanner::new(config);
        let files = scanner.scan(temp_dir.path(), &null_sender()).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("keep.jpg"));
    }

    #[test]
    fn scan_nonexistent_root_is_an_error() {
        let scanner = ImageScanner::new(ScanConfig::default());
        let result = scanner.scan(Path::new("/nonexistent/path/12345"), &null_sender());

        assert!(matches!(
            result,
            Err(ScanError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn scan_honours_custom_extensions() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "a.png");
        touch(temp_dir.path(), "b.jpg");

        let config = ScanConfig {
            extensions: Some(vec!["png".to_string()]),
            ..Default::default()
        };
        let scanner = ImageScanner::new(config);
        let files = scanner.scan(temp_dir.path(), &null_sender()).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("a.png"));
    }
}
