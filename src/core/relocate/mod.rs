//! # Relocate Module
//!
//! Moves classified duplicates into the quarantine folder.
//!
//! Destinations keep the source basename; a name collision gets an
//! 8-character token from a fresh v4 UUID inserted between stem and
//! extension, so no pre-existing file is ever overwritten and two duplicates
//! sharing a basename from different subdirectories both survive. No undo
//! log is persisted; the `Moved { from, to }` events are the only record of
//! the mapping.

use crate::error::RelocateError;
use crate::events::{Event, EventSender, RelocateEvent};
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Summary of a relocation run
#[derive(Debug, Clone, Default)]
pub struct RelocateSummary {
    /// Files moved into the quarantine folder
    pub moved: usize,
    /// Sources that vanished between classification and relocation
    pub skipped: usize,
    /// Moves that failed (logged, never fatal)
    pub failed: usize,
}

/// Moves duplicate files into a target folder.
pub struct Relocator {
    target: PathBuf,
}

impl Relocator {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// The folder duplicates are moved into.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Move every file in `duplicates`, in input order.
    ///
    /// The target folder is created if missing; that is the only fatal
    /// error. A vanished source is skipped, a failed move is logged, and
    /// in both cases the remaining files are still processed.
    pub fn relocate(
        &self,
        duplicates: &[PathBuf],
        events: &EventSender,
    ) -> Result<RelocateSummary, RelocateError> {
        let mut summary = RelocateSummary::default();

        if duplicates.is_empty() {
            return Ok(summary);
        }

        fs::create_dir_all(&self.target).map_err(|e| RelocateError::CreateTarget {
            path: self.target.clone(),
            source: e,
        })?;

        events.send(Event::Relocate(RelocateEvent::Started {
            total: duplicates.len(),
            target: self.target.clone(),
        }));

        for source in duplicates {
            if !source.exists() {
                summary.skipped += 1;
                events.send(Event::Relocate(RelocateEvent::SkippedMissing {
                    path: source.clone(),
                }));
                continue;
            }

            let Some(file_name) = source.file_name() else {
                summary.failed += 1;
                events.send(Event::Relocate(RelocateEvent::Failed {
                    path: source.clone(),
                    message: "path has no file name".to_string(),
                }));
                continue;
            };

            let dest = self.unique_destination(file_name);

            match move_file(source, &dest) {
                Ok(()) => {
                    summary.moved += 1;
                    events.send(Event::Relocate(RelocateEvent::Moved {
                        from: source.clone(),
                        to: dest,
                    }));
                }
                Err(e) => {
                    summary.failed += 1;
                    events.send(Event::Relocate(RelocateEvent::Failed {
                        path: source.clone(),
                        message: e.to_string(),
                    }));
                }
            }
        }

        events.send(Event::Relocate(RelocateEvent::Completed {
            moved: summary.moved,
            skipped: summary.skipped,
            failed: summary.failed,
        }));

        Ok(summary)
    }

    /// Pick a destination under the target that does not exist yet.
    fn unique_destination(&self, file_name: &OsStr) -> PathBuf {
        let mut dest = self.target.join(file_name);

        while dest.exists() {
            let name = Path::new(file_name);
            let stem = name
                .file_stem()
                .unwrap_or(file_name)
                .to_string_lossy()
                .into_owned();
            let ext = name
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_default();
            let token = Uuid::new_v4().simple().to_string();
            dest = self.target.join(format!("{}_{}{}", stem, &token[..8], ext));
        }

        dest
    }
}

/// Rename, falling back to copy + delete for cross-device moves.
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    fs::rename(from, to).or_else(|_| {
        // Verify the copy before deleting the source
        let source_size = fs::metadata(from)?.len();
        fs::copy(from, to)?;

        let dest_size = fs::metadata(to)?.len();
        if dest_size != source_size {
            let _ = fs::remove_file(to);
            return Err(io::Error::other(format!(
                "copy verification failed: source {} bytes, dest {} bytes",
                source_size, dest_size
            )));
        }

        fs::remove_file(from)
    })
}
