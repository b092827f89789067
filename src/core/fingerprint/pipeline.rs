//! Bounded-parallel fingerprinting of a file list.

use super::{FileFingerprint, FingerprintSource};
use crate::core::cancel::CancelToken;
use crate::error::FingerprintError;
use crate::events::{Event, EventSender, FingerprintEvent, FingerprintProgress};
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Outcome of a fingerprinting run.
///
/// `attempted` counts every file a worker actually processed (success or
/// failure); under cancellation it can be smaller than the input list, and
/// the fingerprints are a valid partial result.
#[derive(Debug)]
pub struct FingerprintBatch {
    pub fingerprints: Vec<FileFingerprint>,
    pub attempted: usize,
    pub failed: usize,
}

/// Maps a file list to fingerprints using a fixed-size worker pool.
///
/// Per-file failures are reported as events and the file is omitted; nothing
/// a single file does can abort the batch. Iteration order of the returned
/// fingerprints is unspecified.
pub struct FingerprintPipeline<'a> {
    source: &'a dyn FingerprintSource,
    jobs: usize,
}

impl<'a> FingerprintPipeline<'a> {
    /// Create a pipeline sized to the available hardware concurrency.
    pub fn new(source: &'a dyn FingerprintSource) -> Self {
        Self { source, jobs: 0 }
    }

    /// Set the worker pool size. Zero means available hardware concurrency.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    fn pool_size(&self) -> usize {
        if self.jobs > 0 {
            return self.jobs;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }

    /// Fingerprint every file in `files`, emitting progress after each
    /// attempt.
    ///
    /// Workers poll `cancel` before claiming a file; once cancellation is
    /// requested, unclaimed files are left unprocessed and the accumulated
    /// fingerprints are returned as a normal partial result.
    pub fn compute(
        &self,
        files: &[PathBuf],
        events: &EventSender,
        cancel: &CancelToken,
    ) -> Result<FingerprintBatch, FingerprintError> {
        let total = files.len();

        events.send(Event::Fingerprint(FingerprintEvent::Started { total }));

        if files.is_empty() {
            events.send(Event::Fingerprint(FingerprintEvent::Completed {
                fingerprinted: 0,
                failed: 0,
            }));
            return Ok(FingerprintBatch {
                fingerprints: Vec::new(),
                attempted: 0,
                failed: 0,
            });
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.pool_size())
            .build()
            .map_err(|e| FingerprintError::WorkerPool(e.to_string()))?;

        let completed = AtomicUsize::new(0);
        let failed = AtomicUsize::new(0);

        let fingerprints: Vec<FileFingerprint> = pool.install(|| {
            files
                .par_iter()
                .filter_map(|path| {
                    // Checked before claiming work; in-flight decodes finish
                    if cancel.is_cancelled() {
                        return None;
                    }

                    let outcome = self.source.fingerprint(path);
                    let current = completed.fetch_add(1, Ordering::SeqCst) + 1;

                    let result = match outcome {
                        Ok(hash) => Some(FileFingerprint {
                            path: path.clone(),
                            hash,
                        }),
                        Err(e) => {
                            failed.fetch_add(1, Ordering::SeqCst);
                            events.send(Event::Fingerprint(FingerprintEvent::Failed {
                                path: path.clone(),
                                message: e.to_string(),
                            }));
                            None
                        }
                    };

                    events.send(Event::Fingerprint(FingerprintEvent::Progress(
                        FingerprintProgress {
                            completed: current,
                            total,
                        },
                    )));

                    result
                })
                .collect()
        });

        let attempted = completed.load(Ordering::SeqCst);
        let failed = failed.load(Ordering::SeqCst);

        events.send(Event::Fingerprint(FingerprintEvent::Completed {
            fingerprinted: fingerprints.len(),
            failed,
        }));

        Ok(FingerprintBatch {
            fingerprints,
            attempted,
            failed,
        })
    }
}
