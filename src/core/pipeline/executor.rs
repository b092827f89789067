//! Pipeline execution implementation.

use crate::core::cancel::CancelToken;
use crate::core::classify::GreedyClassifier;
use crate::core::fingerprint::{
    FileFingerprint, FingerprintPipeline, FingerprintSource, PerceptualFingerprinter,
};
use crate::core::scanner::{ImageScanner, ScanConfig, DEFAULT_EXTENSIONS};
use crate::error::{DupeFinderError, Result};
use crate::events::{
    null_sender, Event, EventSender, PipelineEvent, PipelinePhase, PipelineSummary,
};
use std::path::PathBuf;
use std::time::Instant;

/// Name of the quarantine subfolder created under the scanned root.
pub const QUARANTINE_DIR_NAME: &str = "duplicates";

/// Result of a full scan
#[derive(Debug)]
pub struct ScanReport {
    /// Image files discovered under the root
    pub total_files: usize,
    /// Files successfully fingerprinted
    pub fingerprinted: usize,
    /// Files that failed to decode or fingerprint (non-fatal)
    pub failed: usize,
    /// Retained unique fingerprints
    pub uniques: Vec<FileFingerprint>,
    /// Paths classified as duplicates
    pub duplicates: Vec<PathBuf>,
    /// Whether the scan was cancelled before finishing
    pub cancelled: bool,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// Configuration for the pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root directory to scan
    pub root: PathBuf,
    /// Extension allow-list (case-insensitive)
    pub extensions: Vec<String>,
    /// Hamming-distance tolerance for clustering
    pub max_distance: u32,
    /// Worker pool size (0 = available hardware concurrency)
    pub jobs: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            max_distance: 3,
            jobs: 0,
        }
    }
}

/// Builder for the pipeline
pub struct PipelineBuilder {
    config: PipelineConfig,
    source: Option<Box<dyn FingerprintSource>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
            source: None,
        }
    }

    /// Set the root directory to scan
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.root = root.into();
        self
    }

    /// Override the extension allow-list
    pub fn extensions(mut self, extensions: Vec<String>) -> Self {
        self.config.extensions = extensions;
        self
    }

    /// Set the Hamming-distance tolerance
    pub fn max_distance(mut self, max_distance: u32) -> Self {
        self.config.max_distance = max_distance;
        self
    }

    /// Set the worker pool size (0 = available hardware concurrency)
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.config.jobs = jobs;
        self
    }

    /// Override the fingerprint source (used by tests)
    pub fn source(mut self, source: Box<dyn FingerprintSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Pipeline {
        Pipeline {
            config: self.config,
            source: self
                .source
                .unwrap_or_else(|| Box::new(PerceptualFingerprinter::new())),
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The duplicate detection pipeline
pub struct Pipeline {
    config: PipelineConfig,
    source: Box<dyn FingerprintSource>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// The quarantine folder for this pipeline's root.
    pub fn quarantine_dir(&self) -> PathBuf {
        self.config.root.join(QUARANTINE_DIR_NAME)
    }

    /// Run the pipeline without events or cancellation
    pub fn run(&self) -> Result<ScanReport> {
        self.run_with_events(&null_sender(), &CancelToken::new())
    }

    /// Run the pipeline with event reporting and cooperative cancellation.
    ///
    /// Configuration problems surface before any work begins. Per-file
    /// failures never abort the scan. On cancellation the report carries the
    /// partial fingerprint count; classification is skipped.
    pub fn run_with_events(&self, events: &EventSender, cancel: &CancelToken) -> Result<ScanReport> {
        self.validate()?;

        let start_time = Instant::now();
        events.send(Event::Pipeline(PipelineEvent::Started));

        // Phase 1: Scanning
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Scanning,
        }));

        let quarantine = self.quarantine_dir();
        let scanner = ImageScanner::new(ScanConfig {
            extensions: Some(self.config.extensions.clone()),
            exclude: Some(quarantine.to_string_lossy().into_owned()),
        });
        let files = scanner.scan(&self.config.root, events)?;
        let total_files = files.len();

        if files.is_empty() {
            let duration_ms = start_time.elapsed().as_millis() as u64;
            events.send(Event::Pipeline(PipelineEvent::Completed {
                summary: PipelineSummary {
                    total_files: 0,
                    fingerprinted: 0,
                    failed: 0,
                    unique_count: 0,
                    duplicate_count: 0,
                    duration_ms,
                },
            }));

            return Ok(ScanReport {
                total_files: 0,
                fingerprinted: 0,
                failed: 0,
                uniques: Vec::new(),
                duplicates: Vec::new(),
                cancelled: cancel.is_cancelled(),
                duration_ms,
            });
        }

        // Phase 2: Fingerprinting
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Fingerprinting,
        }));

        let batch = FingerprintPipeline::new(self.source.as_ref())
            .jobs(self.config.jobs)
            .compute(&files, events, cancel)?;

        if cancel.is_cancelled() {
            let duration_ms = start_time.elapsed().as_millis() as u64;
            events.send(Event::Pipeline(PipelineEvent::Cancelled {
                completed: batch.attempted,
                total: total_files,
            }));

            return Ok(ScanReport {
                total_files,
                fingerprinted: batch.fingerprints.len(),
                failed: batch.failed,
                uniques: Vec::new(),
                duplicates: Vec::new(),
                cancelled: true,
                duration_ms,
            });
        }

        // Phase 3: Classifying
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Classifying,
        }));

        let fingerprinted = batch.fingerprints.len();
        let partition =
            GreedyClassifier::new(self.config.max_distance).classify(batch.fingerprints, events);

        let duration_ms = start_time.elapsed().as_millis() as u64;
        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: PipelineSummary {
                total_files,
                fingerprinted,
                failed: batch.failed,
                unique_count: partition.uniques.len(),
                duplicate_count: partition.duplicates.len(),
                duration_ms,
            },
        }));

        Ok(ScanReport {
            total_files,
            fingerprinted,
            failed: batch.failed,
            uniques: partition.uniques,
            duplicates: partition.duplicates,
            cancelled: false,
            duration_ms,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.config.extensions.is_empty() {
            return Err(DupeFinderError::Config(
                "no file extensions selected".to_string(),
            ));
        }
        if self.config.max_distance > 64 {
            return Err(DupeFinderError::Config(format!(
                "invalid threshold: {} (must be 0-64)",
                self.config.max_distance
            )));
        }
        Ok(())
    }
}
