//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the duplicate finder pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Image discovery events
    Scan(ScanEvent),
    /// Fingerprinting phase events
    Fingerprint(FingerprintEvent),
    /// Classification phase events
    Classify(ClassifyEvent),
    /// Quarantine relocation events
    Relocate(RelocateEvent),
    /// Pipeline-level events
    Pipeline(PipelineEvent),
}

/// Events during image discovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Discovery started under this root
    Started { root: PathBuf },
    /// An entry could not be read; the scan continues
    Error { path: PathBuf, message: String },
    /// Discovery completed
    Completed { total_files: usize },
}

/// Events during the fingerprinting phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FingerprintEvent {
    /// Fingerprinting has started
    Started { total: usize },
    /// Progress update, emitted after every attempted file
    Progress(FingerprintProgress),
    /// A file could not be fingerprinted; it is omitted from the results
    Failed { path: PathBuf, message: String },
    /// Fingerprinting completed (or was cancelled early)
    Completed { fingerprinted: usize, failed: usize },
}

/// Progress information during fingerprinting.
///
/// `completed` counts attempts, success or failure, and is monotonically
/// non-decreasing. It reaches `total` unless the scan is cancelled early.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FingerprintProgress {
    pub completed: usize,
    pub total: usize,
}

/// Events during the classification phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClassifyEvent {
    /// Classification has started
    Started { total: usize },
    /// A fingerprint matched an already-kept unique within tolerance
    DuplicateFound {
        duplicate: PathBuf,
        kept: PathBuf,
        distance: u32,
    },
    /// Classification completed
    Completed {
        unique_count: usize,
        duplicate_count: usize,
    },
}

/// Events during relocation into the quarantine folder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RelocateEvent {
    /// Relocation has started
    Started { total: usize, target: PathBuf },
    /// A duplicate was moved
    Moved { from: PathBuf, to: PathBuf },
    /// The source file vanished between classification and relocation
    SkippedMissing { path: PathBuf },
    /// A move failed; the remaining files are still processed
    Failed { path: PathBuf, message: String },
    /// Relocation completed
    Completed {
        moved: usize,
        skipped: usize,
        failed: usize,
    },
}

/// Pipeline-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// Pipeline has started
    Started,
    /// Moving to a new phase
    PhaseChanged { phase: PipelinePhase },
    /// Pipeline completed successfully
    Completed { summary: PipelineSummary },
    /// Pipeline stopped early on request; partial results are valid
    Cancelled { completed: usize, total: usize },
}

/// Phases of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelinePhase {
    Scanning,
    Fingerprinting,
    Classifying,
    Relocating,
}

/// Summary of pipeline results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Total image files discovered
    pub total_files: usize,
    /// Files successfully fingerprinted
    pub fingerprinted: usize,
    /// Files that failed to decode or fingerprint
    pub failed: usize,
    /// Images kept as unique
    pub unique_count: usize,
    /// Images classified as duplicates
    pub duplicate_count: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelinePhase::Scanning => write!(f, "Scanning"),
            PipelinePhase::Fingerprinting => write!(f, "Fingerprinting"),
            PipelinePhase::Classifying => write!(f, "Classifying"),
            PipelinePhase::Relocating => write!(f, "Relocating"),
        }
    }
}
