//! # Classify Module
//!
//! Partitions fingerprints into uniques and duplicates.
//!
//! ## Algorithm
//! Fingerprints are sorted ascending by hash, then scanned greedily: each
//! candidate is compared against the already-kept uniques in insertion order,
//! and the first one within the Hamming-distance tolerance claims it as a
//! duplicate. A candidate matching nothing is appended to the uniques.
//!
//! Sorting first clusters bit-similar hashes near each other in traversal
//! order, which shortens the scan in the common case; the worst case remains
//! O(n²) because Hamming distance gives no geometric bound on scan depth.
//!
//! Hamming-distance matching is not transitive, so which unique claims a
//! candidate is a policy choice: the first qualifying unique in scan order
//! wins, and duplicates are never compared against each other.

use crate::core::fingerprint::FileFingerprint;
use crate::events::{ClassifyEvent, Event, EventSender};
use std::path::PathBuf;

/// Number of bits by which two fingerprints differ.
pub fn hamming_distance(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}

/// The classifier's output: every input fingerprint lands in exactly one of
/// the two lists (by path).
#[derive(Debug, Clone, Default)]
pub struct Partition {
    /// Retained fingerprints, in the order they were admitted
    pub uniques: Vec<FileFingerprint>,
    /// Paths classified as duplicates, in classification order
    pub duplicates: Vec<PathBuf>,
}

/// Greedy first-match duplicate classifier.
#[derive(Debug, Clone)]
pub struct GreedyClassifier {
    max_distance: u32,
}

impl GreedyClassifier {
    /// Create a classifier with the given Hamming-distance tolerance.
    ///
    /// `max_distance = 0` clusters only bit-identical fingerprints.
    pub fn new(max_distance: u32) -> Self {
        Self { max_distance }
    }

    /// Partition `fingerprints` into uniques and duplicates.
    ///
    /// Deterministic for a fixed input set regardless of its arrival order:
    /// candidates are sorted by hash with the path as tie-break, so equal
    /// hashes are always visited in the same order.
    pub fn classify(&self, fingerprints: Vec<FileFingerprint>, events: &EventSender) -> Partition {
        events.send(Event::Classify(ClassifyEvent::Started {
            total: fingerprints.len(),
        }));

        let mut sorted = fingerprints;
        sorted.sort_by(|a, b| a.hash.cmp(&b.hash).then_with(|| a.path.cmp(&b.path)));

        let mut uniques: Vec<FileFingerprint> = Vec::new();
        let mut duplicates: Vec<PathBuf> = Vec::new();

        for candidate in sorted {
            let matched = uniques
                .iter()
                .position(|kept| hamming_distance(kept.hash, candidate.hash) <= self.max_distance);

            match matched {
                Some(index) => {
                    let kept = &uniques[index];
                    events.send(Event::Classify(ClassifyEvent::DuplicateFound {
                        duplicate: candidate.path.clone(),
                        kept: kept.path.clone(),
                        distance: hamming_distance(kept.hash, candidate.hash),
                    }));
                    duplicates.push(candidate.path);
                }
                None => uniques.push(candidate),
            }
        }

        events.send(Event::Classify(ClassifyEvent::Completed {
            unique_count: uniques.len(),
            duplicate_count: duplicates.len(),
        }));

        Partition {
            uniques,
            duplicates,
        }
    }
}
