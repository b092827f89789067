//! Integration tests for the scan pipeline.
//!
//! These tests exercise the end-to-end flow over real image files:
//! - exact-duplicate detection
//! - per-file failure isolation
//! - empty and missing directories
//! - quarantine-folder exclusion on re-scans
//! - cancellation

use image::{ImageBuffer, Rgb};
use image_dupe_finder::core::{CancelToken, Pipeline};
use image_dupe_finder::events::{
    Event, EventChannel, FingerprintEvent, PipelineEvent, null_sender,
};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

fn write_gradient_png(path: &Path) {
    let img = ImageBuffer::from_fn(64, 64, |x, y| {
        Rgb([(x * 4) as u8, (y * 4) as u8, ((x + y) * 2) as u8])
    });
    img.save(path).unwrap();
}

fn write_checkerboard_png(path: &Path) {
    let img = ImageBuffer::from_fn(64, 64, |x, y| {
        if (x / 8 + y / 8) % 2 == 0 {
            Rgb([255u8, 255, 255])
        } else {
            Rgb([0u8, 0, 0])
        }
    });
    img.save(path).unwrap();
}

#[test]
fn pipeline_detects_exact_duplicates() {
    let temp_dir = TempDir::new().unwrap();
    write_gradient_png(&temp_dir.path().join("a.png"));
    write_gradient_png(&temp_dir.path().join("b.png"));
    write_checkerboard_png(&temp_dir.path().join("c.png"));

    let pipeline = Pipeline::builder()
        .root(temp_dir.path())
        .max_distance(0)
        .build();

    let report = pipeline.run().unwrap();

    assert_eq!(report.total_files, 3);
    assert_eq!(report.fingerprinted, 3);
    assert_eq!(report.uniques.len(), 2);
    assert_eq!(report.duplicates.len(), 1);

    // Partition property: every fingerprinted file lands in exactly one list
    assert_eq!(
        report.uniques.len() + report.duplicates.len(),
        report.fingerprinted
    );
    let dupe = report.duplicates[0].file_name().unwrap().to_string_lossy();
    assert!(dupe == "a.png" || dupe == "b.png");
}

#[test]
fn pipeline_isolates_corrupt_files() {
    let temp_dir = TempDir::new().unwrap();
    write_gradient_png(&temp_dir.path().join("good.png"));

    let corrupt = temp_dir.path().join("corrupt.jpg");
    let mut file = File::create(&corrupt).unwrap();
    file.write_all(b"this is not a valid image file").unwrap();
    drop(file);

    let pipeline = Pipeline::builder().root(temp_dir.path()).build();
    let report = pipeline.run().unwrap();

    assert_eq!(report.total_files, 2);
    assert_eq!(report.fingerprinted, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.uniques.len(), 1);
    assert!(report.duplicates.is_empty());
}

#[test]
fn pipeline_handles_empty_directory() {
    let temp_dir = TempDir::new().unwrap();

    let pipeline = Pipeline::builder().root(temp_dir.path()).build();
    let report = pipeline.run().unwrap();

    assert_eq!(report.total_files, 0);
    assert!(report.uniques.is_empty());
    assert!(report.duplicates.is_empty());
}

#[test]
fn pipeline_errors_on_missing_root() {
    let pipeline = Pipeline::builder()
        .root("/nonexistent/path/that/does/not/exist")
        .build();

    assert!(pipeline.run().is_err());
}

#[test]
fn rescans_ignore_the_quarantine_folder() {
    let temp_dir = TempDir::new().unwrap();
    write_gradient_png(&temp_dir.path().join("keep.png"));

    let quarantine = temp_dir.path().join("duplicates");
    std::fs::create_dir_all(&quarantine).unwrap();
    write_gradient_png(&quarantine.join("already_moved.png"));

    let pipeline = Pipeline::builder()
        .root(temp_dir.path())
        .max_distance(0)
        .build();

    let report = pipeline.run().unwrap();

    // The quarantined copy is invisible, so nothing matches
    assert_eq!(report.total_files, 1);
    assert!(report.duplicates.is_empty());
}

#[test]
fn progress_events_cover_every_file() {
    let temp_dir = TempDir::new().unwrap();
    write_gradient_png(&temp_dir.path().join("a.png"));
    write_checkerboard_png(&temp_dir.path().join("b.png"));

    let pipeline = Pipeline::builder().root(temp_dir.path()).build();

    let (sender, receiver) = EventChannel::new();
    let report = pipeline
        .run_with_events(&sender, &CancelToken::new())
        .unwrap();
    drop(sender);

    let events: Vec<Event> = receiver.iter().collect();

    let mut completed: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            Event::Fingerprint(FingerprintEvent::Progress(p)) => Some(p.completed),
            _ => None,
        })
        .collect();
    completed.sort_unstable();
    assert_eq!(completed, vec![1, 2]);

    assert!(events
        .iter()
        .any(|e| matches!(e, Event::Pipeline(PipelineEvent::Completed { .. }))));
    assert!(!report.cancelled);
}

#[test]
fn cancelled_scan_returns_a_partial_report() {
    let temp_dir = TempDir::new().unwrap();
    write_gradient_png(&temp_dir.path().join("a.png"));
    write_checkerboard_png(&temp_dir.path().join("b.png"));

    let pipeline = Pipeline::builder().root(temp_dir.path()).build();

    let cancel = CancelToken::new();
    cancel.cancel();

    let report = pipeline.run_with_events(&null_sender(), &cancel).unwrap();

    assert!(report.cancelled);
    assert!(report.fingerprinted <= report.total_files);
    assert!(report.uniques.is_empty());
    assert!(report.duplicates.is_empty());
}
