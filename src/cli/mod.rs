//! # CLI Module
//!
//! Command-line interface for the duplicate image finder.
//!
//! ## Usage
//! ```bash
//! # Scan a directory and quarantine duplicates
//! image-dedup scan ~/Pictures
//!
//! # Stricter matching, more workers
//! image-dedup scan ~/Pictures --threshold 1 --jobs 8
//!
//! # Classify only, never move anything
//! image-dedup scan ~/Pictures --dry-run
//!
//! # JSON output for scripting
//! image-dedup scan ~/Pictures --output json --yes
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use dialoguer::Confirm;
use image_dupe_finder::core::{CancelToken, Pipeline, Relocator, ScanReport};
use image_dupe_finder::core::relocate::RelocateSummary;
use image_dupe_finder::error::{DupeFinderError, Result};
use image_dupe_finder::events::{
    ClassifyEvent, Event, EventChannel, FingerprintEvent, PipelineEvent, RelocateEvent, ScanEvent,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;

/// Image Dupe Finder - quarantine near-identical images
#[derive(Parser, Debug)]
#[command(name = "image-dedup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a directory and move duplicates into its `duplicates` subfolder
    Scan {
        /// Directory to scan
        path: PathBuf,

        /// Hamming-distance tolerance (0 = bit-identical only, max 64)
        #[arg(short, long, default_value = "3")]
        threshold: u32,

        /// Comma-separated extension allow-list (default: jpg,jpeg,png,bmp,webp,tiff)
        #[arg(short, long, value_delimiter = ',')]
        extensions: Option<Vec<String>>,

        /// Worker pool size (default: available CPU cores)
        #[arg(short, long, default_value = "0")]
        jobs: usize,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Classify only; never move files
        #[arg(long)]
        dry_run: bool,

        /// Move duplicates without asking
        #[arg(short, long)]
        yes: bool,

        /// Echo every relocated file
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors and a progress bar
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (duplicate paths only)
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            path,
            threshold,
            extensions,
            jobs,
            output,
            dry_run,
            yes,
            verbose,
        } => run_scan(path, threshold, extensions, jobs, output, dry_run, yes, verbose),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_scan(
    path: PathBuf,
    threshold: u32,
    extensions: Option<Vec<String>>,
    jobs: usize,
    output: OutputFormat,
    dry_run: bool,
    yes: bool,
    verbose: bool,
) -> Result<()> {
    let term = Term::stderr();
    let pretty = output == OutputFormat::Pretty;

    if pretty {
        term.write_line(&format!(
            "{} {}",
            style("Image Dupe Finder").bold().cyan(),
            style(env!("CARGO_PKG_VERSION")).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    // Ctrl+C requests cooperative cancellation; in-flight decodes finish
    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || {
            let _ = writeln!(std::io::stderr(), "\nInterrupted. Finishing in-flight files...");
            cancel.cancel();
        })
        .map_err(|e| DupeFinderError::Config(format!("failed to install Ctrl+C handler: {e}")))?;
    }

    let mut builder = Pipeline::builder()
        .root(&path)
        .max_distance(threshold)
        .jobs(jobs);
    if let Some(extensions) = extensions {
        builder = builder.extensions(extensions);
    }
    let pipeline = builder.build();
    let quarantine = pipeline.quarantine_dir();

    // Set up event handling
    let (sender, receiver) = EventChannel::new();

    let progress = if pretty {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();
    let verbose_clone = verbose;

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            let Some(pb) = progress_clone.as_ref() else {
                continue;
            };
            match event {
                Event::Pipeline(PipelineEvent::PhaseChanged { phase }) => {
                    pb.set_message(phase.to_string());
                }
                Event::Scan(ScanEvent::Completed { total_files }) => {
                    pb.set_length(total_files as u64);
                }
                Event::Scan(ScanEvent::Error { path, message }) => {
                    pb.println(format!("Error at {}: {}", path.display(), message));
                }
                Event::Fingerprint(FingerprintEvent::Progress(p)) => {
                    pb.set_position(p.completed as u64);
                }
                Event::Fingerprint(FingerprintEvent::Failed { path, message }) => {
                    pb.println(format!("Error at {}: {}", file_name(&path), message));
                }
                Event::Classify(ClassifyEvent::DuplicateFound {
                    duplicate, kept, ..
                }) => {
                    pb.println(format!(
                        "Duplicate: {} ≈ {}",
                        file_name(&duplicate),
                        file_name(&kept)
                    ));
                }
                Event::Relocate(RelocateEvent::Moved { from, to }) => {
                    if verbose_clone {
                        pb.println(format!("Moved {} -> {}", from.display(), to.display()));
                    }
                }
                Event::Relocate(RelocateEvent::Failed { path, message }) => {
                    pb.println(format!("ERROR: Could not move {}: {}", path.display(), message));
                }
                Event::Pipeline(PipelineEvent::Completed { .. })
                | Event::Pipeline(PipelineEvent::Cancelled { .. }) => {
                    pb.finish_and_clear();
                }
                _ => {}
            }
        }
    });

    // Run the pipeline
    let report = pipeline.run_with_events(&sender, &cancel)?;

    // Move duplicates unless told otherwise
    let relocated = if !report.duplicates.is_empty() && !dry_run && !report.cancelled {
        let confirmed = yes
            || (pretty
                && Confirm::new()
                    .with_prompt(format!(
                        "Move {} duplicates to '{}'?",
                        report.duplicates.len(),
                        quarantine.display()
                    ))
                    .default(true)
                    .interact()
                    .unwrap_or(false));

        if confirmed {
            Some(Relocator::new(&quarantine).relocate(&report.duplicates, &sender)?)
        } else {
            None
        }
    } else {
        None
    };

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();

    match output {
        OutputFormat::Pretty => print_pretty_results(&term, &report, relocated.as_ref(), &quarantine),
        OutputFormat::Json => print_json_results(&report, relocated.as_ref()),
        OutputFormat::Minimal => print_minimal_results(&report),
    }

    Ok(())
}

fn print_pretty_results(
    term: &Term,
    report: &ScanReport,
    relocated: Option<&RelocateSummary>,
    quarantine: &Path,
) {
    term.write_line("").ok();
    if report.cancelled {
        term.write_line(&format!("{} Scan cancelled", style("✗").yellow().bold()))
            .ok();
    } else {
        term.write_line(&format!("{} Scan complete", style("✓").green().bold()))
            .ok();
    }
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} images scanned in {:.1}s",
        style(report.total_files).cyan(),
        report.duration_ms as f64 / 1000.0
    ))
    .ok();

    term.write_line(&format!(
        "  {} fingerprinted, {} failed",
        style(report.fingerprinted).cyan(),
        style(report.failed).cyan()
    ))
    .ok();

    if !report.cancelled {
        term.write_line(&format!(
            "  {} unique images, {} duplicates",
            style(report.uniques.len()).cyan(),
            style(report.duplicates.len()).cyan()
        ))
        .ok();
    }

    if !report.duplicates.is_empty() {
        term.write_line("").ok();
        term.write_line(&format!("{}", style("Duplicates:").bold().underlined()))
            .ok();
        for duplicate in &report.duplicates {
            term.write_line(&format!("  {} {}", style("○").dim(), display_path(duplicate)))
                .ok();
        }
    }

    term.write_line("").ok();
    match relocated {
        Some(summary) => {
            term.write_line(&format!(
                "{} duplicates moved to '{}' ({} skipped, {} failed)",
                style(summary.moved).cyan(),
                quarantine.display(),
                summary.skipped,
                summary.failed
            ))
            .ok();
        }
        None if !report.duplicates.is_empty() && !report.cancelled => {
            term.write_line(&format!(
                "{}",
                style("No files were moved.").dim()
            ))
            .ok();
        }
        None => {}
    }
}

fn print_json_results(report: &ScanReport, relocated: Option<&RelocateSummary>) {
    let output = serde_json::json!({
        "total_files": report.total_files,
        "fingerprinted": report.fingerprinted,
        "failed": report.failed,
        "unique_count": report.uniques.len(),
        "duplicate_count": report.duplicates.len(),
        "duplicates": report.duplicates,
        "cancelled": report.cancelled,
        "duration_ms": report.duration_ms,
        "relocated": relocated.map(|r| serde_json::json!({
            "moved": r.moved,
            "skipped": r.skipped,
            "failed": r.failed,
        })),
    });

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

fn print_minimal_results(report: &ScanReport) {
    for duplicate in &report.duplicates {
        println!("{}", duplicate.display());
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn display_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(rest) = path.strip_prefix(&home) {
            return format!("~/{}", rest.display());
        }
    }
    path.display().to_string()
}
