//! # image-dedup CLI
//!
//! Command-line interface for the duplicate image finder.
//!
//! ## Usage
//! ```bash
//! image-dedup scan ~/Pictures --threshold 3
//! image-dedup scan ~/Pictures --dry-run --output json
//! ```

mod cli;

use image_dupe_finder::Result;

fn main() -> Result<()> {
    image_dupe_finder::init_tracing();
    cli::run()
}
