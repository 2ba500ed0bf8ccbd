//! # media-organize CLI
//!
//! Command-line interface for the media organizer.
//!
//! ## Usage
//! ```bash
//! media-organize run ~/Pictures/incoming --output ~/Pictures/organized
//! media-organize run ~/Pictures/incoming --strategy perceptual --format json
//! ```

mod cli;

use media_organizer::Result;

fn main() -> Result<()> {
    cli::run()
}
