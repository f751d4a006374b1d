//! # probegrid
//!
//! Command-line translator from Omicron `.asc` spectroscopy grids to `.pgrid`
//! containers.
//!
//! ## Usage
//!
//! ```bash
//! # Convert with a ±1 V bias sweep
//! probegrid convert scan.asc --max-v 1.0
//!
//! # Inspect and validate the result
//! probegrid info scan.pgrid
//! probegrid validate scan.pgrid
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
