//! # Construct Setup CLI
//!
//! This is the binary entry point for the `construct-setup` installer.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up diagnostics logging.
//! - Running the install and reporting its outcome.
//!
//! The install itself lives in the `construct_setup` library crate; the binary
//! is a thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
