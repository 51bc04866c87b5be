//! # TSCMono CLI
//!
//! This is the binary entry point for the `tscmono` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging and colored output.
//! - Executing the appropriate command and turning library errors into a
//!   non-zero exit with a readable message.
//!
//! The generation logic lives in the `tscmono` library crate; the binary is a
//! thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
