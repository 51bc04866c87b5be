//! # Completions Command Implementation
//!
//! Prints a shell completion script for `tscmono`, or writes it to `--output`.
//!
//! ```bash
//! tscmono completions bash > ~/.local/share/bash-completion/completions/tscmono
//! tscmono completions zsh --output ~/.zfunc/_tscmono
//! ```

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Args, CommandFactory};
use clap_complete::Shell;

use crate::cli::Cli;

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate the script for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script to this file instead of stdout
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let mut sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };
    clap_complete::generate(args.shell, &mut cmd, bin_name, &mut sink);
    sink.flush()?;
    Ok(())
}
