//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};

use crate::commands::{self, Session};
use tscmono::context::Context;
use tscmono::output::OutputConfig;

/// TSCMono - Generate TypeScript project references for Yarn workspaces
#[derive(Parser, Debug)]
#[command(name = "tscmono")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute; runs every default generator when omitted
    #[command(subcommand)]
    command: Option<Commands>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,

    /// Monorepo root; skips root discovery when set
    #[arg(long, global = true, value_name = "DIR", env = "TSCMONO_ROOT")]
    root: Option<PathBuf>,

    /// Directory to start root discovery from (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    cwd: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate tsconfig files (all default generators unless a target is given)
    Generate(commands::generate::GenerateArgs),

    /// Print the detected monorepo root
    Root,

    /// Print the workspace packages as JSON
    Workspaces,

    /// Display the workspace directory tree
    Tree,

    /// Validate the root configuration and every package configuration
    Validate,

    /// List the available generators and whether they are enabled
    Plugins,

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let Cli {
            command,
            color,
            log_level,
            root,
            cwd,
        } = self;
        init_logging(&log_level);
        let out = OutputConfig::from_env_and_flag(&color);

        let command = match command {
            Some(Commands::Completions(args)) => return commands::completions::execute(args),
            other => other,
        };

        let cwd = match cwd {
            Some(dir) => dir,
            None => std::env::current_dir().context("Failed to read the current directory")?,
        };
        let session = Session {
            ctx: Context::new(cwd).with_root_hint(root),
            out,
        };

        match command {
            None => commands::generate::execute(Default::default(), &session),
            Some(Commands::Generate(args)) => commands::generate::execute(args, &session),
            Some(Commands::Root) => commands::root::execute(&session),
            Some(Commands::Workspaces) => commands::workspaces::execute(&session),
            Some(Commands::Tree) => commands::tree::execute(&session),
            Some(Commands::Validate) => commands::validate::execute(&session),
            Some(Commands::Plugins) => commands::plugins::execute(&session),
            Some(Commands::Completions(_)) => Ok(()),
        }
    }
}

/// Initialize `env_logger` at `level`; `RUST_LOG` takes precedence when set
fn init_logging(level: &str) {
    let mut builder = env_logger::Builder::new();
    builder
        .parse_filters(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false);
    // Already initialized when running inside tests
    let _ = builder.try_init();
}
