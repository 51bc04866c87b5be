//! # CLI Command Implementations
//!
//! Each subcommand of `tscmono` lives in its own file. A command module
//! typically contains:
//! - An `Args` struct for command-specific options, derived using `clap`
//!   (omitted when the command takes none).
//! - An `execute` function that performs the command against a [`Session`].

use tscmono::context::Context;
use tscmono::output::OutputConfig;

pub mod completions;
pub mod generate;
pub mod plugins;
pub mod root;
pub mod tree;
pub mod validate;
pub mod workspaces;

/// State shared by every command of one invocation
pub struct Session {
    pub ctx: Context,
    pub out: OutputConfig,
}
