//! External command execution
//!
//! Package-manager and git invocations go through the [`CommandRunner`] trait
//! so that tests can replace them with canned output. The production
//! implementation, [`SystemCommandRunner`], shells out with
//! `std::process::Command`.

use std::path::Path;
use std::process::Command;

use log::debug;

use crate::error::{Error, Result};

/// Trait for running external commands - allows mocking in tests
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` inside `cwd` and return stdout split on `\n`.
    ///
    /// The split keeps empty segments, so output ending in a newline yields a
    /// trailing empty string. Workspace parsers rely on that shape.
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<Vec<String>>;
}

/// Runs commands on the host system
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<Vec<String>> {
        let display = command_line(program, args);
        debug!("Running `{}` in {}", display, cwd.display());

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|e| Error::Command {
                command: display.clone(),
                cwd: cwd.to_path_buf(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(Error::Command {
                command: display,
                cwd: cwd.to_path_buf(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(split_lines(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Render a command the way a user would type it
pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split stdout into lines, keeping a trailing empty segment
pub fn split_lines(stdout: &str) -> Vec<String> {
    stdout.split('\n').map(|line| line.to_string()).collect()
}
