//! Shared test utilities for integration and E2E tests.
//!
//! This module provides a monorepo fixture, a canned command runner for
//! library-level tests and a fake `yarn` executable for CLI tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::monorepo();
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use tscmono::error::{Error, Result};
use tscmono::exec::{command_line, split_lines, CommandRunner};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::descriptors;
    #[allow(unused_imports)]
    pub use super::CannedRunner;
    pub use super::TestFixture;
}

/// Package descriptors used across tests.
#[allow(dead_code)]
pub mod descriptors {
    /// Root descriptor with two workspace globs and a base config.
    pub const ROOT: &str = r#"{
  "name": "monorepo",
  "private": true,
  "workspaces": ["packages/*"],
  "tscmono": {
    "baseConfig": "tsconfig.base.json"
  }
}"#;

    /// Same root, but packages without a configuration are skipped.
    pub const ROOT_LOOSE: &str = r#"{
  "name": "monorepo",
  "private": true,
  "workspaces": ["packages/*"],
  "tscmono": {
    "baseConfig": "tsconfig.base.json",
    "mode": "loose"
  }
}"#;

    /// Root descriptor whose configuration is missing `baseConfig`.
    pub const ROOT_INVALID: &str = r#"{
  "name": "monorepo",
  "private": true,
  "workspaces": ["packages/*"],
  "tscmono": {
    "mode": "sometimes"
  }
}"#;

    pub const PACKAGE_A: &str = r#"{"name": "a", "version": "1.0.0", "tscmono": {}}"#;

    pub const PACKAGE_B: &str = r#"{
  "name": "b",
  "version": "1.0.0",
  "dependencies": {"a": "1.0.0"},
  "tscmono": {"overrides": {"include": ["src"]}}
}"#;

    /// `yarn workspaces info` output for packages `a` and `b`, banner included.
    pub const YARN_V1_INFO: &str = r#"yarn workspaces v1.22.19
{
  "a": {
    "location": "packages/a",
    "workspaceDependencies": [],
    "mismatchedWorkspaceDependencies": []
  },
  "b": {
    "location": "packages/b",
    "workspaceDependencies": ["a"],
    "mismatchedWorkspaceDependencies": []
  }
}
Done in 0.04s.
"#;

    /// `yarn workspaces list -v --json` output for the same packages.
    pub const YARN_V2_LIST: &str = r#"{"location":".","name":"monorepo","workspaceDependencies":[],"mismatchedWorkspaceDependencies":[]}
{"location":"packages/a","name":"a","workspaceDependencies":[],"mismatchedWorkspaceDependencies":[]}
{"location":"packages/b","name":"b","workspaceDependencies":["packages/a"],"mismatchedWorkspaceDependencies":[]}
"#;
}

/// A temporary monorepo on disk.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::monorepo().with_fake_yarn("1.22.19", descriptors::YARN_V1_INFO);
/// fixture.command().arg("root").assert().success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
    yarn_dir: Option<PathBuf>,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
            yarn_dir: None,
        }
    }

    /// Root descriptor plus packages `a` and `b`, where `b` depends on `a`.
    pub fn monorepo() -> Self {
        Self::new()
            .with_file("package.json", descriptors::ROOT)
            .with_file("tsconfig.base.json", r#"{"compilerOptions": {"strict": true}}"#)
            .with_file("packages/a/package.json", descriptors::PACKAGE_A)
            .with_file("packages/b/package.json", descriptors::PACKAGE_B)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Install a `yarn` script reporting `version` and printing `listing`
    /// for any `yarn workspaces ...` call.
    #[cfg(unix)]
    pub fn with_fake_yarn(mut self, version: &str, listing: &str) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let bin = self.temp_dir.child(".fake-bin");
        bin.create_dir_all().expect("Failed to create bin directory");
        bin.child("listing.txt")
            .write_str(listing)
            .expect("Failed to write listing");
        let script = format!(
            "#!/bin/sh\n\
             case \"$1\" in\n\
             \x20 --version) echo \"{}\" ;;\n\
             \x20 workspaces) cat \"$(dirname \"$0\")/listing.txt\" ;;\n\
             \x20 *) echo \"unexpected yarn call: $*\" >&2; exit 1 ;;\n\
             esac\n",
            version
        );
        let yarn = bin.child("yarn");
        yarn.write_str(&script).expect("Failed to write yarn script");
        std::fs::set_permissions(yarn.path(), std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make yarn executable");
        self.yarn_dir = Some(bin.path().to_path_buf());
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Parse a JSON file relative to the fixture root.
    pub fn read_json(&self, path: &str) -> serde_json::Value {
        let text = std::fs::read_to_string(self.path().join(path))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e));
        serde_json::from_str(&text).unwrap_or_else(|e| panic!("Invalid JSON in {}: {}", path, e))
    }

    /// Create a command configured to run in this fixture's directory.
    ///
    /// The fake `yarn`, when installed, shadows any real one on `PATH`.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("tscmono");
        cmd.current_dir(self.path())
            .env_remove("TSCMONO_ROOT")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        if let Some(bin) = &self.yarn_dir {
            let mut paths = vec![bin.clone()];
            if let Some(existing) = std::env::var_os("PATH") {
                paths.extend(std::env::split_paths(&existing));
            }
            let joined = std::env::join_paths(paths).expect("Failed to build PATH");
            cmd.env("PATH", joined);
        }
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Command runner answering from a table of canned outputs
///
/// Keys are full command lines such as `yarn --version`. Unknown commands
/// fail the way a missing executable would.
#[derive(Default)]
pub struct CannedRunner {
    outputs: HashMap<String, String>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl CannedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, command: &str, stdout: &str) -> Self {
        self.outputs.insert(command.to_string(), stdout.to_string());
        self
    }

    /// Runner that answers like Yarn 1 with the `a`/`b` listing
    pub fn yarn_v1() -> Self {
        Self::new()
            .with("yarn --version", "1.22.19\n")
            .with("yarn workspaces info", descriptors::YARN_V1_INFO)
    }

    /// Runner that answers like Yarn 3 with the `a`/`b` listing
    pub fn yarn_v2() -> Self {
        Self::new()
            .with("yarn --version", "3.6.4\n")
            .with("yarn workspaces list -v --json", descriptors::YARN_V2_LIST)
    }

    /// Number of commands run so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CommandRunner for CannedRunner {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let line = command_line(program, args);
        match self.outputs.get(&line) {
            Some(stdout) => Ok(split_lines(stdout)),
            None => Err(Error::Command {
                command: line,
                cwd: cwd.to_path_buf(),
                stderr: "command not found".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_monorepo_fixture_layout() {
        let fixture = TestFixture::monorepo();
        assert!(fixture.path().join("package.json").exists());
        assert!(fixture.path().join("packages/a/package.json").exists());
        assert!(fixture.path().join("packages/b/package.json").exists());
    }

    #[test]
    fn test_descriptors_are_valid_json() {
        for text in [
            descriptors::ROOT,
            descriptors::ROOT_LOOSE,
            descriptors::ROOT_INVALID,
            descriptors::PACKAGE_A,
            descriptors::PACKAGE_B,
        ] {
            serde_json::from_str::<serde_json::Value>(text).unwrap();
        }
    }
}
