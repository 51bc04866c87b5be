//! Monorepo root discovery
//!
//! Two strategies are tried in order:
//!
//! 1. **Workspace**: walk upward to the nearest package descriptor that
//!    declares `workspaces` whose globs cover the start directory.
//! 2. **Git**: ask `git rev-parse --show-toplevel`.
//!
//! The first one to produce a directory wins.

use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::exec::CommandRunner;
use crate::package::{find_package_dir, read_descriptor};
use crate::path::{glob_match, to_slash};

/// Find the monorepo root for `start`, trying workspaces first and git second
pub fn find_root(runner: &dyn CommandRunner, start: &Path) -> Result<PathBuf> {
    let workspace_err = match find_workspace_root(start) {
        Ok(root) => {
            debug!("Found workspace root at {}", root.display());
            return Ok(root);
        }
        Err(e) => e,
    };
    debug!("Workspace root lookup failed: {}", workspace_err);

    match find_git_root(runner, start) {
        Ok(root) => {
            debug!("Found git root at {}", root.display());
            Ok(root)
        }
        Err(git_err) => Err(Error::RootNotFound {
            start: start.to_path_buf(),
            message: format!("{}; {}", workspace_err, git_err),
        }),
    }
}

/// Walk upward from `start` to the first descriptor whose workspaces cover it
pub fn find_workspace_root(start: &Path) -> Result<PathBuf> {
    let start = std::path::absolute(start)?;
    let mut dir = find_package_dir(&start)?;
    loop {
        if covers(&dir, &start)? {
            return Ok(dir);
        }
        let parent = match dir.parent() {
            Some(parent) if parent != dir => parent.to_path_buf(),
            _ => return Err(Error::ReachedFilesystemRoot { start }),
        };
        dir = find_package_dir(&parent).map_err(|_| Error::ReachedFilesystemRoot {
            start: start.clone(),
        })?;
    }
}

/// Whether the descriptor in `dir` declares workspaces matching `start`
fn covers(dir: &Path, start: &Path) -> Result<bool> {
    let descriptor = read_descriptor(dir)?;
    if !descriptor.has_workspaces() {
        return Ok(false);
    }
    let relative = match start.strip_prefix(dir) {
        Ok(relative) => to_slash(relative),
        Err(_) => return Ok(false),
    };
    if relative.is_empty() {
        return Ok(true);
    }
    for glob in descriptor.workspaces() {
        let glob = glob.trim_end_matches('/');
        if glob_match(glob, &relative)? || glob_match(&format!("{}/**/*", glob), &relative)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Ask git for the top-level directory of the repository containing `start`
pub fn find_git_root(runner: &dyn CommandRunner, start: &Path) -> Result<PathBuf> {
    let lines = runner.run("git", &["rev-parse", "--show-toplevel"], start)?;
    let top = lines.concat();
    let top = top.trim();
    if top.is_empty() {
        return Err(Error::RootNotFound {
            start: start.to_path_buf(),
            message: "git reported no top-level directory".to_string(),
        });
    }
    Ok(PathBuf::from(top))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct CannedRunner {
        output: std::result::Result<Vec<String>, String>,
        calls: Mutex<Vec<String>>,
    }

    impl CommandRunner for CannedRunner {
        fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<Vec<String>> {
            self.calls
                .lock()
                .unwrap()
                .push(crate::exec::command_line(program, args));
            self.output.clone().map_err(|stderr| Error::Command {
                command: program.to_string(),
                cwd: cwd.to_path_buf(),
                stderr,
            })
        }
    }

    fn canned(output: std::result::Result<Vec<String>, String>) -> CannedRunner {
        CannedRunner {
            output,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn write(dir: &Path, file: &str, content: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(file), content).unwrap();
    }

    fn monorepo() -> TempDir {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "package.json",
            r#"{"name": "root", "private": true, "workspaces": ["packages/*"]}"#,
        );
        write(&temp.path().join("packages/a"), "package.json", r#"{"name": "a"}"#);
        temp
    }

    #[test]
    fn test_workspace_root_from_package() {
        let temp = monorepo();
        let root = std::path::absolute(temp.path()).unwrap();
        let found = find_workspace_root(&temp.path().join("packages/a")).unwrap();
        assert_eq!(found, root);
    }

    #[test]
    fn test_workspace_root_from_nested_source_dir() {
        let temp = monorepo();
        let src = temp.path().join("packages/a/src/lib");
        fs::create_dir_all(&src).unwrap();
        let found = find_workspace_root(&src).unwrap();
        assert_eq!(found, std::path::absolute(temp.path()).unwrap());
    }

    #[test]
    fn test_workspace_root_from_root_itself() {
        let temp = monorepo();
        let found = find_workspace_root(temp.path()).unwrap();
        assert_eq!(found, std::path::absolute(temp.path()).unwrap());
    }

    #[test]
    fn test_workspace_root_uncovered_directory() {
        let temp = monorepo();
        let other = temp.path().join("tools/script");
        write(&other, "package.json", r#"{"name": "script"}"#);
        // tools/script is not covered by packages/*; the walk continues past
        // the repo root, which does not cover it either.
        let result = find_workspace_root(&other);
        assert!(result.is_err());
    }

    #[test]
    fn test_git_root_joins_lines() {
        let runner = canned(Ok(vec!["/repo/top".to_string(), String::new()]));
        let root = find_git_root(&runner, Path::new("/repo/top/sub")).unwrap();
        assert_eq!(root, PathBuf::from("/repo/top"));
        assert_eq!(
            runner.calls.lock().unwrap().as_slice(),
            ["git rev-parse --show-toplevel"]
        );
    }

    #[test]
    fn test_git_root_empty_output() {
        let runner = canned(Ok(vec![String::new()]));
        assert!(find_git_root(&runner, Path::new("/x")).is_err());
    }

    #[test]
    fn test_find_root_falls_back_to_git() {
        let temp = TempDir::new().unwrap();
        let runner = canned(Ok(vec!["/from/git".to_string()]));
        let root = find_root(&runner, temp.path()).unwrap();
        assert_eq!(root, PathBuf::from("/from/git"));
    }

    #[test]
    fn test_find_root_prefers_workspaces() {
        let temp = monorepo();
        let runner = canned(Ok(vec!["/from/git".to_string()]));
        let root = find_root(&runner, &temp.path().join("packages/a")).unwrap();
        assert_eq!(root, std::path::absolute(temp.path()).unwrap());
        assert!(runner.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_find_root_both_fail() {
        let temp = TempDir::new().unwrap();
        let runner = canned(Err("not a git repository".to_string()));
        let err = find_root(&runner, temp.path()).unwrap_err();
        assert!(matches!(err, Error::RootNotFound { .. }));
        assert!(err.to_string().contains("not a git repository"));
    }
}
