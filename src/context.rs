//! Per-run context
//!
//! A [`Context`] bundles the inputs of one invocation (working directory,
//! optional root hint, command runner) with the memoized lookups every
//! generator needs: the monorepo root, the workspace listing and the root
//! configuration. Each is computed at most once unless explicitly refreshed.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::Memo;
use crate::config::{self, RootConfig};
use crate::error::Result;
use crate::exec::{CommandRunner, SystemCommandRunner};
use crate::root;
use crate::workspace::{self, WorkspacesConfig};

pub struct Context {
    runner: Arc<dyn CommandRunner>,
    cwd: PathBuf,
    root_hint: Option<PathBuf>,
    root: Memo<PathBuf>,
    workspaces: Memo<WorkspacesConfig>,
    root_config: Memo<RootConfig>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("cwd", &self.cwd)
            .field("root_hint", &self.root_hint)
            .finish_non_exhaustive()
    }
}

impl Context {
    /// Context running real commands from `cwd`
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self::with_runner(cwd, Arc::new(SystemCommandRunner))
    }

    pub fn with_runner(cwd: impl Into<PathBuf>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            cwd: cwd.into(),
            root_hint: None,
            root: Memo::new("root"),
            workspaces: Memo::new("workspaces"),
            root_config: Memo::new("rootConfig"),
        }
    }

    /// Use `root` as the monorepo root instead of discovering it
    pub fn with_root_hint(mut self, root: Option<PathBuf>) -> Self {
        self.root_hint = root;
        self
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }

    /// The monorepo root, from the hint or discovered from `cwd`
    pub fn root(&self) -> Result<Arc<PathBuf>> {
        self.root.get_or_load(|| self.load_root())
    }

    pub fn refresh_root(&self) -> Result<Arc<PathBuf>> {
        self.root.refresh(|| self.load_root())
    }

    fn load_root(&self) -> Result<PathBuf> {
        match &self.root_hint {
            Some(hint) => Ok(std::path::absolute(hint)?),
            None => root::find_root(self.runner(), &self.cwd),
        }
    }

    /// Workspace packages under the root
    pub fn workspaces(&self) -> Result<Arc<WorkspacesConfig>> {
        self.workspaces.get_or_load(|| self.load_workspaces())
    }

    pub fn refresh_workspaces(&self) -> Result<Arc<WorkspacesConfig>> {
        self.workspaces.refresh(|| self.load_workspaces())
    }

    fn load_workspaces(&self) -> Result<WorkspacesConfig> {
        let root = self.root()?;
        workspace::parse_workspaces(self.runner(), &root)
    }

    /// Validated root configuration
    pub fn root_config(&self) -> Result<Arc<RootConfig>> {
        self.root_config.get_or_load(|| self.load_root_config())
    }

    pub fn refresh_root_config(&self) -> Result<Arc<RootConfig>> {
        self.root_config.refresh(|| self.load_root_config())
    }

    fn load_root_config(&self) -> Result<RootConfig> {
        let root = self.root()?;
        config::load_root_config(&root)
    }
}
