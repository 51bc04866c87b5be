//! Workspace metadata from the package manager
//!
//! Yarn reports workspaces differently across major versions:
//!
//! - **v1**: `yarn workspaces info` prints one JSON object keyed by package
//!   name, wrapped in banner lines.
//! - **v2+**: `yarn workspaces list -v --json` prints one JSON object per line
//!   and refers to dependencies by location rather than by name.
//!
//! Both are normalized into a [`WorkspacesConfig`] keyed by package name
//! that never contains the root package.

use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::exec::CommandRunner;
use crate::package::read_descriptor;
use crate::path::resolve_location;

/// One workspace package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceEntry {
    /// Location relative to the monorepo root, `/`-separated
    pub location: String,
    /// Names of workspace packages this package depends on
    #[serde(default)]
    pub workspace_dependencies: Vec<String>,
    /// Names of workspace packages depended on with a non-matching range
    #[serde(default)]
    pub mismatched_workspace_dependencies: Vec<String>,
}

/// Workspace packages keyed by name
pub type WorkspacesConfig = BTreeMap<String, WorkspaceEntry>;

/// Entry shape printed by `yarn workspaces list -v --json`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListedWorkspace {
    location: String,
    name: Option<String>,
    #[serde(default)]
    workspace_dependencies: Vec<String>,
    #[serde(default)]
    mismatched_workspace_dependencies: Vec<String>,
}

/// Workspace listing strategy for a package manager major version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceParser {
    V1,
    V2,
}

impl WorkspaceParser {
    /// Pick the parser for a `yarn --version` string
    pub fn for_version(version: &str) -> Result<Self> {
        let trimmed = version.trim();
        let parsed = semver::Version::parse(trimmed).map_err(|_| {
            Error::UnknownPackageManagerVersion {
                version: trimmed.to_string(),
            }
        })?;
        match parsed.major {
            1 => Ok(WorkspaceParser::V1),
            major if major >= 2 => Ok(WorkspaceParser::V2),
            _ => Err(Error::UnknownPackageManagerVersion {
                version: trimmed.to_string(),
            }),
        }
    }

    /// Arguments passed to `yarn` to obtain the listing
    pub fn args(&self) -> &'static [&'static str] {
        match self {
            WorkspaceParser::V1 => &["workspaces", "info"],
            WorkspaceParser::V2 => &["workspaces", "list", "-v", "--json"],
        }
    }

    /// Run the listing command in `cwd`
    pub fn call(&self, runner: &dyn CommandRunner, cwd: &Path) -> Result<Vec<String>> {
        runner.run("yarn", self.args(), cwd)
    }

    /// Interpret captured listing output; `cwd` is the monorepo root
    pub fn parse(&self, lines: &[String], cwd: &Path) -> Result<WorkspacesConfig> {
        match self {
            WorkspaceParser::V1 => parse_v1(lines),
            WorkspaceParser::V2 => parse_v2(lines, cwd),
        }
    }
}

fn parse_v1(lines: &[String]) -> Result<WorkspacesConfig> {
    let output = lines.join("\n");
    let (start, end) = match (output.find('{'), output.rfind('}')) {
        (Some(start), Some(end)) if start < end => (start, end),
        _ => {
            return Err(Error::WorkspaceParse {
                message: "no JSON object in `yarn workspaces info` output".to_string(),
            })
        }
    };
    Ok(serde_json::from_str(&output[start..=end])?)
}

fn parse_v2(lines: &[String], cwd: &Path) -> Result<WorkspacesConfig> {
    let output = lines.join(",");
    let body = output.trim_end_matches(',');
    let listed: Vec<ListedWorkspace> = serde_json::from_str(&format!("[{}]", body))?;

    let root_name = read_descriptor(cwd)?.name().map(str::to_string);
    let name_of = |location: &String| -> Result<String> {
        let dir = resolve_location(cwd, location);
        let descriptor = read_descriptor(&dir)?;
        descriptor
            .name()
            .map(str::to_string)
            .ok_or_else(|| Error::PackageDescriptor {
                dir,
                message: "package has no name".to_string(),
            })
    };

    let mut config = WorkspacesConfig::new();
    for entry in listed {
        let is_root = entry.location == "."
            || (entry.name.is_some() && entry.name == root_name);
        if is_root {
            continue;
        }
        let name = match &entry.name {
            Some(name) => name.clone(),
            None => name_of(&entry.location)?,
        };
        let workspace_dependencies = entry
            .workspace_dependencies
            .iter()
            .map(name_of)
            .collect::<Result<Vec<_>>>()?;
        let mismatched_workspace_dependencies = entry
            .mismatched_workspace_dependencies
            .iter()
            .map(name_of)
            .collect::<Result<Vec<_>>>()?;
        config.insert(
            name,
            WorkspaceEntry {
                location: entry.location,
                workspace_dependencies,
                mismatched_workspace_dependencies,
            },
        );
    }
    Ok(config)
}

/// Detect the package manager version and list the workspaces under `root`
pub fn parse_workspaces(runner: &dyn CommandRunner, root: &Path) -> Result<WorkspacesConfig> {
    let version_lines = runner.run("yarn", &["--version"], root)?;
    let version = version_lines.first().map(String::as_str).unwrap_or("");
    let parser = WorkspaceParser::for_version(version)?;
    debug!("Using {:?} workspace parser for yarn {}", parser, version.trim());

    let lines = parser.call(runner, root)?;
    let config = parser.parse(&lines, root)?;
    for (name, entry) in &config {
        if !entry.mismatched_workspace_dependencies.is_empty() {
            warn!(
                "{} has mismatched workspace dependencies: {}",
                name,
                entry.mismatched_workspace_dependencies.join(", ")
            );
        }
    }
    Ok(config)
}
