//! Package descriptor files (`package.json`, `package.yml`, `package.yaml`)
//!
//! Descriptors are read into a `serde_json::Value` regardless of their on-disk
//! format so that callers can inspect arbitrary fields (`name`, `workspaces`,
//! dependency maps, the `tscmono` config property) uniformly.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;

use crate::error::{Error, Result};

/// Descriptor filenames in priority order; the first one present wins.
pub const DESCRIPTOR_FILES: [&str; 3] = ["package.json", "package.yml", "package.yaml"];

/// A parsed package descriptor
#[derive(Debug, Clone)]
pub struct PackageDescriptor {
    /// The file the descriptor was read from
    pub path: PathBuf,
    /// Parsed content
    pub value: JsonValue,
}

impl PackageDescriptor {
    /// The package `name`, if declared
    pub fn name(&self) -> Option<&str> {
        self.value.get("name").and_then(JsonValue::as_str)
    }

    /// Whether a `workspaces` field is present at all
    pub fn has_workspaces(&self) -> bool {
        self.value
            .get("workspaces")
            .map(|w| !w.is_null())
            .unwrap_or(false)
    }

    /// Workspace globs, accepting the array, single-string and
    /// `{ "packages": [...] }` forms
    pub fn workspaces(&self) -> Vec<String> {
        let Some(workspaces) = self.value.get("workspaces") else {
            return Vec::new();
        };
        let list = match workspaces {
            JsonValue::Object(map) => map.get("packages").cloned().unwrap_or(JsonValue::Null),
            other => other.clone(),
        };
        match list {
            JsonValue::String(glob) => vec![glob],
            JsonValue::Array(items) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Sorted, de-duplicated names from `dependencies` and `devDependencies`
    pub fn dependency_names(&self) -> Vec<String> {
        let mut names: Vec<String> = ["dependencies", "devDependencies"]
            .iter()
            .filter_map(|key| self.value.get(*key).and_then(JsonValue::as_object))
            .flat_map(|deps| deps.keys().cloned())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// A top-level property, e.g. the embedded `tscmono` configuration
    pub fn property(&self, key: &str) -> Option<&JsonValue> {
        self.value.get(key)
    }
}

/// Path of the first descriptor file present in `dir`
pub fn descriptor_path(dir: &Path) -> Option<PathBuf> {
    DESCRIPTOR_FILES
        .iter()
        .map(|file| dir.join(file))
        .find(|path| path.is_file())
}

/// Determine if `dir` contains a package descriptor
pub fn has_descriptor(dir: &Path) -> bool {
    descriptor_path(dir).is_some()
}

/// Read and parse the descriptor in `dir`
pub fn read_descriptor(dir: &Path) -> Result<PackageDescriptor> {
    let path = descriptor_path(dir).ok_or_else(|| Error::PackageDescriptor {
        dir: dir.to_path_buf(),
        message: format!("none of {} found", DESCRIPTOR_FILES.join(", ")),
    })?;
    let text = fs::read_to_string(&path)?;
    let value = parse_descriptor(&path, &text).map_err(|message| Error::PackageDescriptor {
        dir: dir.to_path_buf(),
        message,
    })?;
    Ok(PackageDescriptor { path, value })
}

fn parse_descriptor(path: &Path, text: &str) -> std::result::Result<JsonValue, String> {
    let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
    if is_json {
        serde_json::from_str(text).map_err(|e| format!("invalid JSON: {}", e))
    } else {
        serde_yaml::from_str(text).map_err(|e| format!("invalid YAML: {}", e))
    }
}

/// Walk upward from `start` to the nearest directory holding a descriptor
///
/// The walk compares normalized absolute paths and stops once a directory is
/// its own parent.
pub fn find_package_dir(start: &Path) -> Result<PathBuf> {
    let mut dir = std::path::absolute(start)?;
    loop {
        if has_descriptor(&dir) {
            return Ok(dir);
        }
        match dir.parent() {
            Some(parent) if parent != dir => dir = parent.to_path_buf(),
            _ => {
                return Err(Error::ReachedFilesystemRoot {
                    start: start.to_path_buf(),
                })
            }
        }
    }
}
