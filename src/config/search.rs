//! Layered configuration file search
//!
//! Starting from a directory and walking upward, every directory is checked for
//! the following places, first hit wins:
//!
//! 1. the `<name>` property of the package descriptor
//! 2. `.<name>rc` (YAML, which also accepts JSON)
//! 3. `.<name>rc.json`
//! 4. `.<name>rc.yaml`
//! 5. `.<name>rc.yml`
//! 6. `<name>.config.json`
//!
//! Empty documents are ignored and the search moves on.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde_json::Value as JsonValue;

use crate::error::Result;
use crate::package;

/// A configuration document located by [`search`]
#[derive(Debug, Clone, PartialEq)]
pub struct Found {
    /// File the document was read from (the descriptor for property hits)
    pub path: PathBuf,
    pub value: JsonValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

/// Candidate file names for `name`, in lookup order, after the descriptor property
pub fn search_places(name: &str) -> Vec<String> {
    vec![
        format!(".{}rc", name),
        format!(".{}rc.json", name),
        format!(".{}rc.yaml", name),
        format!(".{}rc.yml", name),
        format!("{}.config.json", name),
    ]
}

fn format_of(file: &str) -> Format {
    if file.ends_with(".json") {
        Format::Json
    } else {
        Format::Yaml
    }
}

/// Default upper bound of an upward search: the home directory when `start`
/// lives under it, the filesystem root otherwise
pub fn default_stop_dir(start: &Path) -> Option<PathBuf> {
    dirs::home_dir().filter(|home| start.starts_with(home))
}

/// Search for configuration `name` from `start` up to and including `stop`
///
/// With `stop == None` the walk uses [`default_stop_dir`].
pub fn search(name: &str, start: &Path, stop: Option<&Path>) -> Result<Option<Found>> {
    let start = std::path::absolute(start)?;
    let stop = match stop {
        Some(dir) => Some(std::path::absolute(dir)?),
        None => default_stop_dir(&start),
    };

    let mut dir = start.as_path();
    loop {
        if let Some(found) = search_dir(name, dir)? {
            debug!("Found {} configuration at {}", name, found.path.display());
            return Ok(Some(found));
        }
        if stop.as_deref() == Some(dir) {
            return Ok(None);
        }
        match dir.parent() {
            Some(parent) if parent != dir => dir = parent,
            _ => return Ok(None),
        }
    }
}

/// Check the search places of a single directory
pub fn search_dir(name: &str, dir: &Path) -> Result<Option<Found>> {
    if package::has_descriptor(dir) {
        let descriptor = package::read_descriptor(dir)?;
        if let Some(value) = descriptor.property(name) {
            if !is_empty(value) {
                return Ok(Some(Found {
                    path: descriptor.path.clone(),
                    value: value.clone(),
                }));
            }
        }
    }

    for file in search_places(name) {
        let path = dir.join(&file);
        if !path.is_file() {
            continue;
        }
        let text = fs::read_to_string(&path)?;
        if text.trim().is_empty() {
            debug!("Skipping empty configuration file {}", path.display());
            continue;
        }
        let value: JsonValue = match format_of(&file) {
            Format::Json => serde_json::from_str(&text)?,
            Format::Yaml => serde_yaml::from_str(&text)?,
        };
        if is_empty(&value) {
            continue;
        }
        return Ok(Some(Found { path, value }));
    }
    Ok(None)
}

fn is_empty(value: &JsonValue) -> bool {
    value.is_null()
}
