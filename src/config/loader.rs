//! Search, validate and deserialize a configuration document

use std::path::Path;

use log::debug;
use serde::de::DeserializeOwned;

use super::schema::Schema;
use super::search;
use crate::error::{Error, Result};

/// Locate configuration `name` starting in `search_dir`, validate it against
/// `schema` and deserialize it
///
/// `root_dir` anchors relative schema references. `stop_dir` bounds the
/// upward search; `None` means the home directory.
pub fn load_config<T>(
    schema: &Schema,
    name: &str,
    search_dir: &Path,
    root_dir: &Path,
    stop_dir: Option<&Path>,
) -> Result<T>
where
    T: DeserializeOwned,
{
    let found =
        search::search(name, search_dir, stop_dir)?.ok_or_else(|| Error::ConfigNotFound {
            name: name.to_string(),
            dir: search_dir.to_path_buf(),
        })?;

    let violations = schema.validate(root_dir, &found.value)?;
    if !violations.is_empty() {
        return Err(Error::ConfigInvalid {
            name: name.to_string(),
            schema: schema.name().to_string(),
            path: found.path,
            violations,
        });
    }

    debug!("Loaded {} configuration from {}", name, found.path.display());
    serde_json::from_value(found.value).map_err(|e| Error::ConfigInvalid {
        name: name.to_string(),
        schema: schema.name().to_string(),
        path: found.path.clone(),
        violations: vec![e.to_string()],
    })
}
