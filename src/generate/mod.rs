//! # Document Generation
//!
//! Turns the workspace layout and the resolved configuration into the list of
//! tsconfig documents to write. Two reducers exist:
//!
//! - [`repo`]: walks the directory tree built from workspace locations and
//!   emits one solution-style document per directory, referencing the
//!   documents of the directories and packages below it.
//! - [`workspace`]: walks the package dependency graph and emits one document
//!   per package, referencing the documents of its workspace dependencies.
//!
//! Both produce [`ConfigDocument`]s; nothing is written here (see
//! [`crate::writer`]).

use std::path::{Path, PathBuf};

use log::warn;
use serde::Serialize;
use serde_json::{json, Value as JsonValue};

use crate::config::{self, PackageConfig, RootConfig};
use crate::error::Result;
use crate::path::relative_specifier;

pub mod repo;
pub mod workspace;

/// File name of the primary document in every directory
pub const PRIMARY_FILE: &str = "tsconfig.json";

/// A document to be written
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    /// Absolute target file
    pub path: PathBuf,
    /// Whether the document sits at the monorepo root
    pub is_root: bool,
    pub content: JsonValue,
}

/// `tsconfig.json` for the primary document, `tsconfig.<variant>.json` otherwise
pub fn file_name(variant: Option<&str>) -> String {
    match variant {
        Some(variant) => format!("tsconfig.{}.json", variant),
        None => PRIMARY_FILE.to_string(),
    }
}

/// Base content of a directory-level (solution) document
pub fn repo_template() -> JsonValue {
    json!({ "files": [] })
}

/// Base content of a package document
pub fn workspace_template() -> JsonValue {
    json!({ "compilerOptions": { "composite": true } })
}

/// `{"path": ...}` entries for each target, relative to `base`
pub(crate) fn references<'a, I>(base: &Path, targets: I) -> JsonValue
where
    I: IntoIterator<Item = &'a PathBuf>,
{
    JsonValue::Array(
        targets
            .into_iter()
            .map(|target| json!({ "path": relative_specifier(base, target) }))
            .collect(),
    )
}

/// Load the configuration of the package in `dir`
///
/// Returns `Ok(None)` when the package has no usable configuration (missing,
/// unparsable or invalid) and the root configuration is in loose mode; the package is then left out of the
/// generated output. In strict mode the error propagates.
pub fn package_config_or_skip(
    dir: &Path,
    root_dir: &Path,
    root_config: &RootConfig,
) -> Result<Option<PackageConfig>> {
    match config::load_package_config(dir, root_dir) {
        Ok(config) => Ok(Some(config)),
        Err(e) if root_config.is_loose() && e.is_config_unavailable() => {
            warn!("Skipping {}: {}", dir.display(), e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Root-level aggregate document referencing every root variant document
///
/// `None` unless the root configuration names a `linkFile`. The link file
/// never references itself. Only the tree reducer emits it, since the root
/// variant documents it points at come from that reducer.
pub fn link_document(root_dir: &Path, root_config: &RootConfig) -> Option<ConfigDocument> {
    let link = root_config.link_file.as_deref()?;
    let targets: Vec<PathBuf> = root_config
        .variant_names()
        .into_iter()
        .filter(|variant| *variant != link)
        .map(|variant| root_dir.join(file_name(Some(variant))))
        .collect();
    let mut content = repo_template();
    content["references"] = references(root_dir, &targets);
    Some(ConfigDocument {
        path: root_dir.join(file_name(Some(link))),
        is_root: true,
        content,
    })
}
