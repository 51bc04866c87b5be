//! Package dependency graph reducer
//!
//! Every workspace package with a usable configuration gets a `tsconfig.json`
//! that extends the root base config and references the documents of its
//! workspace dependencies, plus one `tsconfig.<variant>.json` per root file
//! variant chained to that primary document. Nothing is written at the
//! monorepo root; the root documents and the link file belong to the tree
//! reducer.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, info};
use rayon::prelude::*;
use serde_json::{json, Map, Value as JsonValue};

use super::{
    file_name, package_config_or_skip, references, workspace_template, ConfigDocument,
    PRIMARY_FILE,
};
use crate::config::{resolve_file_variant, resolve_ts_config, PackageConfig, RootConfig};
use crate::context::Context;
use crate::error::Result;
use crate::merge::merge_all;
use crate::path::{relative_specifier, resolve_location};
use crate::workspace::{WorkspaceEntry, WorkspacesConfig};

/// A package whose configuration loaded successfully
struct Configured<'a> {
    name: &'a str,
    entry: &'a WorkspaceEntry,
    dir: PathBuf,
    config: PackageConfig,
}

/// Generate package documents for the workspaces known to `ctx`
pub fn generate(ctx: &Context) -> Result<Vec<ConfigDocument>> {
    let root = ctx.root()?;
    let root_config = ctx.root_config()?;
    let workspaces = ctx.workspaces()?;
    generate_documents(&root, &root_config, &workspaces)
}

/// Generate package documents from already-loaded inputs
pub fn generate_documents(
    root_dir: &Path,
    root_config: &RootConfig,
    workspaces: &WorkspacesConfig,
) -> Result<Vec<ConfigDocument>> {
    let loaded = workspaces
        .par_iter()
        .map(|(name, entry)| -> Result<Option<Configured>> {
            let dir = resolve_location(root_dir, &entry.location);
            let config = package_config_or_skip(&dir, root_dir, root_config)?;
            Ok(config.map(|config| Configured {
                name: name.as_str(),
                entry,
                dir,
                config,
            }))
        })
        .collect::<Result<Vec<_>>>()?;
    let packages: Vec<Configured> = loaded.into_iter().flatten().collect();
    debug!(
        "{} of {} workspaces have a configuration",
        packages.len(),
        workspaces.len()
    );

    let dirs: BTreeMap<&str, &Path> = packages
        .iter()
        .map(|package| (package.name, package.dir.as_path()))
        .collect();

    let per_package = packages
        .par_iter()
        .map(|package| package_documents(root_dir, root_config, package, &dirs))
        .collect::<Result<Vec<_>>>()?;

    let documents: Vec<ConfigDocument> = per_package.into_iter().flatten().collect();
    info!("Generated {} workspace documents", documents.len());
    Ok(documents)
}

fn package_documents(
    root_dir: &Path,
    root_config: &RootConfig,
    package: &Configured<'_>,
    dirs: &BTreeMap<&str, &Path>,
) -> Result<Vec<ConfigDocument>> {
    let dir = &package.dir;
    let deps: Vec<(&str, &Path)> = package
        .entry
        .workspace_dependencies
        .iter()
        .filter_map(|dep| match dirs.get(dep.as_str()) {
            Some(dep_dir) => Some((dep.as_str(), *dep_dir)),
            None => {
                debug!("{}: dependency {} has no configuration", package.name, dep);
                None
            }
        })
        .collect();

    let links = |file: &str| -> JsonValue {
        let targets: Vec<PathBuf> = deps
            .iter()
            .map(|(_, dep_dir)| dep_dir.join(file))
            .collect();
        let mut block = json!({ "references": references(dir, &targets) });
        if !deps.is_empty() {
            let paths: Map<String, JsonValue> = deps
                .iter()
                .map(|(name, dep_dir)| {
                    (name.to_string(), json!([relative_specifier(dir, dep_dir)]))
                })
                .collect();
            block["compilerOptions"] = json!({ "paths": paths });
        }
        block
    };

    let base_extends = relative_specifier(dir, &root_dir.join(&root_config.base_config));
    let mut documents = vec![ConfigDocument {
        path: dir.join(PRIMARY_FILE),
        is_root: false,
        content: merge_all([
            json!({ "extends": base_extends }),
            workspace_template(),
            resolve_ts_config(root_config, &package.config)?,
            links(PRIMARY_FILE),
        ]),
    }];

    for variant in root_config.variant_names() {
        let name = file_name(Some(variant));
        let resolved =
            resolve_file_variant(root_config, variant, package.config.files.get(variant))?;
        documents.push(ConfigDocument {
            path: dir.join(&name),
            is_root: false,
            content: merge_all([
                resolved,
                json!({ "extends": format!("./{}", PRIMARY_FILE) }),
                workspace_template(),
                links(&name),
            ]),
        });
    }
    Ok(documents)
}
