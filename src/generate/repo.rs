//! Directory tree reducer
//!
//! Emits one solution-style document per directory of the workspace tree.
//! Each references the documents of the entries directly below it, so
//! building the root document builds everything.

use std::path::{Path, PathBuf};

use log::info;
use rayon::prelude::*;
use serde_json::{json, Value as JsonValue};

use super::{
    file_name, link_document, package_config_or_skip, references, repo_template,
    ConfigDocument, PRIMARY_FILE,
};
use crate::config::{resolve_file_variant, DefaultFileMode, RootConfig};
use crate::context::Context;
use crate::error::Result;
use crate::merge::merge_all;
use crate::package::has_descriptor;
use crate::path::{relative_specifier, resolve_location};
use crate::tree::{paths_to_tree, TreeNode};

/// Generate directory documents for the workspaces known to `ctx`
pub fn generate(ctx: &Context) -> Result<Vec<ConfigDocument>> {
    let root = ctx.root()?;
    let root_config = ctx.root_config()?;
    let workspaces = ctx.workspaces()?;
    let locations: Vec<&str> = workspaces
        .values()
        .map(|entry| entry.location.as_str())
        .collect();
    let tree = paths_to_tree(&locations);
    generate_documents(&root, &root_config, &tree)
}

/// Generate directory documents for `tree`, rooted at `root_dir`
pub fn generate_documents(
    root_dir: &Path,
    root_config: &RootConfig,
    tree: &TreeNode,
) -> Result<Vec<ConfigDocument>> {
    let per_node = tree
        .nodes()
        .par_iter()
        .map(|node| node_documents(root_dir, root_config, node))
        .collect::<Result<Vec<_>>>()?;

    let mut documents: Vec<ConfigDocument> = Vec::new();
    for (index, node_docs) in per_node.into_iter().enumerate() {
        documents.extend(node_docs);
        if index == 0 {
            documents.extend(link_document(root_dir, root_config));
        }
    }
    info!("Generated {} repo documents", documents.len());
    Ok(documents)
}

/// Child directories of `node` that should be referenced
///
/// Plain directories are always kept. Packages are kept only when their
/// configuration loads; in loose mode a package without one is dropped.
fn referenced_children(
    root_dir: &Path,
    root_config: &RootConfig,
    node: &TreeNode,
) -> Result<Vec<PathBuf>> {
    let mut children = Vec::new();
    for child in node.children.values() {
        let dir = resolve_location(root_dir, child.path());
        let keep = !has_descriptor(&dir)
            || package_config_or_skip(&dir, root_dir, root_config)?.is_some();
        if keep {
            children.push(dir);
        }
    }
    Ok(children)
}

fn node_documents(
    root_dir: &Path,
    root_config: &RootConfig,
    node: &TreeNode,
) -> Result<Vec<ConfigDocument>> {
    let dir = resolve_location(root_dir, &node.path);
    let is_root = node.is_root();
    let children = referenced_children(root_dir, root_config, node)?;
    let variants = root_config.variant_names();

    let child_references = |file: &str| -> JsonValue {
        let targets: Vec<PathBuf> = children.iter().map(|child| child.join(file)).collect();
        references(&dir, &targets)
    };

    let points_at_variants = is_root
        && !variants.is_empty()
        && root_config.default_file_mode != DefaultFileMode::Workspaces;
    let primary_references = if points_at_variants {
        let targets: Vec<PathBuf> = variants
            .iter()
            .map(|variant| dir.join(file_name(Some(*variant))))
            .collect();
        references(&dir, &targets)
    } else {
        child_references(PRIMARY_FILE)
    };

    let root_extends = if is_root {
        json!({ "extends": relative_specifier(&dir, &root_dir.join(&root_config.base_config)) })
    } else {
        JsonValue::Null
    };

    let mut documents = vec![ConfigDocument {
        path: dir.join(PRIMARY_FILE),
        is_root,
        content: merge_all([
            repo_template(),
            json!({ "references": primary_references }),
            root_extends,
        ]),
    }];

    for variant in &variants {
        // The link document takes this path at the root
        if is_root && root_config.link_file.as_deref() == Some(*variant) {
            continue;
        }
        let name = file_name(Some(*variant));
        let resolved = if is_root {
            resolve_file_variant(root_config, variant, None)?
        } else {
            JsonValue::Null
        };
        documents.push(ConfigDocument {
            path: dir.join(&name),
            is_root,
            content: merge_all([
                repo_template(),
                resolved,
                json!({ "references": child_references(&name) }),
            ]),
        });
    }
    Ok(documents)
}
