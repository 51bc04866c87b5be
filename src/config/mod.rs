//! # Configuration Model and Loading
//!
//! tscmono reads two kinds of configuration, both discovered under the module
//! name `tscmono`:
//!
//! - **Root configuration** (`RootConfig`): lives at the monorepo root and
//!   declares the shared base tsconfig, presets, file variants and the
//!   strict/loose tolerance mode.
//! - **Package configuration** (`PackageConfig`): one per workspace package,
//!   selecting presets and supplying overrides.
//!
//! ## Submodules
//!
//! - `search`: the layered file search (descriptor property, rc files).
//! - `schema`: built-in JSON Schemas, `$ref` preprocessing and validation.
//! - `loader`: search + validate + deserialize.
//! - `resolve`: folding presets, overrides and `extends` into one document.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::Result;

pub mod loader;
pub mod resolve;
pub mod schema;
pub mod search;

pub use loader::load_config;
pub use resolve::{resolve_file_variant, resolve_ts_config};

/// Module name used for configuration discovery (`.tscmonorc`, `"tscmono"` key, ...)
pub const CONFIG_NAME: &str = "tscmono";

/// Tolerance policy for per-package configuration problems
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// A missing or invalid package configuration aborts the run
    #[default]
    Strict,
    /// A missing or invalid package configuration excludes the package
    Loose,
}

/// What the root `tsconfig.json` references when file variants exist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefaultFileMode {
    /// Reference child workspaces, like every other directory
    #[serde(rename = "default")]
    Workspaces,
    /// Reference the root-level variant documents
    #[default]
    #[serde(rename = "files")]
    Files,
}

/// Accessors shared by every configuration layer that can pick presets
pub trait ConfigLayers {
    fn preset(&self) -> Option<&str>;
    fn presets(&self) -> &[String];
    fn extends(&self) -> Option<&str>;
    fn overrides(&self) -> Option<&JsonValue>;
}

/// One entry of `RootConfig::files`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileVariantConfig {
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub presets: Vec<String>,
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub overrides: Option<JsonValue>,
}

/// Monorepo-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootConfig {
    /// Base tsconfig path, relative to the monorepo root
    pub base_config: String,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub presets: Option<BTreeMap<String, JsonValue>>,
    #[serde(default)]
    pub files: Option<BTreeMap<String, FileVariantConfig>>,
    #[serde(default)]
    pub link_file: Option<String>,
    #[serde(default)]
    pub default_file_mode: DefaultFileMode,
}

impl RootConfig {
    pub fn is_loose(&self) -> bool {
        self.mode == Mode::Loose
    }

    /// Declared file variant names, in sorted order
    pub fn variant_names(&self) -> Vec<&str> {
        self.files
            .as_ref()
            .map(|files| files.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// Per-package configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageConfig {
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub presets: Vec<String>,
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub overrides: Option<JsonValue>,
    /// Variant-specific overrides keyed by variant name
    #[serde(default)]
    pub files: BTreeMap<String, JsonValue>,
}

macro_rules! impl_config_layers {
    ($ty:ty) => {
        impl ConfigLayers for $ty {
            fn preset(&self) -> Option<&str> {
                self.preset.as_deref()
            }
            fn presets(&self) -> &[String] {
                &self.presets
            }
            fn extends(&self) -> Option<&str> {
                self.extends.as_deref()
            }
            fn overrides(&self) -> Option<&JsonValue> {
                self.overrides.as_ref()
            }
        }
    };
}

impl_config_layers!(FileVariantConfig);
impl_config_layers!(PackageConfig);

/// Load and validate the root configuration, searching upward from `root_dir`
pub fn load_root_config(root_dir: &Path) -> Result<RootConfig> {
    let schema = schema::Schema::root()?;
    load_config(&schema, CONFIG_NAME, root_dir, root_dir, None)
}

/// Load and validate the configuration of the package living in `package_dir`
///
/// The search is confined to `package_dir` itself so that a package without
/// its own configuration never picks up the root configuration.
pub fn load_package_config(package_dir: &Path, root_dir: &Path) -> Result<PackageConfig> {
    let schema = schema::Schema::workspace()?;
    load_config(&schema, CONFIG_NAME, package_dir, root_dir, Some(package_dir))
}
