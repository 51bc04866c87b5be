//! Folding configuration layers into a single tsconfig fragment
//!
//! Layers are accumulated as `[overrides, preset..., {extends}]` and deep
//! merged left to right, so preset values win over raw overrides when both
//! set the same key.

use serde_json::{json, Value as JsonValue};

use super::{ConfigLayers, RootConfig};
use crate::error::{Error, Result};
use crate::merge::merge_all;

fn lookup_preset(root: &RootConfig, preset: &str) -> Result<JsonValue> {
    let presets = root.presets.as_ref().ok_or_else(|| Error::PresetsUndeclared {
        preset: preset.to_string(),
    })?;
    presets
        .get(preset)
        .cloned()
        .ok_or_else(|| Error::PresetNotFound {
            preset: preset.to_string(),
        })
}

/// Resolve one configuration layer against the root presets
pub fn resolve_ts_config<C>(root: &RootConfig, config: &C) -> Result<JsonValue>
where
    C: ConfigLayers + ?Sized,
{
    let mut layers = vec![config.overrides().cloned().unwrap_or(JsonValue::Null)];

    let names = config
        .preset()
        .into_iter()
        .chain(config.presets().iter().map(String::as_str));
    for name in names {
        layers.push(lookup_preset(root, name)?);
    }

    if let Some(extends) = config.extends() {
        layers.push(json!({ "extends": extends }));
    }

    Ok(merge_all(layers))
}

/// Resolve file variant `variant` for a package
///
/// The root's entry for `variant` is resolved like any other layer; the
/// package's own `files[variant]` object, when present, is merged on top.
/// `package_files` is `None` when resolving the variant for a directory that
/// is not itself a package.
pub fn resolve_file_variant(
    root: &RootConfig,
    variant: &str,
    package_files: Option<&JsonValue>,
) -> Result<JsonValue> {
    let base = match root.files.as_ref().and_then(|files| files.get(variant)) {
        Some(entry) => resolve_ts_config(root, entry)?,
        None => JsonValue::Null,
    };
    Ok(merge_all([base, package_files.cloned().unwrap_or(JsonValue::Null)]))
}
