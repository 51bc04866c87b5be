//! Deep merge of JSON documents
//!
//! One merge law is used everywhere a configuration layer is folded onto
//! another:
//!
//! - Objects: keys are merged recursively, source values taking precedence
//!   on conflicts.
//! - Arrays: the source array replaces the target array wholesale.
//! - Scalars and mismatched types: the source replaces the target.
//!
//! `references`, `paths` and every other array-valued field follow the same
//! rule; nothing is special-cased.
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use tscmono::merge::merge_all;
//!
//! let merged = merge_all([
//!     json!({"compilerOptions": {"strict": true, "lib": ["es2019"]}}),
//!     json!({"compilerOptions": {"lib": ["dom"]}}),
//! ]);
//! assert_eq!(
//!     merged,
//!     json!({"compilerOptions": {"strict": true, "lib": ["dom"]}})
//! );
//! ```

use serde_json::{Map, Value as JsonValue};

/// Recursively merge `source` into `target`
pub fn deep_merge(target: &mut JsonValue, source: &JsonValue) {
    match (target, source) {
        (JsonValue::Object(target_map), JsonValue::Object(source_map)) => {
            for (key, value) in source_map {
                match target_map.get_mut(key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        deep_merge(existing, value);
                    }
                    _ => {
                        target_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, source) => *target = source.clone(),
    }
}

/// Fold a sequence of documents left to right; later entries win
///
/// `null` entries are skipped so that optional layers can be passed through
/// unconditionally. An empty sequence yields an empty object.
pub fn merge_all<I>(layers: I) -> JsonValue
where
    I: IntoIterator<Item = JsonValue>,
{
    layers
        .into_iter()
        .filter(|layer| !layer.is_null())
        .fold(JsonValue::Object(Map::new()), |mut acc, layer| {
            deep_merge(&mut acc, &layer);
            acc
        })
}
