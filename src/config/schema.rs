//! JSON Schemas for tscmono configuration
//!
//! The built-in schemas live in `schemas/` and are embedded at compile time.
//! They cross-reference each other with relative `$ref`s (`"./preset.json"`),
//! which the validator cannot follow on its own. [`Schema::prepare`] inlines
//! every such reference into the schema's `definitions` under a generated
//! key and points the `$ref` at it.

use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::Path;

use log::debug;
use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;

use crate::error::{Error, Result};

const BUILTIN_SCHEMAS: [(&str, &str); 4] = [
    ("root.json", include_str!("../../schemas/root.json")),
    ("workspace.json", include_str!("../../schemas/workspace.json")),
    ("files.json", include_str!("../../schemas/files.json")),
    ("preset.json", include_str!("../../schemas/preset.json")),
];

/// Keys that must not survive inside an inlined sub-schema
const STRIPPED_KEYS: [&str; 3] = ["$id", "id", "$schema"];

/// Source text of a built-in schema, looked up by file name (`./` optional)
pub fn builtin_source(reference: &str) -> Option<&'static str> {
    let file = reference.trim_start_matches("./");
    BUILTIN_SCHEMAS
        .iter()
        .find(|(name, _)| *name == file)
        .map(|(_, source)| *source)
}

/// A named configuration schema
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    name: String,
    value: JsonValue,
}

impl Schema {
    pub fn new(name: impl Into<String>, value: JsonValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Schema for the monorepo root configuration
    pub fn root() -> Result<Self> {
        Self::builtin("root.json")
    }

    /// Schema for a package configuration
    pub fn workspace() -> Result<Self> {
        Self::builtin("workspace.json")
    }

    fn builtin(file: &str) -> Result<Self> {
        let source = builtin_source(file).ok_or_else(|| Error::SchemaRef {
            reference: file.to_string(),
            message: "no such built-in schema".to_string(),
        })?;
        Ok(Self::new(file, serde_json::from_str(source)?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &JsonValue {
        &self.value
    }

    /// Produce a self-contained copy of the schema
    ///
    /// Every `$ref` beginning with `.` is looked up among the built-in schemas
    /// first and relative to `root_dir` second. Each distinct target is
    /// registered once under `definitions/<uuid>`, and referenced documents are
    /// processed the same way, so chains of references resolve to any depth.
    /// `self` is left untouched.
    pub fn prepare(&self, root_dir: &Path) -> Result<JsonValue> {
        let mut prepared = self.value.clone();
        let mut registry = RefRegistry::new(root_dir);
        registry.rewrite(&mut prepared)?;

        let mut definitions = Map::new();
        while let Some((id, mut document)) = registry.pending.pop_front() {
            if let JsonValue::Object(map) = &mut document {
                for key in STRIPPED_KEYS {
                    map.remove(key);
                }
            }
            registry.rewrite(&mut document)?;
            definitions.insert(id, document);
        }

        if !definitions.is_empty() {
            if let JsonValue::Object(root) = &mut prepared {
                let slot = root
                    .entry("definitions")
                    .or_insert_with(|| JsonValue::Object(Map::new()));
                if let JsonValue::Object(existing) = slot {
                    existing.extend(definitions);
                }
            }
        }
        Ok(prepared)
    }

    /// Validate `instance`, returning one `<property>: <message>` line per violation
    pub fn validate(&self, root_dir: &Path, instance: &JsonValue) -> Result<Vec<String>> {
        let prepared = self.prepare(root_dir)?;
        let validator = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft7)
            .build(&prepared)
            .map_err(|e| Error::SchemaRef {
                reference: self.name.clone(),
                message: e.to_string(),
            })?;

        Ok(validator
            .iter_errors(instance)
            .map(|err| {
                format!(
                    "{}: {}",
                    property_path(&err.instance_path.to_string()),
                    err
                )
            })
            .collect())
    }
}

/// Render a JSON pointer as a dotted property path rooted at `instance`
fn property_path(pointer: &str) -> String {
    format!("instance{}", pointer.replace('/', "."))
}

struct RefRegistry<'a> {
    root_dir: &'a Path,
    ids: HashMap<String, String>,
    pending: VecDeque<(String, JsonValue)>,
}

impl<'a> RefRegistry<'a> {
    fn new(root_dir: &'a Path) -> Self {
        Self {
            root_dir,
            ids: HashMap::new(),
            pending: VecDeque::new(),
        }
    }

    fn rewrite(&mut self, value: &mut JsonValue) -> Result<()> {
        match value {
            JsonValue::Object(map) => {
                let relative_ref = map
                    .get("$ref")
                    .and_then(JsonValue::as_str)
                    .filter(|reference| reference.starts_with('.'))
                    .map(str::to_string);
                if let Some(reference) = relative_ref {
                    let id = self.register(&reference)?;
                    map.insert(
                        "$ref".to_string(),
                        JsonValue::String(format!("#/definitions/{}", id)),
                    );
                }
                for (key, child) in map.iter_mut() {
                    if key != "$ref" {
                        self.rewrite(child)?;
                    }
                }
            }
            JsonValue::Array(items) => {
                for item in items {
                    self.rewrite(item)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn register(&mut self, reference: &str) -> Result<String> {
        let (key, document) = self.load(reference)?;
        if let Some(id) = self.ids.get(&key) {
            return Ok(id.clone());
        }
        let id = Uuid::new_v4().simple().to_string();
        debug!("Registering schema {} as {}", reference, id);
        self.ids.insert(key, id.clone());
        self.pending.push_back((id.clone(), document));
        Ok(id)
    }

    fn load(&self, reference: &str) -> Result<(String, JsonValue)> {
        let schema_error = |message: String| Error::SchemaRef {
            reference: reference.to_string(),
            message,
        };

        if let Some(source) = builtin_source(reference) {
            let document = serde_json::from_str(source).map_err(|e| schema_error(e.to_string()))?;
            return Ok((format!("builtin:{}", reference.trim_start_matches("./")), document));
        }

        let path = self.root_dir.join(reference);
        let canonical = fs::canonicalize(&path)
            .map_err(|e| schema_error(format!("{} ({})", e, path.display())))?;
        let text = fs::read_to_string(&canonical).map_err(|e| schema_error(e.to_string()))?;
        let document = serde_json::from_str(&text).map_err(|e| schema_error(e.to_string()))?;
        Ok((canonical.display().to_string(), document))
    }
}
