//! # Generator Registry
//!
//! tscmono ships two generators, exposed as plugins under the names they are
//! published with:
//!
//! | Plugin                      | Command              | Default priority |
//! |-----------------------------|----------------------|------------------|
//! | `@tscmono/plugin-repo`      | `generate repo`      | 10               |
//! | `@tscmono/plugin-workspace` | `generate workspace` | 20               |
//!
//! A bare `tscmono` (or `tscmono generate`) runs every enabled plugin flagged
//! `run_on_default`, lowest priority first.
//!
//! ## Enablement
//!
//! The root package descriptor's `dependencies` and `devDependencies` are
//! scanned for names matching `@?tscmono[/-](plugin|preset)-<name>`:
//!
//! - nothing declared: every built-in is enabled
//! - a preset declared: every built-in is enabled
//! - a plugin declared: the built-in with that name is enabled
//!
//! Declared plugins with no built-in counterpart are reported and ignored.

use std::path::Path;

use log::{debug, warn};
use regex::Regex;

use crate::context::Context;
use crate::error::Result;
use crate::generate::{self, ConfigDocument};
use crate::package::read_descriptor;

const PLUGIN_PATTERN: &str = r"^@?tscmono[/-](plugin|preset)-(.+)$";

/// The document reducer a plugin runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    Repo,
    Workspace,
}

impl Generator {
    pub fn generate(&self, ctx: &Context) -> Result<Vec<ConfigDocument>> {
        match self {
            Generator::Repo => generate::repo::generate(ctx),
            Generator::Workspace => generate::workspace::generate(ctx),
        }
    }
}

/// Capability descriptor of a plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plugin {
    /// Short name, also the `generate` subcommand
    pub name: &'static str,
    /// Published package name
    pub package: &'static str,
    pub generator: Generator,
    pub run_on_default: bool,
    pub run_on_default_priority: u32,
}

impl Plugin {
    /// Command path run by the default command
    pub fn run_on_default_path(&self) -> [&'static str; 2] {
        ["generate", self.name]
    }
}

pub const BUILTIN_PLUGINS: [Plugin; 2] = [
    Plugin {
        name: "repo",
        package: "@tscmono/plugin-repo",
        generator: Generator::Repo,
        run_on_default: true,
        run_on_default_priority: 10,
    },
    Plugin {
        name: "workspace",
        package: "@tscmono/plugin-workspace",
        generator: Generator::Workspace,
        run_on_default: true,
        run_on_default_priority: 20,
    },
];

/// A declared dependency recognized as a plugin or preset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declared {
    Plugin { package: String, name: String },
    Preset { package: String },
}

/// Parse a dependency name against the plugin naming convention
pub fn classify(pattern: &Regex, dependency: &str) -> Option<Declared> {
    let captures = pattern.captures(dependency)?;
    let name = captures.get(2)?.as_str().to_string();
    match captures.get(1)?.as_str() {
        "preset" => Some(Declared::Preset {
            package: dependency.to_string(),
        }),
        _ => Some(Declared::Plugin {
            package: dependency.to_string(),
            name,
        }),
    }
}

/// Registry entry with its enablement state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registered {
    pub plugin: Plugin,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginRegistry {
    entries: Vec<Registered>,
    unknown: Vec<String>,
}

impl PluginRegistry {
    /// Every built-in, enabled
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_PLUGINS
                .iter()
                .map(|plugin| Registered {
                    plugin: *plugin,
                    enabled: true,
                })
                .collect(),
            unknown: Vec::new(),
        }
    }

    /// Build the registry from the root descriptor in `root_dir`
    pub fn discover(root_dir: &Path) -> Result<Self> {
        let descriptor = read_descriptor(root_dir)?;
        Self::from_dependencies(&descriptor.dependency_names())
    }

    /// Build the registry from a list of declared dependency names
    pub fn from_dependencies<S: AsRef<str>>(dependencies: &[S]) -> Result<Self> {
        let pattern = Regex::new(PLUGIN_PATTERN)?;
        let declared: Vec<Declared> = dependencies
            .iter()
            .filter_map(|dep| classify(&pattern, dep.as_ref()))
            .collect();
        debug!("Declared plugins and presets: {:?}", declared);

        let has_preset = declared
            .iter()
            .any(|d| matches!(d, Declared::Preset { .. }));
        if declared.is_empty() || has_preset {
            return Ok(Self::builtin());
        }

        let mut registry = Self::builtin();
        for entry in &mut registry.entries {
            entry.enabled = false;
        }
        for item in declared {
            if let Declared::Plugin { package, name } = item {
                match registry.entries.iter_mut().find(|e| e.plugin.name == name) {
                    Some(entry) => entry.enabled = true,
                    None => {
                        warn!("Plugin {} is not a known tscmono generator", package);
                        registry.unknown.push(package);
                    }
                }
            }
        }
        Ok(registry)
    }

    pub fn entries(&self) -> &[Registered] {
        &self.entries
    }

    /// Declared plugin packages with no built-in counterpart
    pub fn unknown(&self) -> &[String] {
        &self.unknown
    }

    pub fn find(&self, name: &str) -> Option<&Registered> {
        self.entries.iter().find(|entry| entry.plugin.name == name)
    }

    /// Enabled plugins flagged to run by default, in priority order
    pub fn default_run_order(&self) -> Vec<Plugin> {
        let mut plugins: Vec<Plugin> = self
            .entries
            .iter()
            .filter(|entry| entry.enabled && entry.plugin.run_on_default)
            .map(|entry| entry.plugin)
            .collect();
        plugins.sort_by_key(|plugin| plugin.run_on_default_priority);
        plugins
    }
}
