//! # Error Handling
//!
//! This module defines the centralized error type for `tscmono`. It uses the
//! `thiserror` library to create a single `Error` enum covering every failure
//! mode of a generation run, from root discovery to document output.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Each variant carries enough context (paths,
//!   names, commands) to produce an actionable message on its own.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library.
//!
//! ## Propagation
//!
//! Every variant is fatal for the run that produced it. The only place where an
//! error is swallowed is the loose-mode downgrade in the generators, where a
//! missing, unparsable or invalid package configuration excludes that package
//! instead of aborting (see `generate::package_config_or_skip`).

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for tscmono operations
#[derive(Error, Debug)]
pub enum Error {
    /// Neither the workspace strategy nor the git strategy could locate the
    /// monorepo root.
    #[error("Could not find monorepo root from {start}: {message}")]
    RootNotFound { start: PathBuf, message: String },

    /// An upward directory walk hit the filesystem root without finding a
    /// package descriptor.
    #[error("Reached root folder: no package.json found above {start}")]
    ReachedFilesystemRoot { start: PathBuf },

    /// The installed package manager reported a major version that has no
    /// registered workspace parser.
    #[error("Unknown Yarn Version: {version}")]
    UnknownPackageManagerVersion { version: String },

    /// No configuration named `name` could be located from `dir`.
    #[error("Configuration for {name} cannot be found! (searched from: \"{}\")", dir.display())]
    ConfigNotFound { name: String, dir: PathBuf },

    /// A configuration document failed schema validation.
    ///
    /// `violations` holds one `<property>: <message>` line per failure.
    #[error(
        "Configuration for {name} is invalid! (at: \"{}\", schema: {schema})\n\n{}",
        path.display(),
        violations.iter().map(|v| format!("    {}", v)).collect::<Vec<_>>().join("\n")
    )]
    ConfigInvalid {
        name: String,
        schema: String,
        path: PathBuf,
        violations: Vec<String>,
    },

    /// A package requested a preset that the root configuration does not declare.
    #[error("Preset \"{preset}\" not found in root configuration presets")]
    PresetNotFound { preset: String },

    /// A package requested a preset but the root configuration declares none.
    #[error("Preset \"{preset}\" requested but root configuration declares no presets")]
    PresetsUndeclared { preset: String },

    /// A relative `$ref` inside a schema could not be resolved.
    #[error("Schema reference \"{reference}\" could not be resolved: {message}")]
    SchemaRef { reference: String, message: String },

    /// An external command failed to start or exited unsuccessfully.
    #[error("Command failed in {}: {command} - {stderr}", cwd.display())]
    Command {
        command: String,
        cwd: PathBuf,
        stderr: String,
    },

    /// The package manager's workspace listing could not be interpreted.
    #[error("Workspace listing parse error: {message}")]
    WorkspaceParse { message: String },

    /// A package descriptor was missing or malformed.
    #[error("Package descriptor error at {}: {message}", dir.display())]
    PackageDescriptor { dir: PathBuf, message: String },

    /// An error occurred while writing generated documents.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// An error indicating that a mutex or other lock has been poisoned.
    #[error("Lock poisoned: {context}")]
    LockPoisoned { context: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    /// A regular expression compilation error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Whether this error means "the package has no usable configuration".
    ///
    /// Covers a missing configuration, one that fails validation, and a
    /// descriptor or rc file that cannot be read or parsed. These are the only
    /// failures loose mode is allowed to downgrade.
    pub fn is_config_unavailable(&self) -> bool {
        matches!(
            self,
            Error::ConfigNotFound { .. }
                | Error::ConfigInvalid { .. }
                | Error::PackageDescriptor { .. }
                | Error::Io(_)
                | Error::Json(_)
                | Error::Yaml(_)
        )
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
