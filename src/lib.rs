//! # tscmono
//!
//! Generates TypeScript project-reference configuration (`tsconfig.json` and
//! named variants) for Yarn workspace monorepos. Packages declare which shared
//! presets they use; tscmono works out the references between them from the
//! workspace dependency graph and writes one document per package and per
//! workspace directory.
//!
//! ## Quick Example
//!
//! ```
//! use tscmono::tree::paths_to_tree;
//!
//! let tree = paths_to_tree(&["packages/a", "packages/b", "tools/lint"]);
//! let dirs: Vec<&str> = tree.nodes().iter().map(|n| n.path.as_str()).collect();
//! assert_eq!(dirs, vec!["", "packages", "tools"]);
//! ```
//!
//! ## Core Concepts
//!
//! - **Root discovery (`root`, `package`)**: find the monorepo root from any
//!   directory inside it, via workspace globs or git.
//! - **Workspace metadata (`workspace`, `exec`)**: ask the package manager for
//!   the workspace list and normalize it across Yarn major versions.
//! - **Configuration (`config`)**: locate, validate and resolve the root and
//!   per-package `tscmono` configuration.
//! - **Generation (`generate`, `writer`)**: reduce the workspace tree or
//!   dependency graph into documents and write them out.
//! - **Run context (`context`, `cache`)**: memoize root, workspace and config
//!   lookups for the duration of one invocation.
//!
//! ## Execution Flow
//!
//! 1.  **Root**: locate the monorepo root.
//! 2.  **Workspaces**: list the workspace packages and their dependencies.
//! 3.  **Configuration**: load the root configuration and each package's.
//! 4.  **Resolution**: fold presets, overrides and variants per package.
//! 5.  **Reduction**: build the documents for the selected generators.
//! 6.  **Output**: write every document as formatted JSON.

pub mod cache;
pub mod config;
pub mod context;
pub mod error;
pub mod exec;
pub mod generate;
pub mod merge;
pub mod output;
pub mod package;
pub mod path;
pub mod plugins;
pub mod root;
pub mod tree;
pub mod workspace;
pub mod writer;

#[cfg(test)]
mod path_proptest;
