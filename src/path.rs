//! Path manipulation utilities for tscmono

use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::error::{Error, Result};

const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Match a slash-delimited relative path against a glob pattern
///
/// `*` never crosses a `/`; `**` spans any number of segments.
pub fn glob_match(pattern: &str, path: &str) -> Result<bool> {
    let pattern = Pattern::new(pattern).map_err(Error::Glob)?;
    Ok(pattern.matches_with(path, GLOB_OPTIONS))
}

/// Render a path with `/` separators regardless of platform
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::CurDir => None,
            other => Some(other.as_os_str().to_string_lossy().into_owned()),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Relative specifier from directory `base` to `target`
///
/// The result always starts with `.`: `./` is prepended when the relative
/// path does not already begin with one, so the compiler never sees a bare
/// (package-like) specifier.
pub fn relative_specifier(base: &Path, target: &Path) -> String {
    let relative = pathdiff::diff_paths(target, base).unwrap_or_else(|| target.to_path_buf());
    dot_prefixed(&to_slash(&relative))
}

/// Prepend `./` unless `path` already starts with `.`
pub fn dot_prefixed(path: &str) -> String {
    if path.starts_with('.') {
        path.to_string()
    } else {
        format!("./{}", path)
    }
}

/// Join a slash-delimited workspace location onto the root directory
pub fn resolve_location(root: &Path, location: &str) -> PathBuf {
    location
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .fold(root.to_path_buf(), |acc, segment| acc.join(segment))
}
