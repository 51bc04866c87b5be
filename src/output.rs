//! # Terminal Output
//!
//! Controls whether command output uses color and emoji markers. The decision
//! follows the `--color` flag first and the environment second:
//!
//! - `--color=always|never` wins outright
//! - `NO_COLOR` (any value) or `CLICOLOR=0` turns color off
//! - `CLICOLOR_FORCE=1` turns color on even without a TTY
//! - `TERM=dumb` turns color off
//! - otherwise the terminal's own capabilities decide
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tscmono::output::{OutputConfig, marker};
//!
//! let out = OutputConfig::from_env_and_flag("auto");
//! println!("{} wrote {}", marker(&out, "✅", "[OK]"), out.path(&target));
//! ```

use std::env;
use std::path::Path;

use console::style;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolve the `--color` flag (`always`, `never`, `auto`) against the environment
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };
        console::set_colors_enabled(use_color);
        Self { use_color }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }
        console::Term::stdout().features().colors_supported()
    }

    /// A path, shown relative to `base` when possible and highlighted when color is on
    pub fn path(&self, path: &Path, base: &Path) -> String {
        let shown = path.strip_prefix(base).unwrap_or(path).display().to_string();
        if self.use_color {
            style(shown).cyan().to_string()
        } else {
            shown
        }
    }

    /// Emphasized text for headings and names
    pub fn bold(&self, text: &str) -> String {
        if self.use_color {
            style(text).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// The emoji when color is on, the plain marker otherwise
pub fn marker<'a>(config: &OutputConfig, emoji: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji
    } else {
        plain
    }
}
