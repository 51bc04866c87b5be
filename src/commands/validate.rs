//! # Validate Command Implementation
//!
//! Loads the root configuration and the configuration of every workspace
//! package, validating each against its schema and resolving its presets.
//! Nothing is written.
//!
//! In loose mode, packages without a configuration are reported as skipped
//! rather than failed, matching what generation would do with them.

use std::path::Path;

use anyhow::{bail, Result};

use tscmono::config::{self, resolve_ts_config, RootConfig};
use tscmono::error::Error;
use tscmono::output::marker;
use tscmono::path::resolve_location;

use super::Session;

/// Outcome of checking one package
#[derive(Debug)]
enum Check {
    Valid,
    Skipped(Error),
    Failed(Error),
}

fn check_package(dir: &Path, root: &Path, root_config: &RootConfig) -> Check {
    let result = config::load_package_config(dir, root)
        .and_then(|package| resolve_ts_config(root_config, &package).map(|_| ()));
    match result {
        Ok(()) => Check::Valid,
        Err(e) if root_config.is_loose() && e.is_config_unavailable() => Check::Skipped(e),
        Err(e) => Check::Failed(e),
    }
}

pub fn execute(session: &Session) -> Result<()> {
    let out = &session.out;
    let root = session.ctx.root()?;
    let root_config = session.ctx.root_config()?;
    println!(
        "{} Root configuration at {} is valid",
        marker(out, "✅", "[OK]"),
        root.display()
    );

    let workspaces = session.ctx.workspaces()?;
    let mut failures = 0;
    for (name, entry) in workspaces.iter() {
        let dir = resolve_location(&root, &entry.location);
        match check_package(&dir, &root, &root_config) {
            Check::Valid => println!("{} {}", marker(out, "✅", "[OK]"), out.bold(name)),
            Check::Skipped(e) => {
                println!("{} {} (skipped)", marker(out, "⏭️", "[SKIP]"), out.bold(name));
                log::debug!("{}: {}", name, e);
            }
            Check::Failed(e) => {
                failures += 1;
                println!("{} {}", marker(out, "❌", "[FAIL]"), out.bold(name));
                eprintln!("{}", e);
            }
        }
    }

    if failures > 0 {
        bail!("{} package configuration(s) failed validation", failures);
    }
    println!(
        "{} {} packages checked",
        marker(out, "🎉", "[DONE]"),
        workspaces.len()
    );
    Ok(())
}
