//! # Plugins Command Implementation
//!
//! Lists the generators tscmono knows about, whether the root package enables
//! them, and the order in which a bare `tscmono` runs them.

use anyhow::Result;

use tscmono::output::marker;
use tscmono::plugins::PluginRegistry;

use super::Session;

pub fn execute(session: &Session) -> Result<()> {
    let out = &session.out;
    let root = session.ctx.root()?;
    let registry = PluginRegistry::discover(&root)?;

    for entry in registry.entries() {
        let plugin = &entry.plugin;
        let state = if entry.enabled {
            marker(out, "✅", "[enabled]")
        } else {
            marker(out, "⛔", "[disabled]")
        };
        println!(
            "{} {} ({}) priority {}{}",
            state,
            out.bold(plugin.name),
            plugin.package,
            plugin.run_on_default_priority,
            if plugin.run_on_default { ", runs by default" } else { "" }
        );
    }
    for package in registry.unknown() {
        println!("{} {} (unknown, ignored)", marker(out, "⚠️", "[WARN]"), package);
    }
    Ok(())
}
