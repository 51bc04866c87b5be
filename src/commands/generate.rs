//! # Generate Command Implementation
//!
//! `tscmono generate repo|workspace` runs one generator; `tscmono generate`
//! (or plain `tscmono`) runs every enabled generator flagged to run by
//! default, in priority order. Documents are written unless `--dry-run` is
//! given, in which case the paths that would be written are listed.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use tscmono::output::marker;
use tscmono::plugins::{Plugin, PluginRegistry};
use tscmono::writer;

use super::Session;

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    #[command(subcommand)]
    pub target: Option<GenerateTarget>,

    /// List the files that would be written without writing them
    #[arg(long, global = true)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateTarget {
    /// One solution-style tsconfig per workspace directory
    Repo,
    /// One tsconfig per workspace package, referencing its dependencies
    Workspace,
}

impl GenerateTarget {
    fn plugin_name(&self) -> &'static str {
        match self {
            GenerateTarget::Repo => "repo",
            GenerateTarget::Workspace => "workspace",
        }
    }
}

pub fn execute(args: GenerateArgs, session: &Session) -> Result<()> {
    let root = session.ctx.root()?;
    let registry = PluginRegistry::discover(&root)?;

    let plugins: Vec<Plugin> = match args.target {
        Some(target) => {
            let name = target.plugin_name();
            match registry.find(name) {
                Some(entry) if entry.enabled => vec![entry.plugin],
                Some(entry) => bail!(
                    "Generator `{}` is not enabled; add {} to the root package dependencies",
                    name,
                    entry.plugin.package
                ),
                None => bail!("Unknown generator `{}`", name),
            }
        }
        None => registry.default_run_order(),
    };

    if plugins.is_empty() {
        println!("Nothing to generate: no generator is enabled");
        return Ok(());
    }

    let out = &session.out;
    let mut total = 0;
    for plugin in plugins {
        println!(
            "{} Generating {}",
            marker(out, "🔧", "[GEN]"),
            out.bold(&plugin.run_on_default_path().join(" "))
        );
        let documents = plugin.generator.generate(&session.ctx)?;
        let written = writer::write_documents(&documents, args.dry_run)?;
        for path in &written {
            let verb = if args.dry_run { "would write" } else { "wrote" };
            println!("  {} {}", verb, out.path(path, &root));
        }
        total += written.len();
    }

    if args.dry_run {
        println!("{} Dry run: {} files not written", marker(out, "📋", "[DRY]"), total);
    } else {
        println!("{} Generated {} files", marker(out, "✅", "[OK]"), total);
    }
    Ok(())
}
