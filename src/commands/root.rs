//! # Root Command Implementation
//!
//! Prints the monorepo root as detected from the working directory (or the
//! `--root` override). Output is the bare path so it can be used in scripts.

use anyhow::Result;

use super::Session;

pub fn execute(session: &Session) -> Result<()> {
    let root = session.ctx.root()?;
    println!("{}", root.display());
    Ok(())
}
