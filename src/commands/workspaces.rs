//! # Workspaces Command Implementation
//!
//! Prints the normalized workspace listing (name, location and workspace
//! dependencies of every package) as pretty JSON, whatever Yarn version
//! produced it.

use anyhow::Result;

use super::Session;

pub fn execute(session: &Session) -> Result<()> {
    let workspaces = session.ctx.workspaces()?;
    println!("{}", serde_json::to_string_pretty(&*workspaces)?);
    Ok(())
}
