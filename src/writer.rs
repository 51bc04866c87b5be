//! Writing generated documents to disk
//!
//! Documents are rendered as JSON with two-space indentation and a trailing
//! newline. Parent directories are created as needed. Writes are independent
//! of each other: a failure aborts the remaining writes but does not undo
//! those already made.

use std::fs;
use std::path::PathBuf;

use log::debug;

use crate::error::{Error, Result};
use crate::generate::ConfigDocument;

/// Render a document the way it is written to disk
pub fn render(document: &ConfigDocument) -> Result<String> {
    let mut text = serde_json::to_string_pretty(&document.content)?;
    text.push('\n');
    Ok(text)
}

/// Write every document, returning the paths written
///
/// With `dry_run` nothing touches the filesystem; the returned paths are the
/// ones that would have been written.
pub fn write_documents(documents: &[ConfigDocument], dry_run: bool) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(documents.len());
    for document in documents {
        let text = render(document)?;
        if dry_run {
            debug!("Would write {}", document.path.display());
        } else {
            write_one(&document.path, &text)?;
        }
        written.push(document.path.clone());
    }
    Ok(written)
}

fn write_one(path: &std::path::Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::Filesystem {
            message: format!("Failed to create directory '{}': {}", parent.display(), e),
        })?;
    }
    fs::write(path, text).map_err(|e| Error::Filesystem {
        message: format!("Failed to write file '{}': {}", path.display(), e),
    })?;
    debug!("Wrote {}", path.display());
    Ok(())
}
