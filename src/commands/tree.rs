//! # Tree Command Implementation
//!
//! Displays the workspace directory tree: every directory that contains
//! workspaces, down to the packages themselves. This is the structure the
//! `repo` generator walks.
//!
//! This command is a safe, read-only operation that does not modify any files.

use std::borrow::Cow;
use std::io::Write;

use anyhow::Result;
use ptree::{print_tree, Style, TreeItem};

use tscmono::tree::{paths_to_tree, TreeChild, TreeNode};

use super::Session;

pub fn execute(session: &Session) -> Result<()> {
    let root = session.ctx.root()?;
    let workspaces = session.ctx.workspaces()?;
    let locations: Vec<&str> = workspaces
        .values()
        .map(|entry| entry.location.as_str())
        .collect();
    let tree = paths_to_tree(&locations);

    let label = root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());
    print_tree(&DisplayNode::from_tree(label, &tree))
        .map_err(|e| anyhow::anyhow!("Failed to display tree: {}", e))?;
    Ok(())
}

/// Tree node structure for ptree visualization
#[derive(Clone, Debug, PartialEq)]
struct DisplayNode {
    label: String,
    children: Vec<DisplayNode>,
}

impl DisplayNode {
    fn from_tree(label: String, node: &TreeNode) -> Self {
        let children = node
            .children
            .iter()
            .map(|(segment, child)| match child {
                TreeChild::Leaf(_) => DisplayNode {
                    label: segment.clone(),
                    children: Vec::new(),
                },
                TreeChild::Node(inner) => DisplayNode::from_tree(format!("{}/", segment), inner),
            })
            .collect();
        DisplayNode { label, children }
    }
}

impl TreeItem for DisplayNode {
    type Child = DisplayNode;

    fn write_self<W: Write>(&self, f: &mut W, _style: &Style) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::Borrowed(&self.children)
    }
}
