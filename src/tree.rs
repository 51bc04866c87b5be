//! Workspace path tree
//!
//! Turns the flat list of workspace locations reported by the package manager
//! into a tree mirroring the directory hierarchy. Internal nodes are
//! directories that contain workspaces; leaves are workspaces with nothing
//! nested below them.
//!
//! Every input path is first rooted under a sentinel segment ([`ROOT_MARKER`])
//! so that merging the single-path trees aligns them under one synthetic root
//! instead of colliding on each path's first real segment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sentinel segment used as the synthetic root scope while building trees
pub const ROOT_MARKER: &str = "<root>";

/// A child entry: either a nested directory node or a leaf workspace path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeChild {
    /// A leaf holding the full relative path of the workspace
    Leaf(String),
    /// A directory that has further descendants
    Node(TreeNode),
}

impl TreeChild {
    /// Relative path from the root for either kind of child
    pub fn path(&self) -> &str {
        match self {
            TreeChild::Leaf(path) => path,
            TreeChild::Node(node) => &node.path,
        }
    }
}

/// A directory in the workspace tree
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TreeNode {
    /// Relative path from the monorepo root; empty for the root itself
    pub path: String,
    /// Children keyed by their last path segment
    pub children: BTreeMap<String, TreeChild>,
}

impl TreeNode {
    /// The empty root node
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// All internal nodes in pre-order, starting with `self`
    pub fn nodes(&self) -> Vec<&TreeNode> {
        let mut out = vec![self];
        for child in self.children.values() {
            if let TreeChild::Node(node) = child {
                out.extend(node.nodes());
            }
        }
        out
    }

    /// Every workspace path contained in the tree (leaves and nodes below root)
    pub fn paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        for child in self.children.values() {
            out.push(child.path().to_string());
            if let TreeChild::Node(node) = child {
                out.extend(node.paths());
            }
        }
        out
    }

    /// Merge `other` into `self`
    ///
    /// Children merge key by key. When a leaf meets a node for the same key
    /// the node is kept: its `path` is the leaf's path, so nothing is lost.
    pub fn merge(&mut self, other: TreeNode) {
        if self.path.is_empty() {
            self.path = other.path;
        }
        for (segment, incoming) in other.children {
            match self.children.remove(&segment) {
                None => {
                    self.children.insert(segment, incoming);
                }
                Some(existing) => {
                    let merged = match (existing, incoming) {
                        (TreeChild::Node(mut node), TreeChild::Node(other)) => {
                            node.merge(other);
                            TreeChild::Node(node)
                        }
                        (TreeChild::Node(node), TreeChild::Leaf(_)) => TreeChild::Node(node),
                        (TreeChild::Leaf(_), TreeChild::Node(node)) => TreeChild::Node(node),
                        (TreeChild::Leaf(_), TreeChild::Leaf(leaf)) => TreeChild::Leaf(leaf),
                    };
                    self.children.insert(segment, merged);
                }
            }
        }
    }
}

fn join_segments(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/")
}

fn strip_root_marker(path: &str) -> &str {
    if path == ROOT_MARKER {
        return "";
    }
    path.strip_prefix(ROOT_MARKER)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(path)
}

/// Build a single-branch tree from one path
///
/// Returns `None` for a path with fewer than two segments, since a bare
/// segment has no sub-tree. `prefix` is the accumulated path of the parent
/// level and is prepended to the node's own path.
pub fn path_to_tree(input: &str, prefix: Option<&str>) -> Option<TreeNode> {
    let segments: Vec<&str> = input
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();
    let (current, rest) = segments.split_first()?;
    if rest.is_empty() {
        return None;
    }

    let joined = join_segments(&[prefix.unwrap_or(""), *current]);
    let current_path = strip_root_marker(&joined).to_string();

    let child = if rest.len() == 1 {
        TreeChild::Leaf(join_segments(&[current_path.as_str(), rest[0]]))
    } else {
        TreeChild::Node(path_to_tree(&rest.join("/"), Some(current_path.as_str()))?)
    };

    let mut children = BTreeMap::new();
    children.insert(rest[0].to_string(), child);
    Some(TreeNode {
        path: current_path,
        children,
    })
}

/// Build the workspace tree from a list of relative paths
pub fn paths_to_tree<S: AsRef<str>>(paths: &[S]) -> TreeNode {
    paths
        .iter()
        .filter_map(|path| path_to_tree(&format!("{}/{}", ROOT_MARKER, path.as_ref()), None))
        .fold(TreeNode::root(), |mut tree, branch| {
            tree.merge(branch);
            tree
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_json(node: &TreeNode) -> serde_json::Value {
        serde_json::to_value(node).unwrap()
    }

    #[test]
    fn test_path_to_tree_two_segments() {
        let tree = path_to_tree("packages/utils", None).unwrap();
        assert_eq!(
            as_json(&tree),
            json!({"path": "packages", "children": {"utils": "packages/utils"}})
        );
    }

    #[test]
    fn test_path_to_tree_three_segments() {
        let tree = path_to_tree("packages/some/thing", None).unwrap();
        assert_eq!(
            as_json(&tree),
            json!({
                "path": "packages",
                "children": {
                    "some": {
                        "path": "packages/some",
                        "children": {"thing": "packages/some/thing"}
                    }
                }
            })
        );
    }

    #[test]
    fn test_path_to_tree_single_segment_is_none() {
        assert!(path_to_tree("awesome", None).is_none());
        assert!(path_to_tree("", None).is_none());
    }

    #[test]
    fn test_path_to_tree_with_root_marker() {
        let tree = path_to_tree("<root>/packages", None).unwrap();
        assert_eq!(
            as_json(&tree),
            json!({"path": "", "children": {"packages": "packages"}})
        );

        let tree = path_to_tree("<root>/packages/things", None).unwrap();
        assert_eq!(
            as_json(&tree),
            json!({
                "path": "",
                "children": {
                    "packages": {
                        "path": "packages",
                        "children": {"things": "packages/things"}
                    }
                }
            })
        );
    }

    #[test]
    fn test_paths_to_tree_empty() {
        let tree = paths_to_tree::<&str>(&[]);
        assert_eq!(as_json(&tree), json!({"path": "", "children": {}}));
    }

    #[test]
    fn test_paths_to_tree_single_segment() {
        let tree = paths_to_tree(&["thing"]);
        assert_eq!(
            as_json(&tree),
            json!({"path": "", "children": {"thing": "thing"}})
        );
    }

    #[test]
    fn test_paths_to_tree_shared_prefix() {
        let tree = paths_to_tree(&["x/a", "x/b"]);
        assert_eq!(
            as_json(&tree),
            json!({
                "path": "",
                "children": {
                    "x": {"path": "x", "children": {"a": "x/a", "b": "x/b"}}
                }
            })
        );
    }

    #[test]
    fn test_paths_to_tree_nested_workspaces() {
        let tree = paths_to_tree(&[
            "packages/utils",
            "packages/things",
            "packages/things/awesome",
            "packages/things/shitty",
            "packages/others",
            "test/things",
            "test/awesome",
            "thing",
        ]);
        assert_eq!(
            as_json(&tree),
            json!({
                "path": "",
                "children": {
                    "packages": {
                        "path": "packages",
                        "children": {
                            "utils": "packages/utils",
                            "things": {
                                "path": "packages/things",
                                "children": {
                                    "awesome": "packages/things/awesome",
                                    "shitty": "packages/things/shitty"
                                }
                            },
                            "others": "packages/others"
                        }
                    },
                    "test": {
                        "path": "test",
                        "children": {
                            "things": "test/things",
                            "awesome": "test/awesome"
                        }
                    },
                    "thing": "thing"
                }
            })
        );
    }

    #[test]
    fn test_node_survives_later_leaf() {
        // The nested path arrives first; the bare leaf must not replace it.
        let tree = paths_to_tree(&["packages/things/awesome", "packages/things"]);
        let packages = match &tree.children["packages"] {
            TreeChild::Node(node) => node,
            other => panic!("expected node, got {:?}", other),
        };
        assert!(matches!(packages.children["things"], TreeChild::Node(_)));
        assert_eq!(packages.children["things"].path(), "packages/things");
    }

    #[test]
    fn test_nodes_and_paths() {
        let tree = paths_to_tree(&["packages/a", "packages/b", "tools/lint/core"]);
        let node_paths: Vec<&str> = tree.nodes().iter().map(|n| n.path.as_str()).collect();
        assert_eq!(node_paths, vec!["", "packages", "tools", "tools/lint"]);

        let mut paths = tree.paths();
        paths.sort();
        assert_eq!(
            paths,
            vec![
                "packages",
                "packages/a",
                "packages/b",
                "tools",
                "tools/lint",
                "tools/lint/core"
            ]
        );
    }
}
