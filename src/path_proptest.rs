//! Property-based tests for the workspace tree and path relativization.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use std::path::PathBuf;

    use crate::path::{dot_prefixed, relative_specifier};
    use crate::tree::{path_to_tree, paths_to_tree, TreeChild, TreeNode};
    use proptest::prelude::*;

    fn segment() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_-]{0,7}"
    }

    fn location() -> impl Strategy<Value = String> {
        prop::collection::vec(segment(), 1..5).prop_map(|segments| segments.join("/"))
    }

    fn leaves(node: &TreeNode, out: &mut Vec<(String, String)>) {
        for child in node.children.values() {
            match child {
                TreeChild::Leaf(path) => out.push((node.path.clone(), path.clone())),
                TreeChild::Node(inner) => {
                    out.push((node.path.clone(), inner.path.clone()));
                    leaves(inner, out);
                }
            }
        }
    }

    fn is_proper_prefix(prefix: &str, path: &str) -> bool {
        prefix.is_empty() || path.starts_with(&format!("{}/", prefix))
    }

    // ============================================================================
    // paths_to_tree property tests
    // ============================================================================

    proptest! {
        /// Property: every input path survives as a leaf or a node path
        #[test]
        fn paths_to_tree_keeps_every_path(paths in prop::collection::vec(location(), 0..12)) {
            let tree = paths_to_tree(&paths);
            let found = tree.paths();
            for path in &paths {
                prop_assert!(found.contains(path), "{} missing from {:?}", path, found);
            }
        }

        /// Property: every node path is a proper prefix of each descendant path
        #[test]
        fn paths_to_tree_nodes_prefix_descendants(paths in prop::collection::vec(location(), 1..12)) {
            let tree = paths_to_tree(&paths);
            let mut pairs = Vec::new();
            leaves(&tree, &mut pairs);
            for (parent, child) in pairs {
                prop_assert!(
                    is_proper_prefix(&parent, &child),
                    "{:?} is not a proper prefix of {:?}",
                    parent,
                    child
                );
            }
        }

        /// Property: input order does not change the resulting tree
        #[test]
        fn paths_to_tree_is_order_independent(paths in prop::collection::vec(location(), 0..10)) {
            let mut reversed = paths.clone();
            reversed.reverse();
            prop_assert_eq!(paths_to_tree(&paths), paths_to_tree(&reversed));
        }

        /// Property: a single segment never forms a sub-tree
        #[test]
        fn path_to_tree_single_segment_is_none(name in segment()) {
            prop_assert!(path_to_tree(&name, None).is_none());
        }
    }

    // ============================================================================
    // relativization property tests
    // ============================================================================

    proptest! {
        /// Property: relative specifiers always start with a dot
        #[test]
        fn relative_specifier_starts_with_dot(from in location(), to in location()) {
            let base = PathBuf::from("/repo").join(&from);
            let target = PathBuf::from("/repo").join(&to).join("tsconfig.json");
            let relative = relative_specifier(&base, &target);
            prop_assert!(relative.starts_with('.'), "bare specifier {}", relative);
            prop_assert!(!relative.contains('\\'));
        }

        /// Property: joining the specifier back onto the base reaches the target
        #[test]
        fn relative_specifier_round_trips(from in location(), to in location()) {
            let base = PathBuf::from("/repo").join(&from);
            let target = PathBuf::from("/repo").join(&to);
            let relative = relative_specifier(&base, &target);
            let rejoined = relative
                .split('/')
                .fold(base.clone(), |acc, segment| match segment {
                    "." | "" => acc,
                    ".." => acc.parent().map(PathBuf::from).unwrap_or(acc),
                    other => acc.join(other),
                });
            prop_assert_eq!(rejoined, target);
        }

        /// Property: dot_prefixed is idempotent
        #[test]
        fn dot_prefixed_is_idempotent(path in "[a-z./]{0,12}") {
            let once = dot_prefixed(&path);
            prop_assert_eq!(dot_prefixed(&once), once.clone());
            prop_assert!(once.starts_with('.'));
        }
    }
}
