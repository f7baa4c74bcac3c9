//! Position-to-node resolution.
//!
//! Maps a byte position to the innermost enclosing node and its full
//! ancestor chain. Parent back-links make the chain O(depth); descending
//! from the root finds the innermost node without re-walking the tree.

use crate::base::TextSize;
use crate::syntax::{NodeId, SyntaxTree};

/// The ancestor path at `offset`, innermost first.
///
/// Empty when the position lies outside every node (e.g. past
/// end-of-file). Callers treat an empty path as "no information", not an
/// error. A position exactly on a node boundary resolves to the most
/// specific node touching it.
pub fn node_path_at(tree: &SyntaxTree, offset: TextSize) -> Vec<NodeId> {
    let root = tree.root();
    let root_range = tree.range(root);
    if offset < root_range.start() || offset > root_range.end() {
        return Vec::new();
    }

    let mut current = root;
    loop {
        let mut strict: Option<NodeId> = None;
        let mut boundary: Option<NodeId> = None;
        tree.node(current).for_each_child(|child| {
            let range = tree.range(child);
            if range.start() <= offset && offset < range.end() {
                if strict.is_none() {
                    strict = Some(child);
                }
            } else if (offset == range.start() || offset == range.end()) && boundary.is_none() {
                boundary = Some(child);
            }
        });
        match strict.or(boundary) {
            Some(child) => current = child,
            None => break,
        }
    }

    tree.ancestors(current).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{span, LitKind, TreeBuilder};

    fn sample() -> (SyntaxTree, NodeId, NodeId, NodeId) {
        // echo 42  (file covers 0..8)
        let mut b = TreeBuilder::new();
        let callee = b.ident("echo", span(0, 4));
        let arg = b.basic_lit(LitKind::Int, "42", span(5, 7));
        let call = b.call(callee, vec![arg], span(0, 7));
        let stmt = b.expr_stmt(call, span(0, 7));
        let tree = b.finish(vec![stmt], span(0, 8));
        (tree, callee, arg, call)
    }

    #[test]
    fn test_innermost_node_first() {
        let (tree, _, arg, call) = sample();
        let path = node_path_at(&tree, TextSize::from(6));
        assert_eq!(path[0], arg);
        assert!(path.contains(&call));
        assert_eq!(*path.last().unwrap(), tree.root());
    }

    #[test]
    fn test_boundary_resolves_to_most_specific() {
        let (tree, callee, _, _) = sample();
        // Offset 4 is the exclusive end of `echo` and inside no other leaf.
        let path = node_path_at(&tree, TextSize::from(4));
        assert_eq!(path[0], callee);
    }

    #[test]
    fn test_past_end_of_file_is_empty() {
        let (tree, _, _, _) = sample();
        assert!(node_path_at(&tree, TextSize::from(99)).is_empty());
    }
}
