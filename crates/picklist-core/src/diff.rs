//! Change detection between renders.
//!
//! Two tools live here:
//!
//! - [`ReferenceMemo`]: recompute derived data only when an input `Arc`
//!   changes identity. Skipping recomputation is an optimization; deriving on
//!   every render is always correct.
//! - [`TreeDiffer`]: compare two rendered [`Node`] trees and list the
//!   operations that turn the old tree into the new one. Children are matched
//!   by key first and by position second.

use crate::node::{Node, NodeKind};
use std::collections::HashMap;
use std::sync::Arc;

/// Whether `new` points at a different allocation than `old`.
#[must_use]
pub fn reference_changed<T: ?Sized>(old: Option<&Arc<T>>, new: &Arc<T>) -> bool {
    old.map_or(true, |old| !Arc::ptr_eq(old, new))
}

/// Derived value cached against the identity of its input.
#[derive(Debug)]
pub struct ReferenceMemo<T: ?Sized, D> {
    input: Option<Arc<T>>,
    derived: Option<D>,
    recomputations: usize,
}

impl<T: ?Sized, D> Default for ReferenceMemo<T, D> {
    fn default() -> Self {
        Self {
            input: None,
            derived: None,
            recomputations: 0,
        }
    }
}

impl<T: ?Sized, D> ReferenceMemo<T, D> {
    /// Create an empty memo.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the derived value for `input`, recomputing it if the reference
    /// changed since the last call.
    pub fn get_or_compute(&mut self, input: &Arc<T>, compute: impl FnOnce(&T) -> D) -> &D {
        let changed = reference_changed(self.input.as_ref(), input);
        if changed {
            self.input = Some(Arc::clone(input));
            self.derived = None;
        }
        if self.derived.is_none() {
            self.recomputations += 1;
        }
        self.derived.get_or_insert_with(|| compute(input))
    }

    /// How many times the derived value was computed.
    #[must_use]
    pub const fn recomputations(&self) -> usize {
        self.recomputations
    }
}

/// Operation to apply during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOp {
    /// Insert a new node
    Insert {
        /// Path to parent (indices from root)
        path: Vec<usize>,
        /// Index to insert at
        index: usize,
    },
    /// Remove node at path
    Remove {
        /// Path to node to remove
        path: Vec<usize>,
    },
    /// Attributes, classes, listeners or text changed
    Update {
        /// Path to node to update
        path: Vec<usize>,
    },
    /// Keyed node moved to a different index
    Move {
        /// Old path
        from_path: Vec<usize>,
        /// New path
        to_path: Vec<usize>,
    },
    /// Node kind changed; replace the subtree
    Replace {
        /// Path to node to replace
        path: Vec<usize>,
    },
}

/// Result of diffing two trees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// List of operations to apply
    pub operations: Vec<DiffOp>,
}

impl DiffResult {
    /// Check if there are no changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    fn push(&mut self, op: DiffOp) {
        self.operations.push(op);
    }
}

/// Node tree differ.
#[derive(Debug, Default)]
pub struct TreeDiffer {
    current_path: Vec<usize>,
}

impl TreeDiffer {
    /// Create a new tree differ.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the diff between two trees.
    #[must_use]
    pub fn diff<M: PartialEq>(&mut self, old: &Node<M>, new: &Node<M>) -> DiffResult {
        let mut result = DiffResult::default();
        self.current_path.clear();
        self.diff_node(old, new, &mut result);
        result
    }

    fn diff_node<M: PartialEq>(&mut self, old: &Node<M>, new: &Node<M>, result: &mut DiffResult) {
        if !same_kind(&old.kind, &new.kind) {
            result.push(DiffOp::Replace {
                path: self.current_path.clone(),
            });
            return;
        }

        if old.kind != new.kind
            || old.attrs != new.attrs
            || old.classes != new.classes
            || old.listeners != new.listeners
        {
            result.push(DiffOp::Update {
                path: self.current_path.clone(),
            });
        }

        self.diff_children(&old.children, &new.children, result);
    }

    fn diff_children<M: PartialEq>(
        &mut self,
        old_children: &[Node<M>],
        new_children: &[Node<M>],
        result: &mut DiffResult,
    ) {
        let old_keyed: HashMap<&str, usize> = old_children
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.key.as_deref().map(|k| (k, i)))
            .collect();

        let mut old_matched = vec![false; old_children.len()];
        let mut new_matched = vec![false; new_children.len()];

        // Phase 1: match by key
        for (new_idx, new_child) in new_children.iter().enumerate() {
            let Some(key) = new_child.key.as_deref() else {
                continue;
            };
            if let Some(&old_idx) = old_keyed.get(key) {
                old_matched[old_idx] = true;
                new_matched[new_idx] = true;

                if old_idx != new_idx {
                    let mut from_path = self.current_path.clone();
                    from_path.push(old_idx);
                    let mut to_path = self.current_path.clone();
                    to_path.push(new_idx);
                    result.push(DiffOp::Move { from_path, to_path });
                }

                self.current_path.push(new_idx);
                self.diff_node(&old_children[old_idx], new_child, result);
                self.current_path.pop();
            }
        }

        // Phase 2: match unkeyed children by position
        for (new_idx, new_child) in new_children.iter().enumerate() {
            if new_matched[new_idx] || new_child.key.is_some() {
                continue;
            }
            let candidate = old_children
                .get(new_idx)
                .filter(|old| !old_matched[new_idx] && old.key.is_none());
            if let Some(old_child) = candidate {
                old_matched[new_idx] = true;
                new_matched[new_idx] = true;
                self.current_path.push(new_idx);
                self.diff_node(old_child, new_child, result);
                self.current_path.pop();
            }
        }

        // Phase 3: removals, in reverse so indices stay valid
        for old_idx in (0..old_children.len()).rev() {
            if !old_matched[old_idx] {
                let mut path = self.current_path.clone();
                path.push(old_idx);
                result.push(DiffOp::Remove { path });
            }
        }

        // Phase 4: insertions
        for (new_idx, matched) in new_matched.iter().enumerate() {
            if !matched {
                result.push(DiffOp::Insert {
                    path: self.current_path.clone(),
                    index: new_idx,
                });
            }
        }
    }
}

fn same_kind(a: &NodeKind, b: &NodeKind) -> bool {
    match (a, b) {
        (NodeKind::Element(x), NodeKind::Element(y))
        | (NodeKind::Component(x), NodeKind::Component(y)) => x == y,
        (NodeKind::Text(_), NodeKind::Text(_)) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(label: &str, open: bool) -> Node<()> {
        Node::element("div")
            .key("root")
            .child(
                Node::element("button")
                    .key("trigger")
                    .attr("aria-expanded", if open { "true" } else { "false" })
                    .child(Node::text(label)),
            )
            .child(Node::element("div").key("dropdown"))
    }

    // =========================================================================
    // Reference Tests
    // =========================================================================

    #[test]
    fn test_reference_changed() {
        let a: Arc<[u8]> = Arc::from(vec![1, 2]);
        let b = Arc::clone(&a);
        let c: Arc<[u8]> = Arc::from(vec![1, 2]);
        assert!(reference_changed(None, &a));
        assert!(!reference_changed(Some(&a), &b));
        assert!(reference_changed(Some(&a), &c));
    }

    #[test]
    fn test_memo_recomputes_on_identity_change_only() {
        let mut memo: ReferenceMemo<[u8], usize> = ReferenceMemo::new();
        let a: Arc<[u8]> = Arc::from(vec![1, 2, 3]);

        assert_eq!(*memo.get_or_compute(&a, <[u8]>::len), 3);
        assert_eq!(*memo.get_or_compute(&Arc::clone(&a), <[u8]>::len), 3);
        assert_eq!(memo.recomputations(), 1);

        // Equal contents, new allocation
        let b: Arc<[u8]> = Arc::from(vec![1, 2, 3]);
        assert_eq!(*memo.get_or_compute(&b, <[u8]>::len), 3);
        assert_eq!(memo.recomputations(), 2);
    }

    // =========================================================================
    // TreeDiffer Tests
    // =========================================================================

    #[test]
    fn test_identical_trees_have_no_ops() {
        let mut d = TreeDiffer::new();
        assert!(d.diff(&tree("A", false), &tree("A", false)).is_empty());
    }

    #[test]
    fn test_attr_change_is_update() {
        let mut d = TreeDiffer::new();
        let r = d.diff(&tree("A", false), &tree("A", true));
        assert_eq!(r.operations, vec![DiffOp::Update { path: vec![0] }]);
    }

    #[test]
    fn test_text_change_is_update_of_text_node() {
        let mut d = TreeDiffer::new();
        let r = d.diff(&tree("A", false), &tree("B", false));
        assert_eq!(r.operations, vec![DiffOp::Update { path: vec![0, 0] }]);
    }

    #[test]
    fn test_kind_change_is_replace() {
        let old: Node<()> = Node::element("select");
        let new: Node<()> = Node::element("div");
        let r = TreeDiffer::new().diff(&old, &new);
        assert_eq!(r.operations, vec![DiffOp::Replace { path: vec![] }]);
    }

    #[test]
    fn test_insert_and_remove() {
        let old: Node<()> = Node::element("ul").child(Node::element("li"));
        let new: Node<()> = Node::element("ul")
            .child(Node::element("li"))
            .child(Node::element("li"));
        let r = TreeDiffer::new().diff(&old, &new);
        assert_eq!(r.operations, vec![DiffOp::Insert { path: vec![], index: 1 }]);

        let r = TreeDiffer::new().diff(&new, &old);
        assert_eq!(r.operations, vec![DiffOp::Remove { path: vec![1] }]);
    }

    #[test]
    fn test_keyed_move() {
        let old: Node<()> = Node::element("ul")
            .child(Node::element("li").key("a"))
            .child(Node::element("li").key("b"));
        let new: Node<()> = Node::element("ul")
            .child(Node::element("li").key("b"))
            .child(Node::element("li").key("a"));
        let r = TreeDiffer::new().diff(&old, &new);
        assert_eq!(r.len(), 2);
        assert!(r.operations.contains(&DiffOp::Move {
            from_path: vec![1],
            to_path: vec![0]
        }));
    }
}
