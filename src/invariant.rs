//! Whole-tree structural checks. A well-formed tree never fails these; a failure means
//! `insert` or `delete` has a bug.

use thiserror::Error;

use crate::arena::Handle;
use crate::Tree;

/// A way in which a [`Tree`] is structurally broken. Slots are identified by their index in
/// the tree's node storage.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum InvariantViolation {
    /// The root node links to a parent.
    #[error("the root (slot {root}) has a parent link")]
    RootHasParent {
        /// The root's slot.
        root: usize,
    },
    /// A node is a child of one node but links back to another (or to nothing).
    #[error("slot {node} is a child of slot {expected} but its parent link is {found:?}")]
    ParentMismatch {
        /// The child's slot.
        node: usize,
        /// The slot that links to it as a child.
        expected: usize,
        /// The slot its parent link actually names.
        found: Option<usize>,
    },
    /// A node's element is not strictly between the bounds set by its ancestors.
    #[error("slot {node} is out of order with one of its ancestors")]
    OutOfOrder {
        /// The misplaced slot.
        node: usize,
    },
    /// Some stored nodes aren't reachable from the root.
    #[error("{live} nodes are stored but only {reachable} are reachable from the root")]
    Unreachable {
        /// Number of stored nodes.
        live: usize,
        /// Number of nodes reachable from the root.
        reachable: usize,
    },
}

impl<T> Tree<T>
where
    T: Ord,
{
    /// Checks BST ordering, that every child links back to its parent, that the root has no
    /// parent, and that every stored node is reachable from the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let mut tree: Tree<_> = (0..32).rev().collect();
    /// for x in (0..32).step_by(3) {
    ///     tree.delete(&x);
    /// }
    ///
    /// assert_eq!(tree.verify(), Ok(()));
    /// ```
    pub fn verify(&self) -> Result<(), InvariantViolation> {
        let live = self.arena.len();
        let Some(root) = self.root else {
            return match live {
                0 => Ok(()),
                live => Err(InvariantViolation::Unreachable { live, reachable: 0 }),
            };
        };

        if self.arena.get(root).parent.is_some() {
            return Err(InvariantViolation::RootHasParent {
                root: root.to_index(),
            });
        }

        // Each entry is a node and the exclusive bounds its element must sit between. Bounds
        // narrow strictly on the way down, so a link cycle fails the order check rather than
        // looping forever.
        let mut stack: Vec<(Handle, Option<&T>, Option<&T>)> = vec![(root, None, None)];
        let mut reachable = 0;
        while let Some((handle, lower, upper)) = stack.pop() {
            reachable += 1;

            let node = self.arena.get(handle);
            let above_lower = lower.map_or(true, |lower| *lower < node.element);
            let below_upper = upper.map_or(true, |upper| node.element < *upper);
            if !(above_lower && below_upper) {
                return Err(InvariantViolation::OutOfOrder {
                    node: handle.to_index(),
                });
            }

            for (child, lower, upper) in [
                (node.left, lower, Some(&node.element)),
                (node.right, Some(&node.element), upper),
            ] {
                let Some(child) = child else {
                    continue;
                };
                let found = self.arena.get(child).parent;
                if found != Some(handle) {
                    return Err(InvariantViolation::ParentMismatch {
                        node: child.to_index(),
                        expected: handle.to_index(),
                        found: found.map(Handle::to_index),
                    });
                }
                stack.push((child, lower, upper));
            }
        }

        if reachable == live {
            Ok(())
        } else {
            Err(InvariantViolation::Unreachable { live, reachable })
        }
    }
}
