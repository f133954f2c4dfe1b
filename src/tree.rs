//! The tree itself. Every node keeps a link to its parent so deletion can re-point the
//! parent's child slot directly instead of threading "what happened below me" back up a
//! recursive call stack.
//!
//! # Examples
//!
//! ```
//! use parent_bst::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.search(&1).is_none());
//! assert!(tree.is_empty());
//!
//! assert!(tree.insert(4));
//! assert!(tree.insert(2));
//! assert!(tree.insert(5));
//!
//! // Inserting an element that's already there does nothing.
//! assert!(!tree.insert(4));
//! assert_eq!(tree.count(), 3);
//!
//! let root = tree.root().unwrap();
//! assert_eq!(*root.left().unwrap().element(), 2);
//! assert_eq!(root.right().unwrap().parent(), Some(root));
//!
//! // Deleting an element hands it back.
//! assert_eq!(tree.delete(&4), Some(4));
//! assert_eq!(tree.delete(&4), None);
//!
//! let mut seen = Vec::new();
//! tree.traverse(|element| seen.push(*element));
//! assert_eq!(seen, [2, 5]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;

use crate::arena::{Arena, Handle};
use crate::iter::Iter;
use crate::node::{ChildState, Node, NodeRef};

/// Which child slot of a parent a node hangs off of.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Side {
    Left,
    Right,
}

/// Result of walking down the tree looking for an element.
enum Descent {
    /// The tree has no root.
    Empty,
    /// The element lives in this node.
    Found(Handle),
    /// The element isn't in the tree. It would be inserted as `parent`'s `side` child.
    Vacant { parent: Handle, side: Side },
}

/// An unbalanced Binary Search Tree of distinct elements. Each node links to its children and
/// back to its parent.
///
/// Nodes are stored in an arena owned by the tree. Links are slot handles so the parent link
/// doesn't own anything, and dropping the tree releases every node at once.
#[derive(Clone)]
pub struct Tree<T> {
    pub(crate) arena: Arena<Node<T>>,
    pub(crate) root: Option<Handle>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub const fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Generates a `Tree` holding just `element`.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let tree = Tree::with_root(4);
    /// let root = tree.root().unwrap();
    ///
    /// assert_eq!(*root.element(), 4);
    /// assert!(root.parent().is_none());
    /// assert!(root.is_leaf());
    /// ```
    pub fn with_root(element: T) -> Self {
        let mut tree = Self::new();
        tree.root = Some(tree.arena.alloc(Node::new(element, None)));
        tree
    }

    /// Generates a new, empty `Tree` with room for `capacity` nodes before it reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// How many nodes the tree can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root node, or `None` for an empty tree.
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.map(|root| NodeRef::new(&self.arena, root))
    }

    /// Counts the nodes in the tree by walking all of them. This is `O(n)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.count(), 0);
    ///
    /// tree.insert(3);
    /// tree.insert(2);
    /// tree.insert(5);
    /// tree.insert(2);
    /// assert_eq!(tree.count(), 3);
    /// ```
    pub fn count(&self) -> usize {
        let mut count = 0;
        self.traverse(|_| count += 1);
        count
    }

    /// Calls `visit` on every element in ascending order. The whole tree is walked before
    /// this returns.
    pub fn traverse<F>(&self, mut visit: F)
    where
        F: FnMut(&T),
    {
        for element in self.iter() {
            visit(element);
        }
    }

    /// An iterator over the elements in ascending order. Unlike [`Tree::traverse`] this is
    /// lazy and only walks as far as it's asked to.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let tree: Tree<_> = vec![8, 3, 10, 1, 6].into_iter().collect();
    ///
    /// let first_three: Vec<_> = tree.iter().take(3).copied().collect();
    /// assert_eq!(first_three, [1, 3, 6]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.arena, self.root)
    }

    /// The smallest element in the tree.
    pub fn min(&self) -> Option<&T> {
        self.root.map(|root| &self.arena.get(self.leftmost(root)).element)
    }

    /// The largest element in the tree.
    pub fn max(&self) -> Option<&T> {
        self.root.map(|root| &self.arena.get(self.rightmost(root)).element)
    }

    /// Removes every node.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Follows `left` links from `handle` until there are none. This is the minimum of the
    /// subtree rooted at `handle`.
    fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.arena.get(handle).left {
            handle = left;
        }
        handle
    }

    fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.arena.get(handle).right {
            handle = right;
        }
        handle
    }
}

impl<T> Tree<T>
where
    T: Ord,
{
    /// Walks down from the root comparing `element` against each node.
    fn descend(&self, element: &T) -> Descent {
        let Some(mut current) = self.root else {
            return Descent::Empty;
        };

        loop {
            let node = self.arena.get(current);
            let (next, side) = match element.cmp(&node.element) {
                Ordering::Less => (node.left, Side::Left),
                Ordering::Equal => return Descent::Found(current),
                Ordering::Greater => (node.right, Side::Right),
            };
            match next {
                Some(child) => current = child,
                None => {
                    return Descent::Vacant {
                        parent: current,
                        side,
                    }
                }
            }
        }
    }

    /// Inserts `element` into the tree. Returns `false`, and leaves the tree alone, if the
    /// element is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(tree.search(&1).is_some());
    ///
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.count(), 1);
    /// ```
    pub fn insert(&mut self, element: T) -> bool {
        match self.descend(&element) {
            Descent::Found(existing) => {
                log::trace!("insert: element already stored at {:?}", existing);
                return false;
            }
            Descent::Empty => {
                let root = self.arena.alloc(Node::new(element, None));
                log::trace!("insert: new root at {:?}", root);
                self.root = Some(root);
            }
            Descent::Vacant { parent, side } => {
                let child = self.arena.alloc(Node::new(element, Some(parent)));
                log::trace!("insert: new {:?} child {:?} of {:?}", side, child, parent);
                let parent_node = self.arena.get_mut(parent);
                match side {
                    Side::Left => parent_node.left = Some(child),
                    Side::Right => parent_node.right = Some(child),
                }

                if cfg!(debug_assertions) {
                    let parent_node = self.arena.get(parent);
                    if let Some(left) = parent_node.left {
                        assert!(parent_node.element > self.arena.get(left).element);
                    }
                    if let Some(right) = parent_node.right {
                        assert!(parent_node.element < self.arena.get(right).element);
                    }
                }
            }
        }

        self.check_invariants();
        true
    }

    /// Finds the node holding `element`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(4);
    /// tree.insert(8);
    ///
    /// let eight = tree.search(&8).unwrap();
    /// assert_eq!(*eight.element(), 8);
    /// assert_eq!(*eight.parent().unwrap().element(), 4);
    ///
    /// assert!(tree.search(&12).is_none());
    /// ```
    pub fn search(&self, element: &T) -> Option<NodeRef<'_, T>> {
        match self.descend(element) {
            Descent::Found(handle) => Some(NodeRef::new(&self.arena, handle)),
            Descent::Empty | Descent::Vacant { .. } => None,
        }
    }

    /// Whether `element` is in the tree.
    pub fn contains(&self, element: &T) -> bool {
        matches!(self.descend(element), Descent::Found(_))
    }

    /// Deletes `element` from the tree and returns it. If the tree doesn't contain the
    /// element, nothing happens and `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let mut tree: Tree<_> = vec![4, 10, 8, 12, 11, 13].into_iter().collect();
    ///
    /// // 10 has two children so its in-order successor (11) takes its place.
    /// assert_eq!(tree.delete(&10), Some(10));
    ///
    /// let eleven = tree.root().unwrap().right().unwrap();
    /// assert_eq!(*eleven.element(), 11);
    /// assert_eq!(*eleven.left().unwrap().element(), 8);
    /// assert_eq!(*eleven.right().unwrap().element(), 12);
    ///
    /// // Deleting something that isn't there is fine.
    /// assert_eq!(tree.delete(&10), None);
    /// assert_eq!(tree.count(), 5);
    /// ```
    pub fn delete(&mut self, element: &T) -> Option<T> {
        let target = match self.descend(element) {
            Descent::Found(target) => target,
            Descent::Empty | Descent::Vacant { .. } => {
                log::trace!("delete: element not found, nothing to do");
                return None;
            }
        };

        let deleted = self.delete_node(target);
        self.check_invariants();
        Some(deleted)
    }

    /// Removes the node at `target` from the tree and returns the element it held.
    fn delete_node(&mut self, target: Handle) -> T {
        match self.arena.get(target).child_state() {
            ChildState::NoChildren => {
                log::debug!("delete: {:?} is a leaf, detaching it", target);
                self.replace_in_parent(target, None);
                self.arena.take(target).element
            }
            ChildState::OneChild(child) => {
                log::debug!("delete: splicing {:?} out in favor of {:?}", target, child);
                self.replace_in_parent(target, Some(child));
                self.arena.take(target).element
            }
            ChildState::TwoChildren { right, .. } => {
                let successor = self.leftmost(right);
                log::debug!(
                    "delete: {:?} has two children, moving successor {:?} into it",
                    target,
                    successor
                );
                // The successor is a minimum so it can't have a left child.
                debug_assert!(self.arena.get(successor).left.is_none());

                // Unlink the successor first. `target` keeps its old element until then, so
                // nothing below it is ever out of order.
                let successor_element = self.delete_node(successor);
                std::mem::replace(&mut self.arena.get_mut(target).element, successor_element)
            }
        }
    }

    /// Points whichever link referenced `node` (its parent's child slot, or the root) at
    /// `replacement` instead, and points `replacement` back at `node`'s parent.
    ///
    /// ## Panics
    ///
    /// When `node`'s parent doesn't have `node` as a child.
    fn replace_in_parent(&mut self, node: Handle, replacement: Option<Handle>) {
        let parent = self.arena.get(node).parent;
        if let Some(replacement) = replacement {
            self.arena.get_mut(replacement).parent = parent;
        }

        let Some(parent) = parent else {
            self.root = replacement;
            return;
        };

        let parent_node = self.arena.get_mut(parent);
        if parent_node.left == Some(node) {
            parent_node.left = replacement;
        } else if parent_node.right == Some(node) {
            parent_node.right = replacement;
        } else {
            panic!(
                "`Tree::delete()` - {:?} isn't a child of its parent {:?}",
                node, parent
            );
        }
    }

    /// In tests, after every mutation, check the whole tree is still well formed.
    fn check_invariants(&self) {
        if cfg!(test) {
            if let Err(violation) = self.verify() {
                panic!("tree invariant broken: {}", violation);
            }
        }
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree").field("root", &self.root()).finish()
    }
}

/// Writes the tree as an outline: one element per line, children indented under their parent
/// and tagged `L:` or `R:`.
///
/// ```
/// use parent_bst::Tree;
///
/// let tree: Tree<_> = vec![4, 2, 5, 6].into_iter().collect();
///
/// assert_eq!(tree.to_string(), "4\n  L: 2\n  R: 5\n    R: 6\n");
/// ```
impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root else {
            return Ok(());
        };

        let mut stack = vec![(root, 0, None)];
        while let Some((handle, depth, side)) = stack.pop() {
            let node = self.arena.get(handle);
            let tag = match side {
                None => "",
                Some(Side::Left) => "L: ",
                Some(Side::Right) => "R: ",
            };
            writeln!(f, "{:indent$}{}{}", "", tag, node.element, indent = depth * 2)?;
            // Pushed right first so the left subtree is written first.
            if let Some(right) = node.right {
                stack.push((right, depth + 1, Some(Side::Right)));
            }
            if let Some(left) = node.left {
                stack.push((left, depth + 1, Some(Side::Left)));
            }
        }
        Ok(())
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a `BTreeSet`. This way we can ensure that
    /// after a random smattering of inserts and deletes they hold the same elements.
    fn do_ops<T>(ops: &[Op<T>], bst: &mut Tree<T>, set: &mut BTreeSet<T>)
    where
        T: Ord + Clone + std::fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Insert(element) => {
                    assert_eq!(bst.insert(element.clone()), set.insert(element.clone()));
                }
                Op::Delete(element) => {
                    assert_eq!(bst.delete(element), set.take(element));
                }
                Op::Search(element) => {
                    assert_eq!(
                        bst.search(element).map(|n| n.element()),
                        set.get(element)
                    );
                }
                Op::Traverse => {
                    assert!(bst.iter().eq(set.iter()));
                }
            }
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set);
            tree.count() == set.len()
                && tree.arena.len() == set.len()
                && set.iter().all(|element| tree.contains(element))
        }
    }

    quickcheck::quickcheck! {
        fn traverse_is_sorted_and_deduplicated(xs: Vec<i8>) -> bool {
            let tree: Tree<_> = xs.iter().copied().collect();

            let mut expected = xs;
            expected.sort_unstable();
            expected.dedup();

            let mut seen = Vec::new();
            tree.traverse(|x| seen.push(*x));
            seen == expected
        }
    }

    quickcheck::quickcheck! {
        fn delete_keeps_remaining_order(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
            let mut tree: Tree<_> = xs.iter().copied().collect();
            let mut set: BTreeSet<_> = xs.into_iter().collect();
            for delete in &deletes {
                tree.delete(delete);
                set.remove(delete);
            }

            tree.verify().is_ok() && tree.iter().eq(set.iter())
        }
    }
}
