use std::fmt;

use crate::arena::{Arena, Handle};

/// How many children a node currently has. This is always computed from a node's `left` and
/// `right` links and never stored alongside them.
///
/// Internally `N` is a slot handle. Publicly [`NodeRef::child_state`] hands out a
/// `ChildState<NodeRef>` so the children can be inspected directly.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChildState<N> {
    /// A leaf.
    NoChildren,
    /// Exactly one of `left` or `right` is present.
    OneChild(N),
    /// Both children are present.
    TwoChildren {
        /// The left child.
        left: N,
        /// The right child.
        right: N,
    },
}

/// A stored element and its links. `parent` is a back-reference only: the node is owned by the
/// arena slot, and reachable from the root through `left`/`right`.
#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) element: T,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
    pub(crate) parent: Option<Handle>,
}

impl<T> Node<T> {
    pub(crate) fn new(element: T, parent: Option<Handle>) -> Self {
        Self {
            element,
            left: None,
            right: None,
            parent,
        }
    }

    pub(crate) fn child_state(&self) -> ChildState<Handle> {
        match (self.left, self.right) {
            (None, None) => ChildState::NoChildren,
            (Some(child), None) | (None, Some(child)) => ChildState::OneChild(child),
            (Some(left), Some(right)) => ChildState::TwoChildren { left, right },
        }
    }
}

/// A read-only view of one node in a [`Tree`][crate::Tree], as returned by
/// [`Tree::search`][crate::Tree::search] and [`Tree::root`][crate::Tree::root].
///
/// The view borrows the tree so the tree can't change underneath it.
pub struct NodeRef<'a, T> {
    arena: &'a Arena<Node<T>>,
    handle: Handle,
}

impl<'a, T> Clone for NodeRef<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, T> Copy for NodeRef<'a, T> {}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(arena: &'a Arena<Node<T>>, handle: Handle) -> Self {
        Self { arena, handle }
    }

    fn node(&self) -> &'a Node<T> {
        self.arena.get(self.handle)
    }

    fn related(&self, handle: Option<Handle>) -> Option<Self> {
        handle.map(|handle| Self::new(self.arena, handle))
    }

    /// The element stored in this node.
    pub fn element(&self) -> &'a T {
        &self.node().element
    }

    /// The root of this node's left subtree, if any.
    pub fn left(&self) -> Option<Self> {
        self.related(self.node().left)
    }

    /// The root of this node's right subtree, if any.
    pub fn right(&self) -> Option<Self> {
        self.related(self.node().right)
    }

    /// The node this node hangs off of. `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.related(self.node().parent)
    }

    /// Classifies this node by its current children.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::{ChildState, Tree};
    ///
    /// let tree: Tree<_> = vec![4, 2, 5, 6].into_iter().collect();
    ///
    /// let root = tree.root().unwrap();
    /// assert!(matches!(root.child_state(), ChildState::TwoChildren { .. }));
    ///
    /// match tree.search(&5).unwrap().child_state() {
    ///     ChildState::OneChild(child) => assert_eq!(*child.element(), 6),
    ///     _ => unreachable!(),
    /// }
    /// ```
    pub fn child_state(&self) -> ChildState<Self> {
        match self.node().child_state() {
            ChildState::NoChildren => ChildState::NoChildren,
            ChildState::OneChild(child) => ChildState::OneChild(Self::new(self.arena, child)),
            ChildState::TwoChildren { left, right } => ChildState::TwoChildren {
                left: Self::new(self.arena, left),
                right: Self::new(self.arena, right),
            },
        }
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        matches!(self.node().child_state(), ChildState::NoChildren)
    }
}

/// Two `NodeRef`s are equal when they point at the same node of the same tree.
impl<'a, T> PartialEq for NodeRef<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.arena, other.arena) && self.handle == other.handle
    }
}
impl<'a, T> Eq for NodeRef<'a, T> {}

/// Writes the same nesting `#[derive(Debug)]` would, as `Node { element, left, right }` with
/// `Option`-wrapped children, but keeps pending work on a heap stack so chains of any depth
/// can be printed. `{:#?}` pretty printing isn't supported; elements still honor the flags.
impl<'a, T> fmt::Debug for NodeRef<'a, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Step<'a, T> {
            Node(NodeRef<'a, T>),
            Child(Option<NodeRef<'a, T>>),
            Text(&'static str),
        }

        let mut stack = vec![Step::Node(*self)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Node(node) => {
                    f.write_str("Node { element: ")?;
                    fmt::Debug::fmt(node.element(), f)?;
                    f.write_str(", left: ")?;
                    // Pushed in reverse so they come off in writing order.
                    stack.push(Step::Text(" }"));
                    stack.push(Step::Child(node.right()));
                    stack.push(Step::Text(", right: "));
                    stack.push(Step::Child(node.left()));
                }
                Step::Child(None) => f.write_str("None")?,
                Step::Child(Some(child)) => {
                    f.write_str("Some(")?;
                    stack.push(Step::Text(")"));
                    stack.push(Step::Node(child));
                }
                Step::Text(text) => f.write_str(text)?,
            }
        }
        Ok(())
    }
}
