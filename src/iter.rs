use std::iter::FusedIterator;

use crate::arena::{Arena, Handle};
use crate::node::Node;

/// A lazy, in-order iterator over the elements of a [`Tree`][crate::Tree].
///
/// Holds the path of nodes whose element hasn't been yielded yet, so it uses `O(height)` memory.
pub struct Iter<'a, T> {
    arena: &'a Arena<Node<T>>,
    stack: Vec<Handle>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(arena: &'a Arena<Node<T>>, root: Option<Handle>) -> Self {
        let mut iter = Self {
            arena,
            stack: Vec::new(),
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut next: Option<Handle>) {
        while let Some(handle) = next {
            self.stack.push(handle);
            next = self.arena.get(handle).left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.stack.pop()?;
        let node = self.arena.get(handle);
        self.push_left_spine(node.right);
        Some(&node.element)
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}
