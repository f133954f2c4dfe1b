//! Slot storage for tree nodes. Children and parents refer to each other by [`Handle`] rather
//! than by pointer, so the parent back-reference never owns anything and relinking is just
//! copying indices around.

use std::num::NonZeroU32;

/// An index into an [`Arena`]. Stored off by one so `Option<Handle>` is the same size as a
/// `Handle`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Handle(NonZeroU32);

impl Handle {
    pub(crate) const MAX: usize = (u32::MAX - 1) as usize;

    fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        // `index + 1` can't be zero and can't overflow given the assert above.
        match NonZeroU32::new((index + 1) as u32) {
            Some(raw) => Self(raw),
            None => unreachable!("`index + 1` is never zero"),
        }
    }

    pub(crate) fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Number of occupied slots.
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn alloc(&mut self, value: T) -> Handle {
        if let Some(handle) = self.free.pop() {
            self.slots[handle.to_index()] = Some(value);
            return handle;
        }

        assert!(
            self.slots.len() <= Handle::MAX,
            "`Arena::alloc()` - arena is at maximum capacity ({})",
            Handle::MAX
        );
        self.slots.push(Some(value));
        Handle::from_index(self.slots.len() - 1)
    }

    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()]
            .as_ref()
            .expect("`Arena::get()` - `handle` is freed!")
    }

    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()]
            .as_mut()
            .expect("`Arena::get_mut()` - `handle` is freed!")
    }

    /// Removes the value in `handle`'s slot and makes the slot available to `alloc` again.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let value = self.slots[handle.to_index()]
            .take()
            .expect("`Arena::take()` - `handle` is freed!");
        self.free.push(handle);
        value
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
