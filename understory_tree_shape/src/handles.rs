// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handle allocation: small integer handles with slot reuse.

use alloc::vec::Vec;

/// A table that issues small integer handles and recycles them on delete.
///
/// Handle `0` is reserved and never issued, so callers may use it for a permanent
/// out-of-band entry (the tree shape uses it for its implicit root).
/// Freed handles are reused in LIFO order; no other ordering is promised.
#[derive(Clone)]
pub struct HandleTable<T> {
    slots: Vec<Option<T>>, // slot 0 is reserved and stays `None`
    free_list: Vec<u32>,
    live: usize,
}

impl<T> core::fmt::Debug for HandleTable<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HandleTable")
            .field("slots", &self.slots.len())
            .field("live", &self.live)
            .field("free_list", &self.free_list.len())
            .finish()
    }
}

impl<T> Default for HandleTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HandleTable<T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty table with room for `capacity` handles before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity + 1);
        slots.push(None);
        Self {
            slots,
            free_list: Vec::new(),
            live: 0,
        }
    }

    /// Store `value` and return a fresh handle for it.
    ///
    /// # Panics
    ///
    /// Panics if the handle space (`u32::MAX - 1` live handles) is exhausted.
    pub fn add(&mut self, value: T) -> u32 {
        let handle = if let Some(handle) = self.free_list.pop() {
            self.slots[handle as usize] = Some(value);
            handle
        } else {
            let handle = u32::try_from(self.slots.len())
                .ok()
                .filter(|h| *h != u32::MAX)
                .expect("handle space exhausted");
            self.slots.push(Some(value));
            handle
        };
        self.live += 1;
        handle
    }

    /// Release `handle` for reuse, returning its value.
    ///
    /// Returns `None` if the handle is not live; the table is unchanged in that case.
    pub fn delete(&mut self, handle: u32) -> Option<T> {
        if handle == 0 {
            return None;
        }
        let value = self.slots.get_mut(handle as usize)?.take()?;
        self.free_list.push(handle);
        self.live -= 1;
        Some(value)
    }

    /// Returns true if `handle` is currently issued.
    pub fn contains(&self, handle: u32) -> bool {
        self.get(handle).is_some()
    }

    /// Borrow the value stored for `handle`.
    pub fn get(&self, handle: u32) -> Option<&T> {
        self.slots.get(handle as usize)?.as_ref()
    }

    /// Number of live handles.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns true if no handles are live.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// One past the largest handle ever issued.
    pub fn high_water(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_issues_zero() {
        let mut t = HandleTable::new();
        let a = t.add("a");
        let b = t.add("b");
        assert_ne!(a, 0);
        assert_ne!(b, 0);
        assert_ne!(a, b);
        assert_eq!(t.len(), 2);
        assert!(!t.contains(0));
        assert_eq!(t.delete(0), None, "the reserved handle cannot be deleted");
    }

    #[test]
    fn delete_then_reuse() {
        let mut t = HandleTable::new();
        let a = t.add(1);
        let _b = t.add(2);
        assert_eq!(t.delete(a), Some(1));
        assert!(!t.contains(a));
        assert_eq!(t.delete(a), None, "double delete is rejected");
        assert_eq!(t.len(), 1);

        let c = t.add(3);
        assert_eq!(c, a, "freed handle should be reused");
        assert_eq!(t.get(c), Some(&3));
        assert_eq!(t.high_water(), 3);
    }

    #[test]
    fn unknown_handles_are_absent() {
        let mut t: HandleTable<()> = HandleTable::with_capacity(4);
        assert!(t.is_empty());
        assert!(!t.contains(17));
        assert_eq!(t.delete(17), None);
        assert!(t.is_empty());
    }
}
