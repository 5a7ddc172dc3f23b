// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A registration list tuned for zero or one entry.

use alloc::vec::Vec;

/// An ordered list that stores zero or one item inline.
///
/// Observer lists are almost always empty or hold a single listener, so those cases never
/// allocate. Items are kept in registration order.
#[derive(Clone, Debug)]
pub enum FrugalList<T> {
    /// No items.
    Empty,
    /// Exactly one item, stored inline.
    One(T),
    /// Two or more items, in registration order.
    Many(Vec<T>),
}

impl<T> Default for FrugalList<T> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T> FrugalList<T> {
    /// Create an empty list.
    pub const fn new() -> Self {
        Self::Empty
    }

    /// Append `item` after all existing items.
    pub fn push(&mut self, item: T) {
        *self = match core::mem::take(self) {
            Self::Empty => Self::One(item),
            Self::One(first) => {
                let mut items = Vec::with_capacity(2);
                items.push(first);
                items.push(item);
                Self::Many(items)
            }
            Self::Many(mut items) => {
                items.push(item);
                Self::Many(items)
            }
        };
    }

    /// Remove the earliest item matching `pred` and return it.
    pub fn remove_first_by(&mut self, mut pred: impl FnMut(&T) -> bool) -> Option<T> {
        match core::mem::take(self) {
            Self::Empty => None,
            Self::One(item) => {
                if pred(&item) {
                    Some(item)
                } else {
                    *self = Self::One(item);
                    None
                }
            }
            Self::Many(mut items) => {
                let removed = items.iter().position(&mut pred).map(|pos| items.remove(pos));
                *self = if items.len() == 1 {
                    items.pop().map_or(Self::Empty, Self::One)
                } else {
                    Self::Many(items)
                };
                removed
            }
        }
    }

    /// Remove the earliest item equal to `item` and return it.
    pub fn remove_first(&mut self, item: &T) -> Option<T>
    where
        T: PartialEq,
    {
        self.remove_first_by(|candidate| candidate == item)
    }

    /// Iterate items in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let (one, many) = match self {
            Self::Empty => (None, &[][..]),
            Self::One(item) => (Some(item), &[][..]),
            Self::Many(items) => (None, items.as_slice()),
        };
        one.into_iter().chain(many)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::One(_) => 1,
            Self::Many(items) => items.len(),
        }
    }

    /// Returns true if the list holds no items.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
