// Copyright 2025 the Midstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable identity keys for widgets and their visual sub-items.
//!
//! The style core never dereferences a widget or an item itself; it only
//! records which widget maps to which target item and asks the host to read
//! or write properties by key. Hosts allocate these keys however they like
//! (slotmap indices, tree node ids, pointers cast to integers) as long as a
//! key stays stable for the lifetime of the object it names.

/// Identity of a widget instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Creates a widget id from a host-supplied key.
    #[must_use]
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw key.
    #[must_use]
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Identity of a visual sub-item (background, content, decoration) owned by a
/// widget.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u64);

impl ItemId {
    /// Creates an item id from a host-supplied key.
    #[must_use]
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw key.
    #[must_use]
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}
