// Copyright 2025 the Midstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sparse per-item property storage.
//!
//! This module provides [`ItemStore`] for holding the named properties of one
//! target item, and [`PropertyTable`], a collection of stores keyed by
//! [`ItemId`] that implements [`PropertyAccess`].
//!
//! # Implementation
//!
//! Stores use a sorted vector with binary search rather than a hash map:
//!
//! - Better cache locality (contiguous memory)
//! - Lower memory overhead (no hash buckets)
//! - O(log n) lookup, which is fast for typical property counts (5-20)
//! - Inline storage for small property sets via `SmallVec`

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::access::{PropertyAccess, PropertyError};
use crate::id::ItemId;
use crate::value::PropertyValue;

/// Default inline capacity for property entries.
///
/// Most target items expose fewer than 8 styleable properties, so this avoids
/// heap allocation in the common case.
const INLINE_CAPACITY: usize = 8;

#[derive(Clone, Debug)]
struct Entry {
    name: String,
    value: PropertyValue,
    writable: bool,
}

/// The named properties of one target item.
///
/// Properties are *declared* up front with an initial value and a writability
/// flag; [`ItemStore::set`] only updates properties that already exist. This
/// mirrors a real item system, where the set of properties is fixed by the
/// item's type and styles merely assign new values.
///
/// # Example
///
/// ```rust
/// use midstory_property::{ItemStore, PropertyValue};
///
/// let mut store = ItemStore::new();
/// store.declare("width", 100.0);
/// store.declare_read_only("implicitWidth", 100.0);
///
/// assert!(store.set("width", PropertyValue::from(75.0)));
/// assert_eq!(store.get("width"), Some(&PropertyValue::Number(75.0)));
///
/// // Unknown properties are not created by `set`.
/// assert!(!store.set("depth", PropertyValue::from(1.0)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ItemStore {
    /// Sorted by property name for binary search lookup.
    entries: SmallVec<[Entry; INLINE_CAPACITY]>,
}

impl ItemStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no properties are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of declared properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    fn find(&self, name: &str) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|entry| entry.name.as_str().cmp(name))
    }

    fn declare_entry(&mut self, name: String, value: PropertyValue, writable: bool) {
        match self.find(&name) {
            Ok(idx) => {
                self.entries[idx].value = value;
                self.entries[idx].writable = writable;
            }
            Err(idx) => self.entries.insert(
                idx,
                Entry {
                    name,
                    value,
                    writable,
                },
            ),
        }
    }

    /// Declares a writable property with its initial value.
    ///
    /// Re-declaring an existing property replaces its value and flag.
    pub fn declare(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.declare_entry(name.into(), value.into(), true);
    }

    /// Declares a read-only property with its value.
    pub fn declare_read_only(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.declare_entry(name.into(), value.into(), false);
    }

    /// Returns `true` if a property named `name` is declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_ok()
    }

    /// Returns `true` if `name` is declared and writable.
    #[must_use]
    pub fn is_writable(&self, name: &str) -> bool {
        self.find(name)
            .is_ok_and(|idx| self.entries[idx].writable)
    }

    /// Gets the current value of a property, if declared.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.find(name).ok().map(|idx| &self.entries[idx].value)
    }

    /// Updates the value of an already-declared property.
    ///
    /// Returns `false` when the property is not declared. The writability
    /// flag is not enforced here; that is the access layer's contract.
    pub fn set(&mut self, name: &str, value: PropertyValue) -> bool {
        match self.find(name) {
            Ok(idx) => {
                self.entries[idx].value = value;
                true
            }
            Err(_) => false,
        }
    }

    /// Returns the declared property names in sorted order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }
}

/// An in-memory collection of [`ItemStore`]s implementing [`PropertyAccess`].
///
/// # Example
///
/// ```rust
/// use midstory_property::{ItemId, ItemStore, PropertyAccess, PropertyTable, PropertyValue};
///
/// let background = ItemId::new(1);
///
/// let mut table = PropertyTable::new();
/// let mut store = ItemStore::new();
/// store.declare("width", 100.0);
/// table.insert_item(background, store);
///
/// assert!(table.is_writable(background, "width"));
/// table
///     .write(background, "width", PropertyValue::from(75.0))
///     .unwrap();
/// assert_eq!(table.read(background, "width"), Some(PropertyValue::Number(75.0)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct PropertyTable {
    items: HashMap<ItemId, ItemStore>,
}

impl PropertyTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the table holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Inserts (or replaces) the store for an item.
    pub fn insert_item(&mut self, item: ItemId, store: ItemStore) {
        self.items.insert(item, store);
    }

    /// Removes an item, returning its store if present.
    pub fn remove_item(&mut self, item: ItemId) -> Option<ItemStore> {
        self.items.remove(&item)
    }

    /// Returns the store for an item, if present.
    #[must_use]
    pub fn item(&self, item: ItemId) -> Option<&ItemStore> {
        self.items.get(&item)
    }

    /// Returns the mutable store for an item, if present.
    #[must_use]
    pub fn item_mut(&mut self, item: ItemId) -> Option<&mut ItemStore> {
        self.items.get_mut(&item)
    }
}

impl PropertyAccess for PropertyTable {
    fn is_valid(&self, item: ItemId, property: &str) -> bool {
        self.items
            .get(&item)
            .is_some_and(|store| store.contains(property))
    }

    fn is_writable(&self, item: ItemId, property: &str) -> bool {
        self.items
            .get(&item)
            .is_some_and(|store| store.is_writable(property))
    }

    fn read(&self, item: ItemId, property: &str) -> Option<PropertyValue> {
        self.items.get(&item)?.get(property).cloned()
    }

    fn write(
        &mut self,
        item: ItemId,
        property: &str,
        value: PropertyValue,
    ) -> Result<(), PropertyError> {
        let invalid = || PropertyError::Invalid {
            item,
            property: property.to_owned(),
        };
        let store = self.items.get_mut(&item).ok_or_else(invalid)?;
        if !store.contains(property) {
            return Err(invalid());
        }
        if !store.is_writable(property) {
            return Err(PropertyError::ReadOnly {
                item,
                property: property.to_owned(),
            });
        }
        store.set(property, value);
        Ok(())
    }
}
