// Copyright 2025 the Midstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-facing property-access capability.
//!
//! The style core reads and writes named properties on opaque target items
//! through [`PropertyAccess`]. The host item/geometry system implements this
//! trait over whatever its items really are; [`PropertyTable`] is a concrete
//! in-memory implementation suitable for tests and simple hosts.
//!
//! [`PropertyTable`]: crate::PropertyTable

use thiserror::Error;

use crate::id::ItemId;
use crate::value::PropertyValue;

/// A failed property write.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PropertyError {
    /// The target item has no property with the given name.
    #[error("item {item:?} has no property named `{property}`")]
    Invalid {
        /// The target item.
        item: ItemId,
        /// The property name that failed to resolve.
        property: String,
    },
    /// The property exists but rejects writes.
    #[error("property `{property}` on item {item:?} is read-only")]
    ReadOnly {
        /// The target item.
        item: ItemId,
        /// The read-only property name.
        property: String,
    },
}

/// Generic get/set-by-name access to the properties of target items.
///
/// Implementations resolve `(item, property)` pairs to live property handles.
/// A property is *valid* when the item exposes it at all, and *writable* when
/// a style is allowed to assign it. Reads of invalid properties return `None`;
/// writes report the failure through [`PropertyError`].
pub trait PropertyAccess {
    /// Returns `true` if `item` exposes a property named `property`.
    fn is_valid(&self, item: ItemId, property: &str) -> bool;

    /// Returns `true` if `property` on `item` exists and accepts writes.
    fn is_writable(&self, item: ItemId, property: &str) -> bool;

    /// Reads the current value of `property` on `item`.
    ///
    /// Returns `None` when the item or the property does not exist.
    fn read(&self, item: ItemId, property: &str) -> Option<PropertyValue>;

    /// Writes `value` to `property` on `item`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Invalid`] when the property does not resolve
    /// and [`PropertyError::ReadOnly`] when it rejects writes.
    fn write(
        &mut self,
        item: ItemId,
        property: &str,
        value: PropertyValue,
    ) -> Result<(), PropertyError>;
}
