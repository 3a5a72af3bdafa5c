// Copyright 2025 the Midstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Midstory Property: named property access and storage for style targets.
//!
//! This crate is the foundation of the `midstory_style` state-dispatch core.
//! It defines the vocabulary the style layer speaks when it touches a host
//! UI toolkit:
//!
//! - [`PropertyValue`] — the closed set of scalar values a style may assign
//!   (booleans, numbers, strings).
//! - [`WidgetId`] / [`ItemId`] — stable, host-supplied identity keys for
//!   widgets and their visual sub-items.
//! - [`PropertyAccess`] — the get/set-by-name capability (with validity and
//!   writability flags) that the host item system implements.
//! - [`ItemStore`] / [`PropertyTable`] — a concrete sparse in-memory
//!   implementation of that capability, used by tests and simple hosts.
//!
//! # Example
//!
//! ```rust
//! use midstory_property::{ItemId, ItemStore, PropertyAccess, PropertyTable, PropertyValue};
//!
//! let background = ItemId::new(1);
//!
//! let mut store = ItemStore::new();
//! store.declare("width", 100.0);
//! store.declare("color", "#d4d4d4");
//!
//! let mut host = PropertyTable::new();
//! host.insert_item(background, store);
//!
//! host.write(background, "color", PropertyValue::from("#6994d4"))
//!     .unwrap();
//! assert_eq!(
//!     host.read(background, "color"),
//!     Some(PropertyValue::from("#6994d4"))
//! );
//! ```

mod access;
mod id;
mod store;
mod value;

pub use access::{PropertyAccess, PropertyError};
pub use id::{ItemId, WidgetId};
pub use store::{ItemStore, PropertyTable};
pub use value::PropertyValue;
