// Copyright 2025 the Midstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar property values.
//!
//! This module provides [`PropertyValue`], the closed set of value kinds a
//! style is allowed to write onto a target item. Declarative style sources
//! only bind booleans, numbers and strings, so the value type is a plain enum
//! rather than a type-erased box. This keeps equality structural, which the
//! compiled expression layer relies on.

use core::fmt;

/// A scalar value assignable to a named property on a target item.
///
/// # Example
///
/// ```rust
/// use midstory_property::PropertyValue;
///
/// let width = PropertyValue::from(75.0);
/// assert_eq!(width.as_number(), Some(75.0));
/// assert_eq!(width.as_bool(), None);
///
/// let color = PropertyValue::from("#6994d4");
/// assert_eq!(color.as_str(), Some("#6994d4"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    /// A boolean value.
    Bool(bool),
    /// A numeric value. All declarative number bindings decode to `f64`.
    Number(f64),
    /// A string value.
    String(String),
}

impl PropertyValue {
    /// Returns the contained boolean, if this is a [`PropertyValue::Bool`].
    #[must_use]
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the contained number, if this is a [`PropertyValue::Number`].
    #[must_use]
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the contained string, if this is a [`PropertyValue::String`].
    #[must_use]
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a short name for the value kind, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}
