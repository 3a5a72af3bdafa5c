// Copyright 2025 the Midstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The widget seam.
//!
//! The style core never owns widgets; it consumes them through the [`Control`]
//! trait, which exposes exactly what compilation and dispatch need: a stable
//! identity, a kind [`Signature`] for deduplication, the current
//! interaction-state name, and the style slot.

use std::fmt;
use std::rc::Rc;

use midstory_property::WidgetId;

use crate::style::Style;

/// The stable key identifying a widget *kind*.
///
/// Two widgets share a compiled style exactly when their signatures are
/// equal. By convention a signature concatenates the declarative module name
/// and the type name, e.g. `Midstory.Controls/Button`.
///
/// # Example
///
/// ```rust
/// use midstory_style::Signature;
///
/// let signature = Signature::new("Midstory.Controls", "Button");
/// assert_eq!(signature.as_str(), "Midstory.Controls/Button");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Signature(String);

impl Signature {
    /// Creates a signature from a module name and a type name.
    #[must_use]
    pub fn new(module: &str, type_name: &str) -> Self {
        Self(format!("{module}/{type_name}"))
    }

    /// Creates a signature from an already-formed key.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the signature as a string slice.
    #[must_use]
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Signature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The style core's view of a themable widget instance.
///
/// Hosts implement this for their control type. The factory drives it at
/// construction-complete; dispatch reads [`Control::style_state`] whenever the
/// widget's interaction state changes.
pub trait Control {
    /// The widget's stable identity key.
    fn id(&self) -> WidgetId;

    /// The widget's kind signature, used as the factory lookup key.
    fn signature(&self) -> Signature;

    /// The current logical interaction-state name (`"Hovered"`, `"Pressed"`,
    /// ...). The empty string means no named state is active.
    fn style_state(&self) -> &str;

    /// The style currently attached to the widget, if any.
    fn style(&self) -> Option<Rc<Style>>;

    /// Attaches a style to the widget. Called by the factory with the
    /// compiled owner style once compilation or mapping has run.
    fn set_style(&mut self, style: Rc<Style>);

    /// Hook invoked once, after the first compile of this widget's kind, so a
    /// concrete widget type can enter its default interaction state.
    ///
    /// The base behavior is a no-op: an abstract control has no default
    /// interaction state of its own.
    fn initialize_default_style_state(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_concatenates_module_and_type() {
        let signature = Signature::new("Midstory.Controls", "Button");
        assert_eq!(signature.as_str(), "Midstory.Controls/Button");
        assert_eq!(signature.to_string(), "Midstory.Controls/Button");
    }

    #[test]
    fn signature_from_raw() {
        let signature = Signature::from_raw("Midstory.Controls/Button");
        assert_eq!(signature, Signature::new("Midstory.Controls", "Button"));
    }

    #[test]
    fn signature_identifies_kind() {
        let button_a = Signature::new("Midstory.Controls", "Button");
        let button_b = Signature::new("Midstory.Controls", "Button");
        let slider = Signature::new("Midstory.Controls", "Slider");
        assert_eq!(button_a, button_b);
        assert_ne!(button_a, slider);
    }
}
