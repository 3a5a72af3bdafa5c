// Copyright 2025 the Midstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The declarative style bundle attached to a widget.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

use crate::controller::StateController;
use crate::dispatcher::StyleDispatch;
use crate::state::StyleState;

/// The declarative bundle of visual customization for one widget instance:
/// an optional name plus the authored [`StyleState`]s.
///
/// Every style owns exactly one [`StateController`], created at construction
/// and never reassigned. After the factory has run, many widgets of the same
/// kind share one compiled style through `Rc`; the styles they were parsed
/// with are discarded.
///
/// A style holds at most one dispatcher back-reference, set once by the
/// dispatcher itself when it binds the style — never by the style.
///
/// # Example
///
/// ```rust
/// use midstory_property::ItemId;
/// use midstory_style::{Binding, PropertyChanges, Style, StyleState};
///
/// let background = ItemId::new(1);
/// let style = Style::builder()
///     .name("Button")
///     .state(StyleState::new("Hovered").with_changes(PropertyChanges::new(
///         background,
///         vec![("color".to_owned(), Binding::String("#6994d4".to_owned()))],
///     )))
///     .build();
///
/// assert_eq!(style.name(), "Button");
/// assert_eq!(style.state_count(), 1);
/// assert!(style.state_controller().upgrade().is_some());
/// ```
#[derive(Debug)]
pub struct Style {
    name: RefCell<String>,
    states: RefCell<Vec<StyleState>>,
    /// Sole owner of the controller; everyone else gets weak handles.
    controller: Rc<RefCell<StateController>>,
    dispatcher: RefCell<Option<Weak<dyn StyleDispatch>>>,
}

impl Style {
    /// Starts building a style.
    #[must_use]
    pub fn builder() -> StyleBuilder {
        StyleBuilder::default()
    }

    /// The style's name. Empty when the author did not set one.
    #[must_use]
    pub fn name(&self) -> String {
        self.name.borrow().clone()
    }

    /// Renames the style.
    pub fn set_name(&self, name: impl Into<String>) {
        *self.name.borrow_mut() = name.into();
    }

    /// The authored states.
    #[must_use]
    pub fn states(&self) -> Ref<'_, Vec<StyleState>> {
        self.states.borrow()
    }

    /// Mutable access to the states, used by the factory to drive decode.
    pub(crate) fn states_mut(&self) -> RefMut<'_, Vec<StyleState>> {
        self.states.borrow_mut()
    }

    /// The number of authored states.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.borrow().len()
    }

    /// The style's state controller.
    ///
    /// Always resolvable while the style is alive; handed out weak so
    /// observers never extend its lifetime.
    #[must_use]
    pub fn state_controller(&self) -> Weak<RefCell<StateController>> {
        Rc::downgrade(&self.controller)
    }

    /// The dispatcher attached to this style, if one is registered and still
    /// alive.
    #[must_use]
    pub fn dispatcher(&self) -> Option<Rc<dyn StyleDispatch>> {
        self.dispatcher.borrow().as_ref()?.upgrade()
    }

    /// Attaches a dispatcher back-reference. Called by the dispatcher itself
    /// when it binds this style; set once and never reassigned while the
    /// registered dispatcher is alive.
    pub(crate) fn set_dispatcher(&self, dispatcher: Weak<dyn StyleDispatch>) {
        let mut slot = self.dispatcher.borrow_mut();
        if slot.as_ref().is_some_and(|existing| existing.strong_count() > 0) {
            tracing::warn!("style already has a dispatcher; ignoring reassignment");
            return;
        }
        *slot = Some(dispatcher);
    }
}

/// Builder for [`Style`], used by the declarative runtime while parsing.
#[derive(Debug, Default)]
pub struct StyleBuilder {
    name: String,
    states: Vec<StyleState>,
}

impl StyleBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Names the style.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Appends an authored state.
    #[must_use]
    pub fn state(mut self, state: StyleState) -> Self {
        self.states.push(state);
        self
    }

    /// Builds the style, creating its [`StateController`].
    #[must_use]
    pub fn build(self) -> Rc<Style> {
        Rc::new_cyclic(|style| Style {
            name: RefCell::new(self.name),
            states: RefCell::new(self.states),
            controller: Rc::new(RefCell::new(StateController::new(style.clone()))),
            dispatcher: RefCell::new(None),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let style = Style::builder().build();
        assert_eq!(style.name(), "");
        assert_eq!(style.state_count(), 0);
    }

    #[test]
    fn builder_collects_states() {
        let style = Style::builder()
            .name("Button")
            .state(StyleState::new("Hovered"))
            .state(StyleState::new("Pressed"))
            .build();

        assert_eq!(style.name(), "Button");
        assert_eq!(style.state_count(), 2);
        assert_eq!(style.states()[0].name(), "Hovered");
    }

    #[test]
    fn controller_created_at_construction() {
        let style = Style::builder().build();
        let controller = style.state_controller().upgrade().unwrap();
        assert!(controller.borrow().is_empty());

        // The controller's back-reference resolves to this very style.
        let back = controller.borrow().style().upgrade().unwrap();
        assert!(Rc::ptr_eq(&back, &style));
    }

    #[test]
    fn rename() {
        let style = Style::builder().build();
        style.set_name("Slider");
        assert_eq!(style.name(), "Slider");
    }

    #[test]
    fn dispatcher_starts_unset() {
        let style = Style::builder().build();
        assert!(style.dispatcher().is_none());
    }
}
