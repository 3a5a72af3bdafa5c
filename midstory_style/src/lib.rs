// Copyright 2025 the Midstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Midstory Style: a style factory and state-dispatch core for widget sets.
//!
//! Every widget instance of a declarative UI carries an authored [`Style`]:
//! named [`StyleState`]s whose [`PropertyChanges`] override properties on the
//! widget's visual sub-items. Compiling that style is not free, so the
//! [`StyleFactory`] does it once per *widget kind*: the first widget of a
//! kind to finish construction has its style compiled into
//! [`StateOperation`]s (held by the style's [`StateController`]); every later
//! widget of the same kind is mapped onto the already-compiled style and its
//! own parsed style is discarded.
//!
//! At runtime a [`StyleDispatcher`] reacts to interaction-state changes: the
//! controller applies the default operation first (restoring original
//! property values) and the operation named after the widget's current state
//! second, so state-specific values always override defaults.
//!
//! The host toolkit plugs in through two seams: [`Control`] (what a widget
//! must expose) and [`midstory_property::PropertyAccess`] (how properties are
//! read and written by name).
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use midstory_property::{
//!     ItemId, ItemStore, PropertyAccess, PropertyTable, PropertyValue, WidgetId,
//! };
//! use midstory_style::{
//!     Binding, Control, PropertyChanges, Signature, Style, StyleFactory, StyleState,
//! };
//!
//! struct Button {
//!     id: WidgetId,
//!     state: String,
//!     style: Option<Rc<Style>>,
//! }
//!
//! impl Control for Button {
//!     fn id(&self) -> WidgetId {
//!         self.id
//!     }
//!     fn signature(&self) -> Signature {
//!         Signature::new("Midstory.Controls", "Button")
//!     }
//!     fn style_state(&self) -> &str {
//!         &self.state
//!     }
//!     fn style(&self) -> Option<Rc<Style>> {
//!         self.style.clone()
//!     }
//!     fn set_style(&mut self, style: Rc<Style>) {
//!         self.style = Some(style);
//!     }
//! }
//!
//! // The host exposes the button's background item.
//! let background = ItemId::new(10);
//! let mut store = ItemStore::new();
//! store.declare("color", "#d4d4d4");
//! let mut host = PropertyTable::new();
//! host.insert_item(background, store);
//!
//! // The authored style recolors the background while hovered.
//! let style = Style::builder()
//!     .state(StyleState::new("Hovered").with_changes(PropertyChanges::new(
//!         background,
//!         vec![("color".to_owned(), Binding::String("#6994d4".to_owned()))],
//!     )))
//!     .build();
//!
//! let mut button = Button {
//!     id: WidgetId::new(1),
//!     state: String::new(),
//!     style: Some(style),
//! };
//!
//! // Construction complete: compile (or reuse) the kind's style.
//! let mut factory = StyleFactory::new();
//! let outcome = factory.create(&mut button, &mut host).unwrap();
//! assert!(outcome.succeeded());
//!
//! // The widget entered the Hovered state.
//! button.state = "Hovered".to_owned();
//! let dispatcher = button.style().unwrap().dispatcher().unwrap();
//! dispatcher.dispatch(&button, &mut host).unwrap();
//! assert_eq!(
//!     host.read(background, "color"),
//!     Some(PropertyValue::from("#6994d4"))
//! );
//!
//! // Leaving the state restores the original appearance.
//! button.state = String::new();
//! dispatcher.dispatch(&button, &mut host).unwrap();
//! assert_eq!(
//!     host.read(background, "color"),
//!     Some(PropertyValue::from("#d4d4d4"))
//! );
//! ```

mod changes;
mod control;
mod controller;
mod dispatcher;
mod error;
mod expression;
mod factory;
mod operation;
mod state;
mod style;

pub use changes::{Binding, PropertyChanges};
pub use control::{Control, Signature};
pub use controller::StateController;
pub use dispatcher::{StyleDispatch, StyleDispatcher};
pub use error::StyleError;
pub use expression::PropertyExpression;
pub use factory::{FactoryOutcome, StyleFactory, StyleFactoryHelper};
pub use operation::StateOperation;
pub use state::StyleState;
pub use style::{Style, StyleBuilder};
