// Copyright 2025 the Midstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style dispatch strategies.
//!
//! A dispatcher binds exactly one [`Style`] and applies it to widgets when
//! their interaction state changes. [`StyleDispatch`] is the polymorphic
//! seam; [`StyleDispatcher`] is the default — and only shipped — strategy,
//! which delegates to the style's [`StateController`].
//!
//! [`StateController`]: crate::StateController

use std::fmt;
use std::rc::{Rc, Weak};

use midstory_property::PropertyAccess;

use crate::control::Control;
use crate::error::StyleError;
use crate::style::Style;

/// The capability of applying a bound style to a widget.
pub trait StyleDispatch: fmt::Debug {
    /// The style this dispatcher is bound to.
    fn style(&self) -> Rc<Style>;

    /// Applies the bound style's current state to `control`.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::NullArgument`] when the style's state controller
    /// has expired — a usage fault, since a live style always owns one.
    fn dispatch(&self, control: &dyn Control, host: &mut dyn PropertyAccess)
    -> Result<(), StyleError>;
}

/// The default dispatch strategy: asks the style's state controller to apply
/// itself to the widget.
///
/// Binding happens at construction; the dispatcher registers itself onto the
/// style as the style's sole dispatch authority.
#[derive(Debug)]
pub struct StyleDispatcher {
    style: Rc<Style>,
}

impl StyleDispatcher {
    /// Creates a dispatcher bound to `style` and registers it onto the style.
    #[must_use]
    pub fn new(style: Rc<Style>) -> Rc<Self> {
        Rc::new_cyclic(|weak: &Weak<Self>| {
            let back: Weak<dyn StyleDispatch> = weak.clone();
            style.set_dispatcher(back);
            Self { style }
        })
    }
}

impl StyleDispatch for StyleDispatcher {
    fn style(&self) -> Rc<Style> {
        self.style.clone()
    }

    fn dispatch(
        &self,
        control: &dyn Control,
        host: &mut dyn PropertyAccess,
    ) -> Result<(), StyleError> {
        let controller = self
            .style
            .state_controller()
            .upgrade()
            .ok_or(StyleError::NullArgument("state controller"))?;
        controller.borrow().apply(control, host);
        Ok(())
    }
}
