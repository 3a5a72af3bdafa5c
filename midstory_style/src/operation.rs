// Copyright 2025 the Midstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The compiled form of one style state.
//!
//! A [`StateOperation`] is a named, ordered collection of
//! [`PropertyExpression`]s: everything that happens when a widget of a kind
//! enters the state with this name. The empty-named operation is the
//! distinguished *default* operation restoring original property values.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use midstory_property::{ItemId, PropertyAccess, WidgetId};

use crate::control::Control;
use crate::expression::PropertyExpression;

/// A named, ordered collection of property expressions, shared by every
/// widget instance of a kind.
///
/// Invariant: within one controller, operation names are unique; the
/// empty-named operation always exists once a style has been compiled.
#[derive(Clone, Debug, Default)]
pub struct StateOperation {
    name: String,
    expressions: Vec<Rc<RefCell<PropertyExpression>>>,
}

impl StateOperation {
    /// Creates an operation with the given state name.
    ///
    /// An empty name creates the default operation.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expressions: Vec::new(),
        }
    }

    /// The state name this operation belongs to.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if this is the default (empty-named) operation.
    #[must_use]
    #[inline]
    pub fn is_default(&self) -> bool {
        self.name.is_empty()
    }

    /// The number of expressions in the operation.
    #[must_use]
    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    /// Returns `true` if the operation holds no expressions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// Appends an expression at the end of the operation.
    pub fn add_expression(&mut self, expression: PropertyExpression) {
        self.expressions.push(Rc::new(RefCell::new(expression)));
    }

    /// Returns a weak handle to the expression at `index`.
    ///
    /// Returns an expired handle when `index` is out of range.
    #[must_use]
    pub fn expression_at(&self, index: usize) -> Weak<RefCell<PropertyExpression>> {
        self.expressions
            .get(index)
            .map_or_else(Weak::new, Rc::downgrade)
    }

    /// Returns the expression mapping `widget` to `target`, if one exists.
    pub(crate) fn find_expression_by_target(
        &self,
        widget: WidgetId,
        target: ItemId,
    ) -> Option<&Rc<RefCell<PropertyExpression>>> {
        self.expressions
            .iter()
            .find(|expression| expression.borrow().contains_target(widget, target))
    }

    /// Inserts a `(widget, target)` mapping into the expression at `index`.
    ///
    /// Idempotent against accidental double merge: if the expression already
    /// maps the widget, nothing changes. Returns `false` when `index` is out
    /// of range.
    pub fn insert_expression_mapping(&self, index: usize, mapping: (WidgetId, ItemId)) -> bool {
        let Some(expression) = self.expressions.get(index) else {
            return false;
        };
        let mut expression = expression.borrow_mut();
        if !expression.contains_control(mapping.0) {
            expression.add_mapping(mapping.0, mapping.1);
        }
        true
    }

    /// Applies every expression to `control`, in insertion order.
    ///
    /// Expressions that do not map `control` are silently skipped; this is
    /// how unrelated widgets sharing a compiled operation stay independent.
    pub fn apply(&self, control: &dyn Control, host: &mut dyn PropertyAccess) {
        for expression in &self.expressions {
            expression.borrow().apply(control, host);
        }
    }

}

impl PartialEq for StateOperation {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.expressions.len() == other.expressions.len()
            && self
                .expressions
                .iter()
                .zip(&other.expressions)
                .all(|(a, b)| *a.borrow() == *b.borrow())
    }
}
