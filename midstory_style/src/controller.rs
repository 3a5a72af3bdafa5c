// Copyright 2025 the Midstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-style ownership and resolution of compiled state operations.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use hashbrown::HashMap;

use midstory_property::PropertyAccess;

use crate::control::Control;
use crate::operation::StateOperation;
use crate::style::Style;

/// Owns every [`StateOperation`] compiled for one [`Style`], keyed by state
/// name, and resolves "default + current state" into an applied patch.
///
/// The controller hands out weak handles only; callers must treat lookups as
/// possibly expired.
#[derive(Debug)]
pub struct StateController {
    /// Non-owning back-reference; the style owns the controller.
    style: Weak<Style>,
    operations: HashMap<String, Rc<RefCell<StateOperation>>>,
}

impl StateController {
    pub(crate) fn new(style: Weak<Style>) -> Self {
        Self {
            style,
            operations: HashMap::new(),
        }
    }

    /// The style this controller belongs to.
    ///
    /// The handle is weak by design: a controller must never extend its
    /// style's lifetime.
    #[must_use]
    pub fn style(&self) -> Weak<Style> {
        self.style.clone()
    }

    /// Returns `true` if no operations have been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// The number of registered operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Registers an operation under its own name.
    ///
    /// The last writer for a given name wins.
    pub fn add_state_operation(&mut self, operation: StateOperation) {
        self.operations
            .insert(operation.name().to_owned(), Rc::new(RefCell::new(operation)));
    }

    /// Looks up the operation for a state name.
    ///
    /// The empty name resolves to the default operation. A miss returns an
    /// expired handle, not an error.
    #[must_use]
    pub fn find_state_operation(&self, name: &str) -> Weak<RefCell<StateOperation>> {
        self.operations
            .get(name)
            .map_or_else(Weak::new, Rc::downgrade)
    }

    /// The default (empty-named) operation.
    #[must_use]
    pub fn default_state_operation(&self) -> Weak<RefCell<StateOperation>> {
        self.find_state_operation("")
    }

    /// Applies the current style state to `control`.
    ///
    /// The default operation (if present) always runs first; the operation
    /// matching the control's interaction-state name runs second, so
    /// state-specific values override defaults and never vice versa. An
    /// unknown or empty state name applies the default alone.
    pub fn apply(&self, control: &dyn Control, host: &mut dyn PropertyAccess) {
        let state_name = control.style_state();
        let key = if self.operations.contains_key(state_name) {
            state_name
        } else {
            ""
        };

        if let Some(default) = self.operations.get("") {
            default.borrow().apply(control, host);
        }

        if !key.is_empty()
            && let Some(operation) = self.operations.get(key)
        {
            operation.borrow().apply(control, host);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use midstory_property::{ItemId, ItemStore, PropertyTable, PropertyValue, WidgetId};

    use crate::control::Signature;
    use crate::expression::PropertyExpression;

    struct TestControl {
        id: WidgetId,
        state: String,
    }

    impl Control for TestControl {
        fn id(&self) -> WidgetId {
            self.id
        }
        fn signature(&self) -> Signature {
            Signature::new("Midstory.Controls", "Button")
        }
        fn style_state(&self) -> &str {
            &self.state
        }
        fn style(&self) -> Option<Rc<Style>> {
            None
        }
        fn set_style(&mut self, _style: Rc<Style>) {}
    }

    fn controller() -> StateController {
        StateController::new(Weak::new())
    }

    fn operation(name: &str, widget: WidgetId, target: ItemId, width: f64) -> StateOperation {
        let mut expression = PropertyExpression::new();
        expression.add_mapping(widget, target);
        expression.add_property("width", width).unwrap();
        let mut op = StateOperation::new(name);
        op.add_expression(expression);
        op
    }

    fn host_with(target: ItemId) -> PropertyTable {
        let mut store = ItemStore::new();
        store.declare("width", 100.0);
        let mut host = PropertyTable::new();
        host.insert_item(target, store);
        host
    }

    #[test]
    fn default_lookup_is_idempotent() {
        let mut c = controller();
        c.add_state_operation(StateOperation::default());

        let by_name = c.find_state_operation("").upgrade().unwrap();
        let by_default = c.default_state_operation().upgrade().unwrap();
        assert!(Rc::ptr_eq(&by_name, &by_default));
    }

    #[test]
    fn miss_returns_expired_handle() {
        let c = controller();
        assert!(c.find_state_operation("Hovered").upgrade().is_none());
        assert!(c.default_state_operation().upgrade().is_none());
    }

    #[test]
    fn last_writer_wins_per_name() {
        let widget = WidgetId::new(1);
        let target = ItemId::new(10);

        let mut c = controller();
        c.add_state_operation(operation("Hovered", widget, target, 1.0));
        c.add_state_operation(operation("Hovered", widget, target, 2.0));

        assert_eq!(c.len(), 1);
        let op = c.find_state_operation("Hovered").upgrade().unwrap();
        assert_eq!(op.borrow().len(), 1);
    }

    #[test]
    fn apply_default_only_regardless_of_state() {
        let widget = WidgetId::new(1);
        let target = ItemId::new(10);
        let mut host = host_with(target);

        let mut c = controller();
        c.add_state_operation(operation("", widget, target, 50.0));

        let control = TestControl {
            id: widget,
            state: "Hovered".to_owned(),
        };
        c.apply(&control, &mut host);
        assert_eq!(host.read(target, "width"), Some(PropertyValue::Number(50.0)));
    }

    #[test]
    fn apply_runs_default_before_named() {
        let widget = WidgetId::new(1);
        let target = ItemId::new(10);
        let mut host = host_with(target);

        // Both operations write the same property; the named one must win.
        let mut c = controller();
        c.add_state_operation(operation("", widget, target, 50.0));
        c.add_state_operation(operation("Hovered", widget, target, 75.0));

        let hovered = TestControl {
            id: widget,
            state: "Hovered".to_owned(),
        };
        c.apply(&hovered, &mut host);
        assert_eq!(host.read(target, "width"), Some(PropertyValue::Number(75.0)));

        // Leaving the state restores the default value.
        let idle = TestControl {
            id: widget,
            state: String::new(),
        };
        c.apply(&idle, &mut host);
        assert_eq!(host.read(target, "width"), Some(PropertyValue::Number(50.0)));
    }

    #[test]
    fn apply_unknown_state_falls_back_to_default() {
        let widget = WidgetId::new(1);
        let target = ItemId::new(10);
        let mut host = host_with(target);

        let mut c = controller();
        c.add_state_operation(operation("", widget, target, 50.0));
        c.add_state_operation(operation("Hovered", widget, target, 75.0));

        let control = TestControl {
            id: widget,
            state: "Disabled".to_owned(),
        };
        c.apply(&control, &mut host);
        assert_eq!(host.read(target, "width"), Some(PropertyValue::Number(50.0)));
    }

    #[test]
    fn style_back_reference_does_not_extend_lifetime() {
        let style = Style::builder().build();
        let controller = style.state_controller().upgrade().unwrap();
        assert!(controller.borrow().style().upgrade().is_some());

        drop(style);
        assert!(controller.borrow().style().upgrade().is_none());
    }
}
