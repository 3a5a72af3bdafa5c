// Copyright 2025 the Midstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The compiled, multi-widget patch unit.
//!
//! A [`PropertyExpression`] is the runtime form of one [`PropertyChanges`]:
//! a set of `(widget, target-item)` mappings plus the ordered properties to
//! write. One expression serves every widget instance of a kind — mapping a
//! new widget into an existing expression is how the factory's reuse path
//! avoids recompiling property sets.
//!
//! [`PropertyChanges`]: crate::PropertyChanges

use smallvec::SmallVec;

use midstory_property::{ItemId, PropertyAccess, PropertyValue, WidgetId};

use crate::control::Control;
use crate::error::StyleError;

/// Inline capacity for the widget mapping table. Most expressions serve a
/// handful of widget instances.
const INLINE_MAPPINGS: usize = 4;

/// An ordered set of `(property, value)` assignments plus the widgets and
/// target items they apply to.
///
/// Invariant: a widget appears in the mapping table at most once per
/// expression. Equality is structural over both the mappings and the
/// properties.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyExpression {
    /// Sorted by [`WidgetId`] for binary search lookup.
    mappings: SmallVec<[(WidgetId, ItemId); INLINE_MAPPINGS]>,
    /// Properties in declaration order.
    properties: Vec<(String, PropertyValue)>,
}

impl PropertyExpression {
    /// Creates an empty expression.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of widget mappings and the number of properties.
    #[must_use]
    pub fn counts(&self) -> (usize, usize) {
        (self.mappings.len(), self.properties.len())
    }

    #[inline]
    fn find_mapping(&self, widget: WidgetId) -> Result<usize, usize> {
        self.mappings.binary_search_by_key(&widget, |(w, _)| *w)
    }

    /// Returns `true` if `widget` is mapped in this expression.
    #[must_use]
    pub fn contains_control(&self, widget: WidgetId) -> bool {
        self.find_mapping(widget).is_ok()
    }

    /// Returns `true` if this expression maps `widget` to `target`.
    #[must_use]
    pub fn contains_target(&self, widget: WidgetId, target: ItemId) -> bool {
        self.find_mapping(widget)
            .is_ok_and(|idx| self.mappings[idx].1 == target)
    }

    /// Returns the target item mapped to `widget`, if any.
    #[must_use]
    pub fn target_for(&self, widget: WidgetId) -> Option<ItemId> {
        self.find_mapping(widget).ok().map(|idx| self.mappings[idx].1)
    }

    /// Maps `widget` to `target`.
    ///
    /// A widget maps to at most one target; re-mapping replaces the previous
    /// target. Guarding against accidental duplicates is the caller's
    /// responsibility, via [`PropertyExpression::contains_control`].
    pub fn add_mapping(&mut self, widget: WidgetId, target: ItemId) {
        match self.find_mapping(widget) {
            Ok(idx) => self.mappings[idx].1 = target,
            Err(idx) => self.mappings.insert(idx, (widget, target)),
        }
    }

    /// Removes the mapping for `widget`.
    ///
    /// Returns `true` if a mapping was removed.
    pub fn remove_mapping(&mut self, widget: WidgetId) -> bool {
        match self.find_mapping(widget) {
            Ok(idx) => {
                self.mappings.remove(idx);
                true
            }
            Err(_) => false,
        }
    }

    /// Returns `true` if a property named `name` is present.
    #[must_use]
    pub fn contains_property(&self, name: &str) -> bool {
        self.properties.iter().any(|(n, _)| n == name)
    }

    /// Appends a `(name, value)` property.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidArgument`] if `name` is empty.
    pub fn add_property(
        &mut self,
        name: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Result<(), StyleError> {
        let name = name.into();
        if name.is_empty() {
            return Err(StyleError::InvalidArgument(
                "a property name can't be an empty string".to_owned(),
            ));
        }
        self.properties.push((name, value.into()));
        Ok(())
    }

    /// Appends every property not already present — first writer wins,
    /// duplicates are skipped silently.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidArgument`] if an entry has an empty name.
    pub fn add_properties(
        &mut self,
        properties: &[(String, PropertyValue)],
    ) -> Result<(), StyleError> {
        for (name, value) in properties {
            if !self.contains_property(name) {
                self.add_property(name.clone(), value.clone())?;
            }
        }
        Ok(())
    }

    /// Removes the property named `name`.
    ///
    /// Returns `true` if a property was removed.
    pub fn remove_property(&mut self, name: &str) -> bool {
        let before = self.properties.len();
        self.properties.retain(|(n, _)| n != name);
        self.properties.len() != before
    }

    /// Applies the expression to `control`.
    ///
    /// Returns `false` without touching the host when `control` is not
    /// mapped. Otherwise writes every property onto the mapped target in
    /// order; the first invalid or read-only property stops the pass and
    /// reports failure, but earlier writes in the same call are **not**
    /// rolled back.
    pub fn apply(&self, control: &dyn Control, host: &mut dyn PropertyAccess) -> bool {
        let Some(target) = self.target_for(control.id()) else {
            return false;
        };

        for (name, value) in &self.properties {
            if let Err(error) = host.write(target, name, value.clone()) {
                tracing::warn!(
                    widget = control.id().raw(),
                    %error,
                    "style property write rejected"
                );
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use midstory_property::{ItemStore, PropertyTable};

    use crate::control::Signature;
    use crate::style::Style;

    struct TestControl {
        id: WidgetId,
    }

    impl Control for TestControl {
        fn id(&self) -> WidgetId {
            self.id
        }
        fn signature(&self) -> Signature {
            Signature::new("Midstory.Controls", "Button")
        }
        fn style_state(&self) -> &str {
            ""
        }
        fn style(&self) -> Option<Rc<Style>> {
            None
        }
        fn set_style(&mut self, _style: Rc<Style>) {}
    }

    fn background_host(item: ItemId) -> PropertyTable {
        let mut store = ItemStore::new();
        store.declare("width", 100.0);
        store.declare("height", 40.0);
        store.declare_read_only("implicitWidth", 100.0);
        let mut host = PropertyTable::new();
        host.insert_item(item, store);
        host
    }

    #[test]
    fn apply_writes_mapped_properties() {
        let widget = TestControl {
            id: WidgetId::new(1),
        };
        let background = ItemId::new(10);
        let mut host = background_host(background);

        let mut expression = PropertyExpression::new();
        expression.add_mapping(widget.id(), background);
        expression.add_property("width", 75.0).unwrap();
        expression.add_property("height", 25.0).unwrap();

        assert!(expression.apply(&widget, &mut host));
        assert_eq!(
            host.read(background, "width"),
            Some(PropertyValue::Number(75.0))
        );
        assert_eq!(
            host.read(background, "height"),
            Some(PropertyValue::Number(25.0))
        );
    }

    #[test]
    fn apply_unmapped_widget_is_not_applied() {
        let widget = TestControl {
            id: WidgetId::new(1),
        };
        let background = ItemId::new(10);
        let mut host = background_host(background);

        let mut expression = PropertyExpression::new();
        expression.add_property("width", 75.0).unwrap();

        assert!(!expression.apply(&widget, &mut host));
        // No host mutation happened.
        assert_eq!(
            host.read(background, "width"),
            Some(PropertyValue::Number(100.0))
        );
    }

    #[test]
    fn apply_stops_at_first_bad_property_without_rollback() {
        let widget = TestControl {
            id: WidgetId::new(1),
        };
        let background = ItemId::new(10);
        let mut host = background_host(background);

        let mut expression = PropertyExpression::new();
        expression.add_mapping(widget.id(), background);
        expression.add_property("width", 75.0).unwrap();
        expression.add_property("implicitWidth", 75.0).unwrap(); // read-only
        expression.add_property("height", 25.0).unwrap();

        assert!(!expression.apply(&widget, &mut host));
        // The write before the failure sticks...
        assert_eq!(
            host.read(background, "width"),
            Some(PropertyValue::Number(75.0))
        );
        // ...and the write after it never happens.
        assert_eq!(
            host.read(background, "height"),
            Some(PropertyValue::Number(40.0))
        );
    }

    #[test]
    fn add_property_rejects_empty_name() {
        let mut expression = PropertyExpression::new();
        let err = expression.add_property("", 1.0).unwrap_err();
        assert!(matches!(err, StyleError::InvalidArgument(_)));
    }

    #[test]
    fn add_then_remove_property() {
        let mut expression = PropertyExpression::new();
        expression.add_property("color", "#6994d4").unwrap();
        assert!(expression.contains_property("color"));

        assert!(expression.remove_property("color"));
        assert_eq!(expression.counts().1, 0);
        assert!(!expression.remove_property("color"));
    }

    #[test]
    fn add_properties_first_writer_wins() {
        let mut expression = PropertyExpression::new();
        expression.add_property("width", 75.0).unwrap();
        expression
            .add_properties(&[
                ("width".to_owned(), PropertyValue::Number(999.0)),
                ("height".to_owned(), PropertyValue::Number(25.0)),
            ])
            .unwrap();

        assert_eq!(expression.counts().1, 2);
        assert_eq!(
            expression
                .contains_property("width")
                .then(|| &expression.properties[0].1),
            Some(&PropertyValue::Number(75.0))
        );
    }

    #[test]
    fn mapping_is_unique_per_widget() {
        let mut expression = PropertyExpression::new();
        let widget = WidgetId::new(1);
        expression.add_mapping(widget, ItemId::new(10));
        expression.add_mapping(widget, ItemId::new(11));

        assert_eq!(expression.counts().0, 1);
        assert_eq!(expression.target_for(widget), Some(ItemId::new(11)));
        assert!(expression.contains_target(widget, ItemId::new(11)));
        assert!(!expression.contains_target(widget, ItemId::new(10)));
    }

    #[test]
    fn remove_mapping() {
        let mut expression = PropertyExpression::new();
        let widget = WidgetId::new(1);
        expression.add_mapping(widget, ItemId::new(10));

        assert!(expression.remove_mapping(widget));
        assert!(!expression.contains_control(widget));
        assert!(!expression.remove_mapping(widget));
    }

    #[test]
    fn equality_is_structural() {
        let mut a = PropertyExpression::new();
        a.add_mapping(WidgetId::new(1), ItemId::new(10));
        a.add_property("width", 75.0).unwrap();

        let mut b = PropertyExpression::new();
        b.add_mapping(WidgetId::new(1), ItemId::new(10));
        b.add_property("width", 75.0).unwrap();

        assert_eq!(a, b);

        b.add_property("height", 25.0).unwrap();
        assert_ne!(a, b);
    }
}
