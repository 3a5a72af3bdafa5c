// Copyright 2025 the Midstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named bundles of property overrides.

use crate::changes::PropertyChanges;

/// One named state of a style: the [`PropertyChanges`] to apply when a widget
/// enters the interaction state with this name.
///
/// A usable state name must be non-empty; the factory rejects (logs and
/// skips) empty-named states at compile time. The empty name is reserved for
/// the synthesized default operation, which no author ever declares.
#[derive(Clone, Debug)]
pub struct StyleState {
    name: String,
    changes: Vec<PropertyChanges>,
}

impl StyleState {
    /// Creates a state with the given name and no changes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            changes: Vec::new(),
        }
    }

    /// Appends property changes to this state, builder style.
    #[must_use]
    pub fn with_changes(mut self, changes: PropertyChanges) -> Self {
        self.changes.push(changes);
        self
    }

    /// Appends property changes to this state.
    pub fn push_changes(&mut self, changes: PropertyChanges) {
        self.changes.push(changes);
    }

    /// The state's name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered property changes declared under this state.
    #[must_use]
    pub fn changes(&self) -> &[PropertyChanges] {
        &self.changes
    }

    /// Mutable access to the changes, used by the factory to trigger decode.
    pub(crate) fn changes_mut(&mut self) -> &mut [PropertyChanges] {
        &mut self.changes
    }

    /// The number of property changes in this state.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Returns `true` if the state declares no changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changes::Binding;
    use midstory_property::ItemId;

    #[test]
    fn state_collects_changes() {
        let state = StyleState::new("Hovered")
            .with_changes(PropertyChanges::new(
                ItemId::new(1),
                vec![("color".to_owned(), Binding::String("#6994d4".to_owned()))],
            ))
            .with_changes(PropertyChanges::new(ItemId::new(2), Vec::new()));

        assert_eq!(state.name(), "Hovered");
        assert_eq!(state.len(), 2);
        assert!(!state.is_empty());
        assert_eq!(state.changes()[0].target(), ItemId::new(1));
    }

    #[test]
    fn state_starts_empty() {
        let state = StyleState::new("Pressed");
        assert!(state.is_empty());
        assert_eq!(state.len(), 0);
    }
}
