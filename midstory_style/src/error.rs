// Copyright 2025 the Midstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Usage-fault taxonomy for the style core.
//!
//! These errors mark caller contract violations at API boundaries. They are
//! raised immediately, never retried, and propagate with `?` up to the
//! factory entry point rather than being handled deep inside. Recoverable
//! fault classes (bad declarations, structural mapping mismatches, rejected
//! property writes) are not represented here; those are logged or queued
//! where they occur so widget construction never fails outright.

use thiserror::Error;

/// A caller contract violation at a style API boundary.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StyleError {
    /// A required collaborator is absent: a widget without a style, an
    /// expired state-controller handle, a missing dispatcher registration.
    #[error("required argument `{0}` is absent")]
    NullArgument(&'static str),
    /// An argument violates its contract, such as an empty property name.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            StyleError::NullArgument("control's style").to_string(),
            "required argument `control's style` is absent"
        );
        assert_eq!(
            StyleError::InvalidArgument("a property name can't be empty".to_owned()).to_string(),
            "invalid argument: a property name can't be empty"
        );
    }
}
