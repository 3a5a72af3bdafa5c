// Copyright 2025 the Midstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Author-declared property overrides for one target item.
//!
//! [`PropertyChanges`] is the raw declarative payload of a style state: one
//! target sub-item plus the bindings the author wrote for it. Bindings stay
//! raw until [`PropertyChanges::decode`] runs, which happens exactly once,
//! lazily, when the factory first compiles the enclosing style. Decode
//! flattens legal bindings into `(name, value)` pairs and records the
//! target's *current* value for every touched property, which later becomes
//! the default/reset state.

use midstory_property::{ItemId, PropertyAccess, PropertyValue};

/// A raw declarative binding, as handed over by the parser.
///
/// Only scalar bindings and nested group bindings are legal on a
/// [`PropertyChanges`]; every other kind is a declaration fault that is
/// reported and skipped at decode time.
#[derive(Clone, Debug, PartialEq)]
pub enum Binding {
    /// A boolean literal.
    Bool(bool),
    /// A numeric literal.
    Number(f64),
    /// A string literal.
    String(String),
    /// A nested group of bindings (`border.width: 2`), flattened into
    /// dot-separated property paths at decode time.
    Group(Vec<(String, Binding)>),
    /// A script or expression binding. Illegal here.
    Script(String),
    /// An object binding. Illegal here.
    Object,
    /// A translation binding. Illegal here.
    Translation,
    /// An attached-property binding. Illegal here.
    AttachedProperty,
    /// A binding the parser could not classify. Illegal here.
    Invalid,
}

impl Binding {
    /// Returns the scalar value of a legal non-group binding.
    fn scalar(&self) -> Option<PropertyValue> {
        match self {
            Self::Bool(b) => Some(PropertyValue::Bool(*b)),
            Self::Number(n) => Some(PropertyValue::Number(*n)),
            Self::String(s) => Some(PropertyValue::String(s.clone())),
            _ => None,
        }
    }

    /// Returns a short name for the binding kind, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Group(_) => "group property",
            Self::Script(_) => "script",
            Self::Object => "object",
            Self::Translation => "translation",
            Self::AttachedProperty => "attached property",
            Self::Invalid => "invalid",
        }
    }
}

/// The author-declared `(target, {property: value})` bundle for one style
/// state.
///
/// Lifecycle is two-phase, `Declared -> Decoded`; [`PropertyChanges::decode`]
/// is idempotent and must run before the first property read. The factory
/// triggers it on first use during compilation.
#[derive(Clone, Debug)]
pub struct PropertyChanges {
    target: ItemId,
    bindings: Vec<(String, Binding)>,
    properties: Vec<(String, PropertyValue)>,
    default_properties: Vec<(String, PropertyValue)>,
    decoded: bool,
}

impl PropertyChanges {
    /// Creates property changes for `target` from raw parsed bindings.
    #[must_use]
    pub fn new(target: ItemId, bindings: Vec<(String, Binding)>) -> Self {
        Self {
            target,
            bindings,
            properties: Vec::new(),
            default_properties: Vec::new(),
            decoded: false,
        }
    }

    /// The target sub-item whose properties these changes modify.
    #[must_use]
    #[inline]
    pub fn target(&self) -> ItemId {
        self.target
    }

    /// Returns `true` once [`PropertyChanges::decode`] has run.
    #[must_use]
    #[inline]
    pub fn is_decoded(&self) -> bool {
        self.decoded
    }

    /// The decoded `(name, value)` pairs, in declaration order.
    ///
    /// Empty until decode has run.
    #[must_use]
    pub fn properties(&self) -> &[(String, PropertyValue)] {
        &self.properties
    }

    /// The target's original values for every decoded property, recorded at
    /// decode time. These drive the synthesized default operation.
    #[must_use]
    pub fn default_properties(&self) -> &[(String, PropertyValue)] {
        &self.default_properties
    }

    /// Decodes the raw bindings against the live target.
    ///
    /// Runs at most once; subsequent calls are no-ops. Illegal binding kinds
    /// and unresolvable or read-only target properties are reported through
    /// the diagnostic channel and skipped — a declaration fault never fails
    /// the enclosing widget.
    pub fn decode(&mut self, host: &dyn PropertyAccess) {
        if self.decoded {
            return;
        }

        for (name, binding) in &self.bindings {
            flatten_binding("", name, binding, &mut self.properties);
        }

        for (name, _) in &self.properties {
            if let Some(original) = host.read(self.target, name) {
                if host.is_writable(self.target, name) {
                    self.default_properties.push((name.clone(), original));
                } else {
                    tracing::warn!(
                        target_item = self.target.raw(),
                        property = name.as_str(),
                        "cannot assign to a read-only property"
                    );
                }
            } else {
                tracing::warn!(
                    target_item = self.target.raw(),
                    property = name.as_str(),
                    "the target item has no property with this name"
                );
            }
        }

        self.decoded = true;
    }
}

/// Flattens one binding into `out`, recursing through groups with a
/// dot-separated path prefix.
fn flatten_binding(
    prefix: &str,
    name: &str,
    binding: &Binding,
    out: &mut Vec<(String, PropertyValue)>,
) {
    let path = if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}.{name}")
    };

    match binding {
        Binding::Group(children) => {
            for (child_name, child) in children {
                flatten_binding(&path, child_name, child, out);
            }
        }
        _ => {
            if let Some(value) = binding.scalar() {
                out.push((path, value));
            } else {
                tracing::warn!(
                    property = path.as_str(),
                    kind = binding.kind(),
                    "property changes do not support this binding kind"
                );
            }
        }
    }
}
