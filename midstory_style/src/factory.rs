// Copyright 2025 the Midstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style deduplication and compilation.
//!
//! [`StyleFactory`] keeps one compiled style per widget kind. The first
//! widget of a kind to finish construction has its authored style compiled
//! into state operations (the *creation* path); every later widget of the
//! same kind is mapped onto the already-compiled style and its own parsed
//! style is discarded (the *reuse* path). [`StyleFactoryHelper`] carries the
//! per-widget compile and merge machinery.
//!
//! Registration happens before [`StyleFactory::create`] returns and the whole
//! engine is single-threaded, so a second widget of a kind can never observe
//! a half-compiled controller.

use std::collections::VecDeque;
use std::fmt::Write as _;
use std::rc::Rc;

use hashbrown::HashMap;

use midstory_property::PropertyAccess;

use crate::changes::PropertyChanges;
use crate::control::{Control, Signature};
use crate::dispatcher::{StyleDispatch, StyleDispatcher};
use crate::error::StyleError;
use crate::expression::PropertyExpression;
use crate::operation::StateOperation;
use crate::state::StyleState;
use crate::style::Style;

/// What [`StyleFactory::create`] did for a widget.
#[derive(Debug)]
pub enum FactoryOutcome {
    /// First widget of its kind: the widget's own style was compiled and is
    /// now the kind's shared owner style.
    Created(Rc<Style>),
    /// The widget was mapped onto the kind's existing compiled style; its own
    /// parsed style has been discarded.
    Mapped(Rc<Style>),
    /// Mapping failed structurally. The widget is attached to the owner style
    /// but governed by default appearance only; its own parsed style is
    /// preserved for inspection or reload.
    MappingFailed {
        /// The kind's compiled owner style, still attached to the widget.
        style: Rc<Style>,
        /// The widget's parsed style that could not be merged.
        retained: Rc<Style>,
        /// Multi-line report of every mapping failure.
        diagnostic: String,
    },
}

impl FactoryOutcome {
    /// The style attached to the widget by this outcome.
    #[must_use]
    pub fn style(&self) -> &Rc<Style> {
        match self {
            Self::Created(style) | Self::Mapped(style) => style,
            Self::MappingFailed { style, .. } => style,
        }
    }

    /// Returns `true` when the widget ended up governed by a compiled custom
    /// style (created or mapped).
    #[must_use]
    pub fn succeeded(&self) -> bool {
        !matches!(self, Self::MappingFailed { .. })
    }
}

/// The per-kind style registry.
///
/// One dispatcher is registered per distinct widget [`Signature`] ever
/// compiled. The registry is owned by the hosting engine/session object and
/// torn down as a whole through [`StyleFactory::destroy`] when the engine
/// shuts down; entries are never collected individually.
///
/// The registry contents are `Rc`-based and therefore confined to the UI
/// thread; a multi-threaded host must keep the factory on its owning thread.
#[derive(Debug, Default)]
pub struct StyleFactory {
    dispatchers: HashMap<Signature, Rc<dyn StyleDispatch>>,
}

impl StyleFactory {
    /// Creates an empty factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no widget kind has been compiled yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dispatchers.is_empty()
    }

    /// The number of compiled widget kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dispatchers.len()
    }

    /// The dispatcher registered for a signature, if any.
    #[must_use]
    pub fn dispatcher(&self, signature: &Signature) -> Option<Rc<dyn StyleDispatch>> {
        self.dispatchers.get(signature).cloned()
    }

    /// Creates or reuses a style for `control` at construction complete.
    ///
    /// On a registry miss the control's own style is compiled and registered
    /// under the control's signature; on a hit the control is mapped onto the
    /// existing compiled style. Either way the owning style is assigned back
    /// onto the control. Structural mapping failures are reported in the
    /// outcome, not as errors; the widget then keeps default appearance.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::NullArgument`] when the control has no style —
    /// a caller contract violation that aborts the attempt immediately.
    pub fn create(
        &mut self,
        control: &mut dyn Control,
        host: &mut dyn PropertyAccess,
    ) -> Result<FactoryOutcome, StyleError> {
        let signature = control.signature();

        match self.dispatchers.get(&signature).cloned() {
            None => {
                let style = {
                    let helper = StyleFactoryHelper::new(&*control)?;
                    helper.create_style_state_operations(host)?;
                    helper.style()
                };
                let dispatcher: Rc<dyn StyleDispatch> = StyleDispatcher::new(style.clone());
                self.dispatchers.insert(signature.clone(), dispatcher);
                tracing::debug!(
                    signature = signature.as_str(),
                    "compiled style for a new widget kind"
                );
                control.set_style(style.clone());
                control.initialize_default_style_state();
                Ok(FactoryOutcome::Created(style))
            }
            Some(dispatcher) => {
                let (mapped, owner, retained, diagnostic) = {
                    let mut helper = StyleFactoryHelper::new(&*control)?;
                    helper.set_style_dispatcher(dispatcher.as_ref());
                    let mapped = helper.mapping()?;
                    let owner = helper.style();
                    if mapped {
                        // Dropping the helper discards the redundant target
                        // style.
                        (true, owner, None, String::new())
                    } else {
                        let diagnostic = helper.mapping_errors();
                        let retained = helper.into_style_target();
                        (false, owner, retained, diagnostic)
                    }
                };

                control.set_style(owner.clone());

                if mapped {
                    tracing::debug!(
                        signature = signature.as_str(),
                        "mapped widget onto an existing compiled style"
                    );
                    Ok(FactoryOutcome::Mapped(owner))
                } else {
                    tracing::warn!(
                        signature = signature.as_str(),
                        diagnostic = diagnostic.as_str(),
                        "style mapping failed; widget keeps default appearance"
                    );
                    let retained =
                        retained.ok_or(StyleError::NullArgument("style target"))?;
                    Ok(FactoryOutcome::MappingFailed {
                        style: owner,
                        retained,
                        diagnostic,
                    })
                }
            }
        }
    }

    /// Destroys every dispatcher created by this factory.
    ///
    /// The one-shot teardown invoked when the hosting engine shuts down.
    pub fn destroy(&mut self) {
        self.dispatchers.clear();
    }
}

/// Carries one widget's compile or merge attempt.
///
/// During the *creation* stage the style owner is the control's own style and
/// no target is set. [`StyleFactoryHelper::set_style_dispatcher`] switches to
/// the *reuse* stage: the control's style becomes the mapping target and the
/// dispatcher's compiled style becomes the owner.
pub struct StyleFactoryHelper<'a> {
    control: &'a dyn Control,
    style_owner: Rc<Style>,
    style_target: Option<Rc<Style>>,
    /// Ordered so a full diagnostic report can be produced after a complete
    /// attempt instead of aborting on the first failure.
    errors: VecDeque<String>,
}

impl<'a> StyleFactoryHelper<'a> {
    /// Creates a helper for `control`, taking the control's style as the
    /// initial owner.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::NullArgument`] when the control has no style.
    pub fn new(control: &'a dyn Control) -> Result<Self, StyleError> {
        let style_owner = control
            .style()
            .ok_or(StyleError::NullArgument("control's style"))?;
        Ok(Self {
            control,
            style_owner,
            style_target: None,
            errors: VecDeque::new(),
        })
    }

    /// The style owner: the control's style during creation, the dispatcher's
    /// compiled style during reuse.
    #[must_use]
    pub fn style(&self) -> Rc<Style> {
        self.style_owner.clone()
    }

    /// Enters the reuse stage: the control's style becomes the mapping
    /// target and `dispatcher`'s style the owner.
    pub fn set_style_dispatcher(&mut self, dispatcher: &dyn StyleDispatch) {
        self.style_target = Some(std::mem::replace(&mut self.style_owner, dispatcher.style()));
    }

    /// Consumes the helper, returning the unmapped target style so a failed
    /// attempt does not destroy data that could not be merged.
    #[must_use]
    pub fn into_style_target(self) -> Option<Rc<Style>> {
        self.style_target
    }

    /// Compiles the owner style's declared states into operations on its
    /// state controller, including the synthesized default operation.
    ///
    /// States with an empty name are a usage error; they are logged and
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::NullArgument`] when the owner's state controller
    /// has expired, and [`StyleError::InvalidArgument`] when a decoded
    /// binding carries an empty property name.
    pub fn create_style_state_operations(
        &self,
        host: &mut dyn PropertyAccess,
    ) -> Result<(), StyleError> {
        let controller = self
            .style_owner
            .state_controller()
            .upgrade()
            .ok_or(StyleError::NullArgument("state controller"))?;

        let default_operation = self.create_default_state_operation(host)?;
        let mut controller = controller.borrow_mut();
        controller.add_state_operation(default_operation);

        let mut states = self.style_owner.states_mut();
        for state in states.iter_mut() {
            if state.name().is_empty() {
                tracing::warn!("a style state's name can't be empty; state skipped");
                continue;
            }
            let operation = self.create_state_operation(state, host)?;
            controller.add_state_operation(operation);
        }

        Ok(())
    }

    /// Compiles one declared state into a named operation.
    fn create_state_operation(
        &self,
        state: &mut StyleState,
        host: &mut dyn PropertyAccess,
    ) -> Result<StateOperation, StyleError> {
        let mut operation = StateOperation::new(state.name());
        for changes in state.changes_mut() {
            let expression = self.create_property_expression(changes, false, host)?;
            operation.add_expression(expression);
        }
        Ok(operation)
    }

    /// Builds an expression from property changes, decoding them on first
    /// use. With `use_defaults` the expression carries the pre-change
    /// original values instead of the authored ones.
    fn create_property_expression(
        &self,
        changes: &mut PropertyChanges,
        use_defaults: bool,
        host: &dyn PropertyAccess,
    ) -> Result<PropertyExpression, StyleError> {
        if !changes.is_decoded() {
            changes.decode(host);
        }

        let mut expression = PropertyExpression::new();
        expression.add_mapping(self.control.id(), changes.target());
        expression.add_properties(if use_defaults {
            changes.default_properties()
        } else {
            changes.properties()
        })?;
        Ok(expression)
    }

    /// Synthesizes the default operation from the original property values
    /// recorded at decode time.
    ///
    /// Targets touched by several states share one expression: the
    /// first-seen expression is reused and later states merely contribute any
    /// additional properties. Returning to no named state therefore restores
    /// the original appearance exactly.
    fn create_default_state_operation(
        &self,
        host: &mut dyn PropertyAccess,
    ) -> Result<StateOperation, StyleError> {
        let mut operation = StateOperation::default();
        let control_id = self.control.id();

        let mut states = self.style_owner.states_mut();
        for state in states.iter_mut() {
            if state.name().is_empty() {
                tracing::warn!("a style state's name can't be empty; state skipped");
                continue;
            }
            for changes in state.changes_mut() {
                if let Some(expression) =
                    operation.find_expression_by_target(control_id, changes.target())
                {
                    if !changes.is_decoded() {
                        changes.decode(host);
                    }
                    expression
                        .borrow_mut()
                        .add_properties(changes.default_properties())?;
                } else {
                    let expression = self.create_property_expression(changes, true, host)?;
                    operation.add_expression(expression);
                }
            }
        }

        Ok(operation)
    }

    /// Maps the target style's states onto the owner's compiled operations.
    ///
    /// Fails when owner and target are the same object, when their state
    /// counts differ, or when a state's property-changes count does not match
    /// the corresponding operation's expression count. Failures are recorded
    /// in the error queue and reported through
    /// [`StyleFactoryHelper::mapping_errors`]; they never abort the process.
    ///
    /// Property values are *not* re-copied: owner and target states of the
    /// same widget kind are assumed textually symmetric, so only the
    /// `(widget, target-item)` mappings vary per instance. If the values do
    /// differ, the owner's compiled set silently governs every instance.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::NullArgument`] when no target style has been
    /// set or the owner's state controller has expired.
    pub fn mapping(&mut self) -> Result<bool, StyleError> {
        let target = self
            .style_target
            .clone()
            .ok_or(StyleError::NullArgument("style target"))?;

        if self.has_errors() {
            self.clear_mapping_errors();
        }

        if Rc::ptr_eq(&self.style_owner, &target) {
            self.push_mapping_error("style owner and style target are the same object".to_owned());
            return Ok(false);
        }

        if self.style_owner.state_count() != target.state_count() {
            self.push_mapping_error(
                "the number of style states in the style owner is not equal to the number of \
                 style states in the style target"
                    .to_owned(),
            );
            return Ok(false);
        }

        let controller = self
            .style_owner
            .state_controller()
            .upgrade()
            .ok_or(StyleError::NullArgument("state controller"))?;
        let controller = controller.borrow();

        let target_states = target.states();
        for state in target_states.iter() {
            if let Some(operation) = controller.find_state_operation(state.name()).upgrade() {
                if !self.merge_state_operation(&operation, state) {
                    self.push_mapping_error(format!(
                        "impossible to merge the style state '{}' from the style target into \
                         the style state operation of the style owner",
                        state.name()
                    ));
                    return Ok(false);
                }
            }

            // Default restoration must work per widget instance too.
            if let Some(default_operation) = controller.default_state_operation().upgrade() {
                self.merge_default_state_operation(&default_operation, state);
            }
        }

        Ok(true)
    }

    /// Merges one target state into the matching owner operation by
    /// positional correspondence.
    fn merge_state_operation(
        &mut self,
        operation: &Rc<RefCellOperation>,
        state: &StyleState,
    ) -> bool {
        let operation = operation.borrow();

        if operation.name() != state.name() {
            self.push_mapping_error(format!(
                "the style state operation '{}' is not the same as the given style state '{}'",
                operation.name(),
                state.name()
            ));
            return false;
        }

        if operation.len() != state.len() {
            self.push_mapping_error(format!(
                "the expressions of the style state operation '{}' from the style owner are \
                 not equal to the property changes of the style state '{}' from the style target",
                operation.name(),
                state.name()
            ));
            return false;
        }

        // Only the (widget, target)-pairs need mapping; the properties are
        // symmetric between the operation and the state.
        for (index, changes) in state.changes().iter().enumerate() {
            operation.insert_expression_mapping(index, (self.control.id(), changes.target()));
        }

        true
    }

    /// Merges one target state's items into the default operation.
    fn merge_default_state_operation(&self, operation: &Rc<RefCellOperation>, state: &StyleState) {
        let operation = operation.borrow();
        for (index, changes) in state.changes().iter().enumerate() {
            operation.insert_expression_mapping(index, (self.control.id(), changes.target()));
        }
    }

    /// Returns `true` if the last mapping attempt recorded failures.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Formats the recorded mapping failures as a multi-line report:
    /// the control signature followed by one numbered line per failure.
    #[must_use]
    pub fn mapping_errors(&self) -> String {
        let mut report = format!("Control: {}\n", self.control.signature());
        let total = self.errors.len();
        for (index, message) in self.errors.iter().enumerate() {
            let _ = writeln!(report, "{} on {}: {}", index + 1, total, message);
        }
        report
    }

    fn push_mapping_error(&mut self, error: String) {
        self.errors.push_back(error);
    }

    fn clear_mapping_errors(&mut self) {
        self.errors.clear();
    }
}

type RefCellOperation = std::cell::RefCell<StateOperation>;

impl std::fmt::Debug for StyleFactoryHelper<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleFactoryHelper")
            .field("control", &self.control.id())
            .field("signature", &self.control.signature())
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}
