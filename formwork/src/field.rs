//! Single-control field controller.

use std::fmt;
use std::sync::Arc;

use crate::FormBuilder;
use crate::config::ErrorReporting;
use crate::container::{ValueArray, ValueSlot};
use crate::control::{FieldView, RenderableControl};
use crate::definition::FieldDefinition;
use crate::error::Result;
use crate::messages::MessageResolver;
use crate::notify::{ChangeEvent, ChangeNotifier, ListenerId};
use crate::registry::ComponentKind;
use crate::validation::{RuleFailure, RuleSet};
use crate::value::Value;

/// Label shown by the control at `index`: only the first control of a
/// field carries the definition's label.
pub fn label_for(index: usize, definition: &FieldDefinition) -> &str {
    if index == 0 { &definition.label } else { "" }
}

/// A definition compiled once and shared by every control created from it.
pub(crate) struct CompiledField {
    pub(crate) definition: FieldDefinition,
    pub(crate) kind: Arc<dyn ComponentKind>,
    pub(crate) rules: RuleSet,
    pub(crate) resolver: Arc<dyn MessageResolver>,
    pub(crate) reporting: ErrorReporting,
}

impl CompiledField {
    /// Default value of the first control, normalized for the kind.
    pub(crate) fn default_value(&self) -> Value {
        match &self.definition.default_value {
            Some(v) => self.kind.normalize(v.clone()),
            None => self.kind.empty_value(),
        }
    }
}

impl fmt::Debug for CompiledField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledField")
            .field("definition", &self.definition)
            .field("kind", &self.kind)
            .field("rules", &self.rules)
            .field("reporting", &self.reporting)
            .finish()
    }
}

/// Where a controller lives.
#[derive(Debug)]
enum Placement {
    /// A top-level single field.
    Single,
    /// An item of a repeatable field; its position is looked up in the array.
    Item(ValueArray),
}

/// Controller for one input control.
///
/// Owns the control's value (stored in a [`ValueSlot`] shared with its
/// container), the value it was seeded with, the failures of the last
/// evaluation and a dirty flag.
/// Invalid input never produces an `Err`; it is recorded as failures.
///
/// # Example
///
/// ```
/// use formwork::definition::{FieldDefinition, ValidationRuleSet};
/// use formwork::FieldController;
///
/// let definition = FieldDefinition::new("textarea", "textarea")
///     .label("Textarea")
///     .validate(ValidationRuleSet::new().required(true).min_length(2));
/// let mut field = FieldController::new(definition).unwrap();
///
/// field.set_value("T");
/// assert_eq!(field.errors(), vec!["Textarea must be at least 2 characters"]);
/// field.set_value("te");
/// assert!(field.is_valid());
/// ```
#[derive(Debug)]
pub struct FieldController {
    compiled: Arc<CompiledField>,
    slot: ValueSlot,
    seed: Value,
    placement: Placement,
    failures: Vec<RuleFailure>,
    dirty: bool,
    notifier: ChangeNotifier,
}

impl FieldController {
    /// Build a standalone controller with the default [`FormBuilder`].
    pub fn new(definition: FieldDefinition) -> Result<Self> {
        FormBuilder::new().field(definition)
    }

    pub(crate) fn single(compiled: Arc<CompiledField>, notifier: ChangeNotifier) -> Self {
        let value = compiled.default_value();
        Self::create(compiled, value, Placement::Single, notifier)
    }

    /// Create an item control seeded with `value`. The caller inserts
    /// [`slot`](Self::slot) into `array`.
    pub(crate) fn item(
        compiled: Arc<CompiledField>,
        value: Value,
        array: ValueArray,
        notifier: ChangeNotifier,
    ) -> Self {
        Self::create(compiled, value, Placement::Item(array), notifier)
    }

    fn create(
        compiled: Arc<CompiledField>,
        value: Value,
        placement: Placement,
        notifier: ChangeNotifier,
    ) -> Self {
        let value = compiled.kind.normalize(value);
        let failures = compiled.rules.evaluate(&value, compiled.kind.as_ref());
        Self {
            compiled,
            slot: ValueSlot::new(value.clone()),
            seed: value,
            placement,
            failures,
            dirty: false,
            notifier,
        }
    }

    pub(crate) fn slot(&self) -> &ValueSlot {
        &self.slot
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// Field key from the definition.
    pub fn key(&self) -> &str {
        &self.compiled.definition.key
    }

    /// Definition the control was built from.
    pub fn definition(&self) -> &FieldDefinition {
        &self.compiled.definition
    }

    /// Position within the repeatable field, `None` for single fields.
    pub fn index(&self) -> Option<usize> {
        match &self.placement {
            Placement::Single => None,
            Placement::Item(array) => array.position_of(&self.slot),
        }
    }

    /// Derived label, recomputed from the current position on every call.
    pub fn label(&self) -> &str {
        label_for(self.index().unwrap_or(0), &self.compiled.definition)
    }

    /// Current value.
    pub fn value(&self) -> Value {
        self.slot.get()
    }

    /// The value this control was created with and resets to.
    ///
    /// Only the first control of a field is seeded with the definition's
    /// default; controls added later start from the kind's empty value.
    pub fn default_value(&self) -> Value {
        self.seed.clone()
    }

    /// Whether the `required` rule is set.
    pub fn is_required(&self) -> bool {
        self.compiled.rules.is_required()
    }

    /// Every failure of the last evaluation, in evaluation order.
    pub fn failures(&self) -> &[RuleFailure] {
        &self.failures
    }

    /// Messages to display, resolved with the current label.
    ///
    /// Holds at most one message unless the form reports all failures.
    pub fn errors(&self) -> Vec<String> {
        self.errors_labelled(self.label())
    }

    pub(crate) fn errors_labelled(&self, label: &str) -> Vec<String> {
        let shown = match self.compiled.reporting {
            ErrorReporting::FirstFailure => &self.failures[..self.failures.len().min(1)],
            ErrorReporting::All => &self.failures[..],
        };
        shown
            .iter()
            .map(|failure| self.compiled.resolver.resolve_failure(failure, label))
            .collect()
    }

    /// Whether the last evaluation found no failure.
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Whether the value was written since creation or the last
    /// [`mark_pristine`](Self::mark_pristine).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> FieldView {
        self.view_at(self.index())
    }

    /// Snapshot for a control whose position is already known.
    pub(crate) fn view_at(&self, index: Option<usize>) -> FieldView {
        let definition = &self.compiled.definition;
        let label = label_for(index.unwrap_or(0), definition);
        FieldView {
            key: definition.key.clone(),
            index,
            label: label.to_string(),
            placeholder: definition.placeholder.clone(),
            prefix: definition.prefix.clone(),
            suffix: definition.suffix.clone(),
            value: self.value(),
            required: self.is_required(),
            errors: self.errors_labelled(label),
        }
    }

    /// Render this control.
    pub fn present(&self, control: &mut dyn RenderableControl) {
        control.render(&self.view());
    }

    /// The notifier this control reports to. Shared with its container.
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Register a change listener.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        self.notifier.subscribe(listener)
    }

    /// Remove a change listener.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.notifier.unsubscribe(id)
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    /// Replace the value, re-evaluate the rules and notify the container.
    pub fn set_value(&mut self, value: impl Into<Value>) {
        let value = self.compiled.kind.normalize(value.into());
        log::trace!("field '{}': set value {:?}", self.key(), value);
        self.write(value.clone());
        self.dirty = true;
        self.notifier.notify(&ChangeEvent::ValueChanged {
            key: self.key().to_string(),
            index: self.index(),
            value,
        });
    }

    /// Restore the seed value and clear the dirty flag.
    pub fn reset(&mut self) {
        self.write(self.default_value());
        self.dirty = false;
        self.notifier.notify(&ChangeEvent::Reset {
            key: Some(self.key().to_string()),
        });
    }

    /// Clear the dirty flag.
    pub fn mark_pristine(&mut self) {
        self.dirty = false;
    }

    /// Store a value and re-evaluate without notifying.
    pub(crate) fn write(&mut self, value: Value) {
        self.failures = self
            .compiled
            .rules
            .evaluate(&value, self.compiled.kind.as_ref());
        self.slot.set(value);
    }
}
