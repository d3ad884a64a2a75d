//! The composite form: all top-level fields of a definition.

use std::sync::Arc;

use crate::definition::FieldDefinition;
use crate::error::{DefinitionError, Result, StructureError};
use crate::field::{CompiledField, FieldController};
use crate::notify::{ChangeEvent, ChangeNotifier, ListenerId};
use crate::repeater::RepeaterController;
use crate::value::{FieldValue, FormValue};

/// One top-level entry of a form.
#[derive(Debug)]
pub enum FormNode {
    Field(FieldController),
    Repeater(RepeaterController),
}

impl FormNode {
    pub(crate) fn create(compiled: Arc<CompiledField>, notifier: ChangeNotifier) -> Self {
        if compiled.definition.multiple {
            FormNode::Repeater(RepeaterController::create(compiled, notifier))
        } else {
            FormNode::Field(FieldController::single(compiled, notifier))
        }
    }

    /// Field key from the definition.
    pub fn key(&self) -> &str {
        match self {
            FormNode::Field(f) => f.key(),
            FormNode::Repeater(r) => r.key(),
        }
    }

    pub fn definition(&self) -> &FieldDefinition {
        match self {
            FormNode::Field(f) => f.definition(),
            FormNode::Repeater(r) => r.definition(),
        }
    }

    /// Messages of the field or of every item.
    pub fn errors(&self) -> Vec<String> {
        match self {
            FormNode::Field(f) => f.errors(),
            FormNode::Repeater(r) => r.errors(),
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            FormNode::Field(f) => f.is_valid(),
            FormNode::Repeater(r) => r.is_valid(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        match self {
            FormNode::Field(f) => f.is_dirty(),
            FormNode::Repeater(r) => r.is_dirty(),
        }
    }

    /// Scalar for a single field, list for a repeatable one.
    pub fn value(&self) -> FieldValue {
        match self {
            FormNode::Field(f) => FieldValue::Scalar(f.value()),
            FormNode::Repeater(r) => FieldValue::List(r.values()),
        }
    }

    /// The single field, if this is one.
    pub fn as_field(&self) -> Option<&FieldController> {
        match self {
            FormNode::Field(f) => Some(f),
            FormNode::Repeater(_) => None,
        }
    }

    pub fn as_field_mut(&mut self) -> Option<&mut FieldController> {
        match self {
            FormNode::Field(f) => Some(f),
            FormNode::Repeater(_) => None,
        }
    }

    /// The repeatable field, if this is one.
    pub fn as_repeater(&self) -> Option<&RepeaterController> {
        match self {
            FormNode::Repeater(r) => Some(r),
            FormNode::Field(_) => None,
        }
    }

    pub fn as_repeater_mut(&mut self) -> Option<&mut RepeaterController> {
        match self {
            FormNode::Repeater(r) => Some(r),
            FormNode::Field(_) => None,
        }
    }

    fn reset(&mut self) {
        match self {
            FormNode::Field(f) => f.reset(),
            FormNode::Repeater(r) => r.reset(),
        }
    }

    fn mark_pristine(&mut self) {
        match self {
            FormNode::Field(f) => f.mark_pristine(),
            FormNode::Repeater(r) => {
                for i in 0..r.len() {
                    if let Some(item) = r.at_mut(i) {
                        item.mark_pristine();
                    }
                }
            }
        }
    }

    /// Check that `value` has the shape this node stores.
    fn accepts(&self, value: &FieldValue) -> std::result::Result<(), StructureError> {
        match (self, value) {
            (FormNode::Field(_), FieldValue::Scalar(_))
            | (FormNode::Repeater(_), FieldValue::List(_)) => Ok(()),
            (FormNode::Field(_), FieldValue::List(_)) => Err(StructureError::ShapeMismatch {
                key: self.key().to_string(),
                expected: "a single value",
            }),
            (FormNode::Repeater(_), FieldValue::Scalar(_)) => Err(StructureError::ShapeMismatch {
                key: self.key().to_string(),
                expected: "a list of values",
            }),
        }
    }

    fn apply(&mut self, value: &FieldValue) {
        match (self, value) {
            (FormNode::Field(f), FieldValue::Scalar(v)) => f.set_value(v.clone()),
            (FormNode::Repeater(r), FieldValue::List(values)) => {
                r.resize(values.len());
                for (i, v) in values.iter().enumerate() {
                    if let Some(item) = r.at_mut(i) {
                        item.set_value(v.clone());
                    }
                }
            }
            _ => {}
        }
    }
}

/// All top-level fields of a form, in declaration order.
///
/// Aggregates errors, validity and the current value of its children. The
/// value is rebuilt from the children on every call, never cached.
#[derive(Debug)]
pub struct Form {
    nodes: Vec<FormNode>,
    notifier: ChangeNotifier,
}

impl Form {
    pub(crate) fn new(notifier: ChangeNotifier) -> Self {
        Self {
            nodes: Vec::new(),
            notifier,
        }
    }

    pub(crate) fn push(&mut self, compiled: Arc<CompiledField>) -> Result<()> {
        let key = &compiled.definition.key;
        if self.get(key).is_some() {
            return Err(DefinitionError::DuplicateKey { key: key.clone() }.into());
        }
        log::debug!("form: added field '{}'", key);
        let node = FormNode::create(compiled, self.notifier.clone());
        self.nodes.push(node);
        Ok(())
    }

    /// The notifier every child reports to.
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Register a change listener for every field of the form.
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
    // Lookup
    // -------------------------------------------------------------------------

    /// Entry for a key.
    pub fn get(&self, key: &str) -> Option<&FormNode> {
        self.nodes.iter().find(|n| n.key() == key)
    }

    /// Mutable entry for a key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut FormNode> {
        self.nodes.iter_mut().find(|n| n.key() == key)
    }

    /// Single field for a key, `None` if missing or repeatable.
    pub fn field(&self, key: &str) -> Option<&FieldController> {
        self.get(key).and_then(FormNode::as_field)
    }

    /// Mutable single field for a key.
    pub fn field_mut(&mut self, key: &str) -> Option<&mut FieldController> {
        self.get_mut(key).and_then(FormNode::as_field_mut)
    }

    /// Repeatable field for a key, `None` if missing or single.
    pub fn repeater(&self, key: &str) -> Option<&RepeaterController> {
        self.get(key).and_then(FormNode::as_repeater)
    }

    /// Mutable repeatable field for a key.
    pub fn repeater_mut(&mut self, key: &str) -> Option<&mut RepeaterController> {
        self.get_mut(key).and_then(FormNode::as_repeater_mut)
    }

    /// Field keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(FormNode::key)
    }

    /// Entries in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &FormNode> {
        self.nodes.iter()
    }

    /// Number of top-level fields.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the form has no fields.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // -------------------------------------------------------------------------
    // Aggregates
    // -------------------------------------------------------------------------

    /// Every child's messages, concatenated in declaration order.
    pub fn errors(&self) -> Vec<String> {
        self.nodes.iter().flat_map(FormNode::errors).collect()
    }

    /// Whether every field is valid.
    pub fn is_valid(&self) -> bool {
        self.nodes.iter().all(FormNode::is_valid)
    }

    /// Whether any control was written.
    pub fn is_dirty(&self) -> bool {
        self.nodes.iter().any(FormNode::is_dirty)
    }

    /// Current value of every field, in declaration order.
    pub fn value(&self) -> FormValue {
        self.nodes
            .iter()
            .map(|n| (n.key().to_string(), n.value()))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Bulk mutation
    // -------------------------------------------------------------------------

    /// Write the entries of `value` into the matching fields.
    ///
    /// Repeatable fields are resized to the length of their list. Keys with
    /// no matching field are skipped. Fails without changing anything if an
    /// entry has the wrong shape for its field.
    pub fn patch_value(&mut self, value: &FormValue) -> Result<()> {
        for (key, v) in value.iter() {
            if let Some(node) = self.get(key) {
                node.accepts(v)?;
            }
        }

        for (key, v) in value.iter() {
            match self.get_mut(key) {
                Some(node) => node.apply(v),
                None => log::warn!("form: no field '{}', skipping value", key),
            }
        }
        Ok(())
    }

    /// Write a single field's value by key.
    pub fn set_value(&mut self, key: &str, value: impl Into<FieldValue>) -> Result<()> {
        let value = value.into();
        let node = self
            .get_mut(key)
            .ok_or_else(|| StructureError::UnknownField { key: key.to_string() })?;
        node.accepts(&value)?;
        node.apply(&value);
        Ok(())
    }

    /// Restore every field to its default.
    pub fn reset(&mut self) {
        for node in &mut self.nodes {
            node.reset();
        }
        self.notifier.notify(&ChangeEvent::Reset { key: None });
    }

    /// Clear the dirty flag of every control.
    pub fn mark_pristine(&mut self) {
        for node in &mut self.nodes {
            node.mark_pristine();
        }
    }
}
