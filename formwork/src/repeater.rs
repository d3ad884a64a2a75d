//! Controller for repeatable fields.

use std::sync::Arc;

use crate::FormBuilder;
use crate::container::ValueArray;
use crate::control::FieldView;
use crate::definition::FieldDefinition;
use crate::error::{Result, StructureError};
use crate::field::{CompiledField, FieldController, label_for};
use crate::notify::{ChangeEvent, ChangeNotifier, ListenerId};
use crate::value::Value;

/// Ordered list of sibling controls for a field declared `multiple`.
///
/// Every control is backed by one slot of a [`ValueArray`]; both always
/// have the same length. Only the control at index 0 shows the
/// definition's label.
///
/// # Example
///
/// ```
/// use formwork::definition::FieldDefinition;
/// use formwork::RepeaterController;
///
/// let definition = FieldDefinition::new("names", "textfield")
///     .label("Names")
///     .multiple(true);
/// let mut names = RepeaterController::new(definition).unwrap();
/// names.add_component();
///
/// assert_eq!(names.len(), 2);
/// assert_eq!(names.labels(), vec!["Names", ""]);
/// ```
#[derive(Debug)]
pub struct RepeaterController {
    compiled: Arc<CompiledField>,
    items: Vec<FieldController>,
    container: ValueArray,
    notifier: ChangeNotifier,
}

impl RepeaterController {
    /// Build a standalone repeater with the default [`FormBuilder`].
    pub fn new(definition: FieldDefinition) -> Result<Self> {
        FormBuilder::new().repeater(definition)
    }

    /// Seeds one control holding the definition's default value.
    pub(crate) fn create(compiled: Arc<CompiledField>, notifier: ChangeNotifier) -> Self {
        let mut repeater = Self {
            compiled,
            items: Vec::new(),
            container: ValueArray::new(),
            notifier,
        };
        let value = repeater.compiled.default_value();
        repeater.insert_item(0, value);
        repeater
    }

    fn insert_item(&mut self, index: usize, value: Value) {
        let item = FieldController::item(
            Arc::clone(&self.compiled),
            value,
            self.container.clone(),
            self.notifier.clone(),
        );
        self.container.insert(index, item.slot().clone());
        self.items.insert(index, item);
        debug_assert_eq!(self.items.len(), self.container.len());
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// Field key from the definition.
    pub fn key(&self) -> &str {
        &self.compiled.definition.key
    }

    /// Definition every control was built from.
    pub fn definition(&self) -> &FieldDefinition {
        &self.compiled.definition
    }

    /// Number of controls.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether every control was removed.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Control at `index`.
    pub fn at(&self, index: usize) -> Option<&FieldController> {
        self.items.get(index)
    }

    /// Mutable access to one control, e.g. to call
    /// [`set_value`](FieldController::set_value).
    pub fn at_mut(&mut self, index: usize) -> Option<&mut FieldController> {
        self.items.get_mut(index)
    }

    /// Iterate over the controls in order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldController> {
        self.items.iter()
    }

    /// The value container backing the controls.
    pub fn container(&self) -> &ValueArray {
        &self.container
    }

    /// Label of every control, in order.
    pub fn labels(&self) -> Vec<&str> {
        (0..self.items.len())
            .map(|i| label_for(i, &self.compiled.definition))
            .collect()
    }

    /// Value of every control, in order.
    pub fn values(&self) -> Vec<Value> {
        self.container.values()
    }

    /// Messages of every control, flattened in item order.
    pub fn errors(&self) -> Vec<String> {
        let definition = &self.compiled.definition;
        self.items
            .iter()
            .enumerate()
            .flat_map(|(i, item)| item.errors_labelled(label_for(i, definition)))
            .collect()
    }

    /// Whether every control is valid.
    pub fn is_valid(&self) -> bool {
        self.items.iter().all(FieldController::is_valid)
    }

    /// Whether any control was written.
    pub fn is_dirty(&self) -> bool {
        self.items.iter().any(FieldController::is_dirty)
    }

    /// Render snapshot of every control, in order.
    pub fn views(&self) -> Vec<FieldView> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| item.view_at(Some(i)))
            .collect()
    }

    /// The notifier every control of this field reports to.
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Register a change listener for every control of this field.
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
    // Structural mutation
    // -------------------------------------------------------------------------

    /// Append an empty control and return it.
    pub fn add_component(&mut self) -> &mut FieldController {
        let index = self.items.len();
        self.insert_empty(index);
        &mut self.items[index]
    }

    /// Insert an empty control at `index` (`0..=len`).
    pub fn insert_at(&mut self, index: usize) -> Result<&mut FieldController> {
        if index > self.items.len() {
            return Err(StructureError::out_of_range(self.key(), index, self.items.len()).into());
        }
        self.insert_empty(index);
        Ok(&mut self.items[index])
    }

    fn insert_empty(&mut self, index: usize) {
        let value = self.compiled.kind.empty_value();
        self.insert_item(index, value);
        log::debug!(
            "field '{}': added item at {} ({} total)",
            self.key(),
            index,
            self.items.len()
        );
        self.notifier.notify(&ChangeEvent::ItemAdded {
            key: self.key().to_string(),
            index,
        });
    }

    /// Remove the control at `index` together with its value slot.
    pub fn remove_at(&mut self, index: usize) -> Result<()> {
        if index >= self.items.len() {
            return Err(StructureError::out_of_range(self.key(), index, self.items.len()).into());
        }
        self.detach(index);
        Ok(())
    }

    /// Remove an in-bounds control and its slot, then notify.
    fn detach(&mut self, index: usize) {
        self.container.remove(index);
        self.items.remove(index);
        debug_assert_eq!(self.items.len(), self.container.len());

        log::debug!(
            "field '{}': removed item {} ({} left)",
            self.key(),
            index,
            self.items.len()
        );
        self.notifier.notify(&ChangeEvent::ItemRemoved {
            key: self.key().to_string(),
            index,
        });
    }

    /// Add or remove controls at the end until there are `len`.
    pub fn resize(&mut self, len: usize) {
        while self.items.len() < len {
            self.add_component();
        }
        while self.items.len() > len {
            self.detach(self.items.len() - 1);
        }
    }

    /// Back to a single control holding the default value.
    pub fn reset(&mut self) {
        self.items.clear();
        while !self.container.is_empty() {
            self.container.remove(0);
        }
        let value = self.compiled.default_value();
        self.insert_item(0, value);
        self.notifier.notify(&ChangeEvent::Reset {
            key: Some(self.key().to_string()),
        });
    }
}
