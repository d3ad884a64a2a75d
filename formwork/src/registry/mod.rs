//! Component type registry.
//!
//! Each field definition names a component type (`"textarea"`, `"email"`,
//! ...). The registry maps that tag to a factory producing the
//! [`ComponentKind`] that gives the field its type-specific behaviour.
//! Built-in kinds register themselves through `inventory`.

pub mod builtin;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::definition::FieldDefinition;
use crate::error::DefinitionError;
use crate::validation::RuleFailure;
use crate::value::Value;

/// Type-specific behaviour of a field.
pub trait ComponentKind: Send + Sync + fmt::Debug {
    /// Value of a control that was given no default.
    fn empty_value(&self) -> Value {
        Value::Null
    }

    /// Whether `value` counts as "no value" for the `required` rule.
    fn is_empty(&self, value: &Value) -> bool {
        value.is_empty()
    }

    /// Convert raw input into the value stored by the control.
    fn normalize(&self, value: Value) -> Value {
        value
    }

    /// Rule built into the type itself, checked after the declared rules
    /// and before `custom`. Only called for non-empty values.
    fn check(&self, _value: &Value) -> Option<RuleFailure> {
        None
    }
}

/// Factory producing the kind for a definition.
pub type ComponentFactory = fn(&FieldDefinition) -> Box<dyn ComponentKind>;

/// Component registration entry for inventory
pub struct ComponentRegistration {
    /// Type tag as used in definitions
    pub tag: &'static str,
    /// Factory function to create the kind
    pub factory: ComponentFactory,
}

impl ComponentRegistration {
    /// Create a new component registration
    pub const fn new(tag: &'static str, factory: ComponentFactory) -> Self {
        Self { tag, factory }
    }
}

// Collect all registered components
inventory::collect!(ComponentRegistration);

/// Get all registered components
pub fn registered_components() -> impl Iterator<Item = &'static ComponentRegistration> {
    inventory::iter::<ComponentRegistration>()
}

/// Lookup table from type tag to factory.
#[derive(Clone)]
pub struct ComponentRegistry {
    factories: HashMap<String, ComponentFactory>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Create a registry holding every inventory-registered component.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for registration in registered_components() {
            registry.register(registration.tag, registration.factory);
        }
        log::debug!("component registry loaded {} type(s)", registry.len());
        registry
    }

    /// Register a factory, replacing any previous one for the tag.
    pub fn register(&mut self, tag: impl Into<String>, factory: ComponentFactory) {
        self.factories.insert(tag.into(), factory);
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<_> = self.factories.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Instantiate the kind for a definition.
    pub fn create(
        &self,
        definition: &FieldDefinition,
    ) -> Result<Arc<dyn ComponentKind>, DefinitionError> {
        let factory = self
            .factories
            .get(&definition.component_type)
            .ok_or_else(|| DefinitionError::UnknownComponentType {
                key: definition.key.clone(),
                component_type: definition.component_type.clone(),
            })?;
        Ok(Arc::from(factory(definition)))
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}
