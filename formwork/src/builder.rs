//! Wiring of registries, rules and messages into controllers.

use std::sync::Arc;

use crate::config::FormConfig;
use crate::definition::{FieldDefinition, FormDefinition};
use crate::error::{DefinitionError, Result};
use crate::field::{CompiledField, FieldController};
use crate::form::Form;
use crate::messages::MessageResolver;
use crate::notify::ChangeNotifier;
use crate::registry::{ComponentFactory, ComponentRegistry};
use crate::repeater::RepeaterController;
use crate::validation::{CustomRules, RuleSet};
use crate::value::Value;

/// Builds controllers and forms from definitions.
///
/// # Example
///
/// ```
/// use formwork::definition::{FieldDefinition, FormDefinition, ValidationRuleSet};
/// use formwork::{FormBuilder, Value};
///
/// let definition = FormDefinition::new()
///     .component(
///         FieldDefinition::new("name", "textfield")
///             .label("Name")
///             .validate(ValidationRuleSet::new().required(true).custom("no_spaces")),
///     );
///
/// let mut form = FormBuilder::new()
///     .custom_rule("no_spaces", |v: &Value| !v.to_string().contains(' '))
///     .message("no_spaces", "{label} must not contain spaces")
///     .build(&definition)
///     .unwrap();
///
/// assert_eq!(form.errors(), vec!["Name is required"]);
/// form.field_mut("name").unwrap().set_value("Joe Smith");
/// assert_eq!(form.errors(), vec!["Name must not contain spaces"]);
/// ```
pub struct FormBuilder {
    config: FormConfig,
    registry: ComponentRegistry,
    customs: CustomRules,
    resolver: Option<Arc<dyn MessageResolver>>,
}

impl FormBuilder {
    /// Builder with the built-in components and default configuration.
    pub fn new() -> Self {
        Self {
            config: FormConfig::default(),
            registry: ComponentRegistry::with_builtins(),
            customs: CustomRules::new(),
            resolver: None,
        }
    }

    pub fn config(mut self, config: FormConfig) -> Self {
        self.config = config;
        self
    }

    /// Override one message template.
    pub fn message(mut self, rule_id: impl Into<String>, template: impl Into<String>) -> Self {
        self.config.messages.insert(rule_id.into(), template.into());
        self
    }

    pub fn registry(mut self, registry: ComponentRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Register a component type.
    pub fn component(mut self, tag: impl Into<String>, factory: ComponentFactory) -> Self {
        self.registry.register(tag, factory);
        self
    }

    pub fn custom_rules(mut self, customs: CustomRules) -> Self {
        self.customs = customs;
        self
    }

    /// Register a predicate for the `custom` rule.
    pub fn custom_rule<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.customs.register(name, predicate);
        self
    }

    /// Replace the template resolver entirely. Message overrides from the
    /// config are ignored when a resolver is set.
    pub fn resolver(mut self, resolver: Arc<dyn MessageResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    fn message_resolver(&self) -> Arc<dyn MessageResolver> {
        match &self.resolver {
            Some(resolver) => Arc::clone(resolver),
            None => Arc::new(self.config.resolver()),
        }
    }

    fn compile(
        &self,
        definition: FieldDefinition,
        resolver: &Arc<dyn MessageResolver>,
    ) -> Result<Arc<CompiledField>> {
        if definition.key.trim().is_empty() {
            return Err(DefinitionError::EmptyKey.into());
        }

        let kind = self.registry.create(&definition)?;
        let rules = match &definition.validate {
            Some(validate) => RuleSet::compile(&definition.key, validate, &self.customs)?,
            None => RuleSet::empty(),
        };
        log::debug!(
            "compiled field '{}' ({}{})",
            definition.key,
            definition.component_type,
            if definition.multiple { ", multiple" } else { "" }
        );

        Ok(Arc::new(CompiledField {
            definition,
            kind,
            rules,
            resolver: Arc::clone(resolver),
            reporting: self.config.error_reporting,
        }))
    }

    /// Build a single-control field.
    pub fn field(&self, definition: FieldDefinition) -> Result<FieldController> {
        let compiled = self.compile(definition, &self.message_resolver())?;
        Ok(FieldController::single(compiled, ChangeNotifier::new()))
    }

    /// Build a repeatable field, whatever its `multiple` flag says.
    pub fn repeater(&self, definition: FieldDefinition) -> Result<RepeaterController> {
        let compiled = self.compile(definition, &self.message_resolver())?;
        Ok(RepeaterController::create(compiled, ChangeNotifier::new()))
    }

    /// Build a form from all components of a definition.
    pub fn build(&self, definition: &FormDefinition) -> Result<Form> {
        let resolver = self.message_resolver();
        let mut form = Form::new(ChangeNotifier::new());
        for component in &definition.components {
            form.push(self.compile(component.clone(), &resolver)?)?;
        }
        Ok(form)
    }

    /// Build an empty form to be filled with [`add`](Self::add).
    pub fn empty_form(&self) -> Form {
        Form::new(ChangeNotifier::new())
    }

    /// Add one field to an existing form.
    pub fn add(&self, form: &mut Form, definition: FieldDefinition) -> Result<()> {
        form.push(self.compile(definition, &self.message_resolver())?)
    }
}

impl Default for FormBuilder {
    fn default() -> Self {
        Self::new()
    }
}
