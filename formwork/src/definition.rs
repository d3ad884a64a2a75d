//! Declarative field definitions.
//!
//! Definitions use the camelCase JSON shape of form builders:
//!
//! ```json
//! {
//!   "type": "textarea",
//!   "key": "textarea",
//!   "label": "Textarea",
//!   "multiple": false,
//!   "validate": { "required": true, "minLength": 2, "maxLength": 10, "pattern": "" }
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use crate::value::Value;

fn default_component_type() -> String {
    "textfield".to_string()
}

/// Immutable description of one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Unique identifier within a form.
    pub key: String,
    /// Component type tag, looked up in the
    /// [`ComponentRegistry`](crate::registry::ComponentRegistry).
    #[serde(rename = "type", default = "default_component_type")]
    pub component_type: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    /// Initial value of the first control.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Whether the field is repeatable.
    #[serde(default)]
    pub multiple: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate: Option<ValidationRuleSet>,
}

impl FieldDefinition {
    /// Create a definition with the given key and component type.
    pub fn new(key: impl Into<String>, component_type: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            component_type: component_type.into(),
            label: String::new(),
            placeholder: String::new(),
            prefix: String::new(),
            suffix: String::new(),
            default_value: None,
            multiple: false,
            validate: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn validate(mut self, rules: ValidationRuleSet) -> Self {
        self.validate = Some(rules);
        self
    }

    /// Whether the definition requires a value.
    pub fn is_required(&self) -> bool {
        self.validate.as_ref().is_some_and(|v| v.required)
    }
}

/// Declarative validation constraints. Every rule is optional; an absent
/// rule is not enforced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRuleSet {
    #[serde(default)]
    pub required: bool,
    #[serde(default, deserialize_with = "lenient_length")]
    pub min_length: Option<i64>,
    #[serde(default, deserialize_with = "lenient_length")]
    pub max_length: Option<i64>,
    /// Regular expression the whole value must match. Empty means none.
    #[serde(default)]
    pub pattern: Option<String>,
    /// Lower bound for numeric values.
    #[serde(default)]
    pub min: Option<f64>,
    /// Upper bound for numeric values.
    #[serde(default)]
    pub max: Option<f64>,
    /// Name of a registered custom predicate. Empty means none.
    #[serde(default)]
    pub custom: Option<String>,
    /// Custom validation runs elsewhere (server side) and is skipped here.
    #[serde(default)]
    pub custom_private: bool,
}

impl ValidationRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn min_length(mut self, n: i64) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: i64) -> Self {
        self.max_length = Some(n);
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn custom(mut self, name: impl Into<String>) -> Self {
        self.custom = Some(name.into());
        self
    }

    pub fn custom_private(mut self, private: bool) -> Self {
        self.custom_private = private;
        self
    }
}

/// Accepts an integer, `null` or `""` (form builders emit an empty string
/// for lengths that were never filled in).
fn lenient_length<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Length {
        Int(i64),
        Text(String),
    }

    match Option::<Length>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Length::Int(n)) => Ok(Some(n)),
        Some(Length::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Length::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid length '{}'", s))),
    }
}

/// A whole form: top-level fields in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    #[serde(default)]
    pub components: Vec<FieldDefinition>,
}

impl FormDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn component(mut self, definition: FieldDefinition) -> Self {
        self.components.push(definition);
        self
    }
}
