//! Built-in component kinds.

use super::{ComponentKind, ComponentRegistration};
use crate::definition::FieldDefinition;
use crate::validation::RuleFailure;
use crate::value::Value;

/// Free text: textfield, textarea, password, hidden, phoneNumber.
#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

impl ComponentKind for Text {
    fn empty_value(&self) -> Value {
        Value::String(String::new())
    }
}

/// Text that must be an email address.
#[derive(Debug, Clone, Copy, Default)]
pub struct Email;

impl ComponentKind for Email {
    fn empty_value(&self) -> Value {
        Value::String(String::new())
    }

    fn check(&self, value: &Value) -> Option<RuleFailure> {
        match value.as_str() {
            Some(s) if !email_address::EmailAddress::is_valid(s) => Some(RuleFailure::Email),
            _ => None,
        }
    }
}

/// Numeric input. Text is parsed on the way in; blank text becomes null.
#[derive(Debug, Clone, Copy, Default)]
pub struct Number;

impl ComponentKind for Number {
    fn normalize(&self, value: Value) -> Value {
        match value {
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Value::Null
                } else {
                    trimmed.parse::<f64>().map(Value::Number).unwrap_or(Value::String(s))
                }
            }
            other => other,
        }
    }

    fn check(&self, value: &Value) -> Option<RuleFailure> {
        match value {
            Value::Number(n) if n.is_finite() => None,
            _ => Some(RuleFailure::Number),
        }
    }
}

/// A single checkbox. Unchecked counts as empty for `required`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Checkbox;

impl ComponentKind for Checkbox {
    fn empty_value(&self) -> Value {
        Value::Bool(false)
    }

    fn is_empty(&self, value: &Value) -> bool {
        matches!(value, Value::Null | Value::Bool(false))
    }

    fn normalize(&self, value: Value) -> Value {
        match value {
            Value::String(s) => match s.as_str() {
                "true" | "on" | "1" => Value::Bool(true),
                "false" | "off" | "0" | "" => Value::Bool(false),
                _ => Value::String(s),
            },
            Value::Number(n) => Value::Bool(n != 0.0),
            other => other,
        }
    }
}

fn text(_: &FieldDefinition) -> Box<dyn ComponentKind> {
    Box::new(Text)
}

fn email(_: &FieldDefinition) -> Box<dyn ComponentKind> {
    Box::new(Email)
}

fn number(_: &FieldDefinition) -> Box<dyn ComponentKind> {
    Box::new(Number)
}

fn checkbox(_: &FieldDefinition) -> Box<dyn ComponentKind> {
    Box::new(Checkbox)
}

inventory::submit! { ComponentRegistration::new("textfield", text) }
inventory::submit! { ComponentRegistration::new("textarea", text) }
inventory::submit! { ComponentRegistration::new("password", text) }
inventory::submit! { ComponentRegistration::new("hidden", text) }
inventory::submit! { ComponentRegistration::new("phoneNumber", text) }
inventory::submit! { ComponentRegistration::new("email", email) }
inventory::submit! { ComponentRegistration::new("number", number) }
inventory::submit! { ComponentRegistration::new("checkbox", checkbox) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_normalize() {
        assert_eq!(Number.normalize(Value::from("12.5")), Value::Number(12.5));
        assert_eq!(Number.normalize(Value::from("  ")), Value::Null);
        assert_eq!(Number.normalize(Value::from("abc")), Value::from("abc"));
        assert_eq!(Number.check(&Value::from("abc")), Some(RuleFailure::Number));
        assert_eq!(Number.check(&Value::from(3)), None);
    }

    #[test]
    fn test_checkbox_emptiness() {
        assert!(Checkbox.is_empty(&Value::Bool(false)));
        assert!(!Checkbox.is_empty(&Value::Bool(true)));
        assert_eq!(Checkbox.normalize(Value::from("on")), Value::Bool(true));
    }

    #[test]
    fn test_email_check() {
        assert_eq!(Email.check(&Value::from("joe@example.com")), None);
        assert_eq!(Email.check(&Value::from("joe")), Some(RuleFailure::Email));
    }
}
