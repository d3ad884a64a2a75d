//! Human-readable validation messages.

use std::collections::HashMap;

use crate::validation::{RuleFailure, RuleParams};

/// Template used when no template is known for a rule id.
pub const FALLBACK_TEMPLATE: &str = "{label} is invalid";

/// Maps a failed rule to a user-facing message.
pub trait MessageResolver: Send + Sync {
    /// Produce the message for `rule_id` with its failure parameters.
    /// Must never return an empty string.
    fn resolve(&self, rule_id: &str, params: &RuleParams, label: &str) -> String;

    /// Resolve a [`RuleFailure`] directly.
    fn resolve_failure(&self, failure: &RuleFailure, label: &str) -> String {
        self.resolve(failure.id(), &failure.params(), label)
    }
}

/// Template-based resolver.
///
/// Templates reference `{label}` and any failure parameter by name, e.g.
/// `"{label} must be at least {requiredLength} characters"`.
///
/// # Example
///
/// ```
/// use formwork::messages::{MessageResolver, Messages};
/// use formwork::validation::RuleParams;
///
/// let messages = Messages::default();
/// let params = RuleParams::new().with("requiredLength", 2).with("actualLength", 1);
/// assert_eq!(
///     messages.resolve("minlength", &params, "Textarea"),
///     "Textarea must be at least 2 characters"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Messages {
    templates: HashMap<String, String>,
    fallback: String,
}

impl Default for Messages {
    fn default() -> Self {
        let templates = [
            ("required", "{label} is required"),
            ("minlength", "{label} must be at least {requiredLength} characters"),
            ("maxlength", "{label} cannot be more than {requiredLength} characters"),
            ("pattern", "{label} does not match the pattern {requiredPattern}"),
            ("min", "{label} cannot be less than {min}"),
            ("max", "{label} cannot be greater than {max}"),
            ("email", "{label} must be a valid email"),
            ("number", "{label} must be a number"),
        ]
        .into_iter()
        .map(|(id, t)| (id.to_string(), t.to_string()))
        .collect();

        Self {
            templates,
            fallback: FALLBACK_TEMPLATE.to_string(),
        }
    }
}

impl Messages {
    /// Resolver with no templates; every rule uses the fallback.
    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
            fallback: FALLBACK_TEMPLATE.to_string(),
        }
    }

    /// Set the template for a rule id.
    pub fn with_template(mut self, rule_id: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(rule_id.into(), template.into());
        self
    }

    /// Apply several template overrides.
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (id, template) in overrides {
            self.templates.insert(id.into(), template.into());
        }
        self
    }

    /// Set the template used for unrecognized rule ids.
    pub fn with_fallback(mut self, template: impl Into<String>) -> Self {
        self.fallback = template.into();
        self
    }

    pub fn template(&self, rule_id: &str) -> Option<&str> {
        self.templates.get(rule_id).map(String::as_str)
    }
}

impl MessageResolver for Messages {
    fn resolve(&self, rule_id: &str, params: &RuleParams, label: &str) -> String {
        let template = self.template(rule_id).unwrap_or_else(|| {
            log::trace!("no message template for rule '{}', using fallback", rule_id);
            self.fallback.as_str()
        });

        let message = substitute(template, params, label);
        let message = message.trim();
        if message.is_empty() {
            substitute(FALLBACK_TEMPLATE, params, label).trim().to_string()
        } else {
            message.to_string()
        }
    }
}

/// Replace `{label}` and `{param}` placeholders. Unknown placeholders are
/// left as written.
fn substitute(template: &str, params: &RuleParams, label: &str) -> String {
    let mut out = String::with_capacity(template.len() + label.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = &after[..end];
        let replacement = if name == "label" {
            Some(label)
        } else {
            params.get(name)
        };
        match replacement {
            Some(value) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute() {
        let params = RuleParams::new().with("n", 3);
        assert_eq!(substitute("{label} has {n}", &params, "X"), "X has 3");
        assert_eq!(substitute("{other} stays", &params, "X"), "{other} stays");
        assert_eq!(substitute("open { brace", &params, "X"), "open { brace");
        assert_eq!(substitute("no placeholders", &params, "X"), "no placeholders");
    }

    #[test]
    fn test_empty_label_degrades() {
        let messages = Messages::default();
        assert_eq!(
            messages.resolve("required", &RuleParams::new(), ""),
            "is required"
        );
    }

    #[test]
    fn test_blank_template_falls_back() {
        let messages = Messages::default().with_template("required", "{label}");
        assert_eq!(
            messages.resolve("required", &RuleParams::new(), ""),
            "is invalid"
        );
    }
}
