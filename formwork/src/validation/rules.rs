//! Compiled validation rules.

use std::fmt;

use regex::Regex;

use super::custom::{CustomPredicate, CustomRules};
use super::failure::RuleFailure;
use crate::definition::ValidationRuleSet;
use crate::error::DefinitionError;
use crate::registry::ComponentKind;
use crate::value::Value;

struct CustomRule {
    name: String,
    predicate: CustomPredicate,
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRule").field("name", &self.name).finish()
    }
}

/// A [`ValidationRuleSet`] checked and compiled once per definition.
///
/// Evaluation order is fixed: required, minLength, maxLength, pattern,
/// min, max, component rules, custom. An empty value is only checked by
/// `required` and `custom`.
#[derive(Debug, Default)]
pub struct RuleSet {
    required: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<(String, Regex)>,
    min: Option<f64>,
    max: Option<f64>,
    custom: Option<CustomRule>,
}

impl RuleSet {
    /// A rule set that accepts everything.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile declarative rules for the field `key`.
    pub fn compile(
        key: &str,
        rules: &ValidationRuleSet,
        customs: &CustomRules,
    ) -> Result<Self, DefinitionError> {
        let min_length = length(key, "minLength", rules.min_length)?;
        let max_length = length(key, "maxLength", rules.max_length)?;
        if let (Some(min), Some(max)) = (min_length, max_length) {
            if min > max {
                return Err(DefinitionError::ConflictingLengths {
                    key: key.to_string(),
                    min,
                    max,
                });
            }
        }

        if let (Some(min), Some(max)) = (rules.min, rules.max) {
            if min > max {
                return Err(DefinitionError::ConflictingBounds {
                    key: key.to_string(),
                    min,
                    max,
                });
            }
        }

        let pattern = match rules.pattern.as_deref() {
            Some(p) if !p.is_empty() => {
                let re = Regex::new(&format!("^(?:{})$", p)).map_err(|source| {
                    DefinitionError::InvalidPattern {
                        key: key.to_string(),
                        pattern: p.to_string(),
                        source,
                    }
                })?;
                Some((p.to_string(), re))
            }
            _ => None,
        };

        let custom = match rules.custom.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {
                if rules.custom_private {
                    log::debug!("field '{}': skipping private custom rule '{}'", key, name);
                    None
                } else {
                    let predicate =
                        customs
                            .get(name)
                            .ok_or_else(|| DefinitionError::UnknownCustomRule {
                                key: key.to_string(),
                                name: name.to_string(),
                            })?;
                    Some(CustomRule {
                        name: name.to_string(),
                        predicate,
                    })
                }
            }
            _ => None,
        };

        Ok(Self {
            required: rules.required,
            min_length,
            max_length,
            pattern,
            min: rules.min,
            max: rules.max,
            custom,
        })
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Evaluate every rule against `value`, in evaluation order.
    pub fn evaluate(&self, value: &Value, kind: &dyn ComponentKind) -> Vec<RuleFailure> {
        let mut failures = Vec::new();

        if kind.is_empty(value) {
            if self.required {
                failures.push(RuleFailure::Required);
            }
        } else {
            if let Some(len) = value.char_len() {
                if let Some(min) = self.min_length.filter(|&min| len < min) {
                    failures.push(RuleFailure::MinLength {
                        required_length: min,
                        actual_length: len,
                    });
                }
                if let Some(max) = self.max_length.filter(|&max| len > max) {
                    failures.push(RuleFailure::MaxLength {
                        required_length: max,
                        actual_length: len,
                    });
                }
            }

            if let Some((source, re)) = &self.pattern {
                let text = value.to_string();
                if !re.is_match(&text) {
                    failures.push(RuleFailure::Pattern {
                        required_pattern: source.clone(),
                        actual_value: text,
                    });
                }
            }

            if let Some(actual) = value.as_f64() {
                if let Some(min) = self.min.filter(|&min| actual < min) {
                    failures.push(RuleFailure::Min { min, actual });
                }
                if let Some(max) = self.max.filter(|&max| actual > max) {
                    failures.push(RuleFailure::Max { max, actual });
                }
            }

            failures.extend(kind.check(value));
        }

        if let Some(custom) = &self.custom {
            if !(custom.predicate)(value) {
                failures.push(RuleFailure::Custom {
                    name: custom.name.clone(),
                });
            }
        }

        failures
    }
}

fn length(key: &str, rule: &'static str, value: Option<i64>) -> Result<Option<usize>, DefinitionError> {
    match value {
        None => Ok(None),
        Some(n) => usize::try_from(n)
            .map(Some)
            .map_err(|_| DefinitionError::NegativeLength {
                key: key.to_string(),
                rule,
                value: n,
            }),
    }
}
