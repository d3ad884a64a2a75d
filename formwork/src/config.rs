//! Engine configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::messages::Messages;

/// How many messages a control reports when several rules fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorReporting {
    /// Only the first failure, in rule-evaluation order (default).
    #[default]
    FirstFailure,
    /// Every failure, in rule-evaluation order.
    All,
}

/// Configuration shared by every controller a
/// [`FormBuilder`](crate::FormBuilder) creates.
///
/// # Example
///
/// ```
/// use formwork::config::{ErrorReporting, FormConfig};
///
/// let config = FormConfig::new()
///     .error_reporting(ErrorReporting::All)
///     .message("required", "Please fill in {label}");
/// assert_eq!(config.messages["required"], "Please fill in {label}");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormConfig {
    /// Message reporting mode.
    pub error_reporting: ErrorReporting,

    /// Message templates by rule id, overriding the defaults.
    pub messages: HashMap<String, String>,
}

impl FormConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error_reporting(mut self, reporting: ErrorReporting) -> Self {
        self.error_reporting = reporting;
        self
    }

    /// Override the message template for a rule id.
    pub fn message(mut self, rule_id: impl Into<String>, template: impl Into<String>) -> Self {
        self.messages.insert(rule_id.into(), template.into());
        self
    }

    /// Default messages with this config's overrides applied.
    pub fn resolver(&self) -> Messages {
        Messages::default().with_overrides(self.messages.clone())
    }
}
