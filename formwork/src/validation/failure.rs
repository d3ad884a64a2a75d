/// One failed rule, with the parameters its message needs.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleFailure {
    /// The value is empty but the field is required.
    Required,
    /// Shorter than `minLength`.
    MinLength {
        required_length: usize,
        actual_length: usize,
    },
    /// Longer than `maxLength`.
    MaxLength {
        required_length: usize,
        actual_length: usize,
    },
    /// Does not fully match the pattern.
    Pattern {
        required_pattern: String,
        actual_value: String,
    },
    /// Number below `min`.
    Min { min: f64, actual: f64 },
    /// Number above `max`.
    Max { max: f64, actual: f64 },
    /// Not a valid email address.
    Email,
    /// Not a number, for numeric components.
    Number,
    /// A custom predicate rejected the value. The rule id is its name.
    Custom { name: String },
}

impl RuleFailure {
    /// Rule identifier used to look up the message template.
    pub fn id(&self) -> &str {
        match self {
            RuleFailure::Required => "required",
            RuleFailure::MinLength { .. } => "minlength",
            RuleFailure::MaxLength { .. } => "maxlength",
            RuleFailure::Pattern { .. } => "pattern",
            RuleFailure::Min { .. } => "min",
            RuleFailure::Max { .. } => "max",
            RuleFailure::Email => "email",
            RuleFailure::Number => "number",
            RuleFailure::Custom { name } => name,
        }
    }

    /// Named parameters for message substitution.
    pub fn params(&self) -> RuleParams {
        let mut params = RuleParams::new();
        match self {
            RuleFailure::Required
            | RuleFailure::Email
            | RuleFailure::Number
            | RuleFailure::Custom { .. } => {}
            RuleFailure::MinLength {
                required_length,
                actual_length,
            }
            | RuleFailure::MaxLength {
                required_length,
                actual_length,
            } => {
                params.insert("requiredLength", required_length);
                params.insert("actualLength", actual_length);
            }
            RuleFailure::Pattern {
                required_pattern,
                actual_value,
            } => {
                params.insert("requiredPattern", required_pattern);
                params.insert("actualValue", actual_value);
            }
            RuleFailure::Min { min, actual } => {
                params.insert("min", min);
                params.insert("actual", actual);
            }
            RuleFailure::Max { max, actual } => {
                params.insert("max", max);
                params.insert("actual", actual);
            }
        }
        params
    }
}

/// Ordered name/value pairs describing a failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleParams {
    entries: Vec<(String, String)>,
}

impl RuleParams {
    /// Create empty parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl ToString) {
        self.entries.push((name.into(), value.to_string()));
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.insert(name, value);
        self
    }

    /// Value of a parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
