//! Named predicates backing the `custom` rule.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// Type alias for custom rule predicates. `true` means the value is valid.
pub type CustomPredicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Registry of custom rule predicates, looked up by the name given in a
/// definition's `custom` setting.
///
/// # Example
///
/// ```
/// use formwork::validation::CustomRules;
/// use formwork::Value;
///
/// let mut rules = CustomRules::new();
/// rules.register("no_spaces", |v: &Value| !v.to_string().contains(' '));
/// assert!(rules.contains("no_spaces"));
/// ```
#[derive(Clone, Default)]
pub struct CustomRules {
    predicates: HashMap<String, CustomPredicate>,
}

impl CustomRules {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a predicate, replacing any previous one with the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F)
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.predicates.insert(name.into(), Arc::new(predicate));
    }

    /// Predicate registered under `name`.
    pub fn get(&self, name: &str) -> Option<CustomPredicate> {
        self.predicates.get(name).cloned()
    }

    /// Whether a predicate is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }
}

impl fmt::Debug for CustomRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.predicates.keys().collect();
        names.sort();
        f.debug_struct("CustomRules").field("names", &names).finish()
    }
}
