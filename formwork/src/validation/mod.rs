//! Validation rules for form fields.
//!
//! A [`ValidationRuleSet`](crate::definition::ValidationRuleSet) is compiled
//! once into a [`RuleSet`], which turns a candidate value into a list of
//! [`RuleFailure`]s. An empty list means the value is valid.
//!
//! # Example
//!
//! ```
//! use formwork::definition::ValidationRuleSet;
//! use formwork::registry::builtin::Text;
//! use formwork::validation::{CustomRules, RuleFailure, RuleSet};
//! use formwork::Value;
//!
//! let rules = RuleSet::compile(
//!     "username",
//!     &ValidationRuleSet::new().required(true).min_length(3),
//!     &CustomRules::new(),
//! )
//! .unwrap();
//!
//! assert_eq!(rules.evaluate(&Value::from(""), &Text), vec![RuleFailure::Required]);
//! assert!(rules.evaluate(&Value::from("joe"), &Text).is_empty());
//! ```

mod custom;
mod failure;
mod rules;

pub use custom::{CustomPredicate, CustomRules};
pub use failure::{RuleFailure, RuleParams};
pub use rules::RuleSet;
