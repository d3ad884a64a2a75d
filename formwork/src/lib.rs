//! Dynamic form-definition engine.
//!
//! Turns declarative field definitions into live controllers that validate
//! their values, resolve user-facing error messages, keep repeatable fields
//! in sync with their value containers, and aggregate everything into a
//! [`Form`].

pub mod builder;
pub mod config;
pub mod container;
pub mod control;
pub mod definition;
pub mod error;
pub mod field;
pub mod form;
pub mod messages;
pub mod notify;
pub mod registry;
pub mod repeater;
pub mod validation;
pub mod value;

pub use builder::FormBuilder;
pub use error::{DefinitionError, FormError, Result, StructureError};
pub use field::FieldController;
pub use form::{Form, FormNode};
pub use repeater::RepeaterController;
pub use value::{FieldValue, FormValue, Value};

pub mod prelude {
    pub use crate::builder::FormBuilder;
    pub use crate::config::{ErrorReporting, FormConfig};
    pub use crate::container::ValueArray;
    pub use crate::control::{FieldView, RenderableControl};
    pub use crate::definition::{FieldDefinition, FormDefinition, ValidationRuleSet};
    pub use crate::error::{DefinitionError, FormError, StructureError};
    pub use crate::field::{FieldController, label_for};
    pub use crate::form::{Form, FormNode};
    pub use crate::messages::{MessageResolver, Messages};
    pub use crate::notify::{ChangeEvent, ChangeNotifier, ListenerId};
    pub use crate::registry::{ComponentKind, ComponentRegistry};
    pub use crate::repeater::RepeaterController;
    pub use crate::validation::{CustomRules, RuleFailure};
    pub use crate::value::{FieldValue, FormValue, Value};
}
