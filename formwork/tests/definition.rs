use formwork::config::{ErrorReporting, FormConfig};
use formwork::definition::{FieldDefinition, FormDefinition, ValidationRuleSet};
use formwork::registry::{ComponentKind, ComponentRegistry};
use formwork::{FormBuilder, Value};

const TEXTAREA: &str = r#"{
    "input": true,
    "tableView": true,
    "type": "textarea",
    "label": "Textarea",
    "key": "textarea",
    "placeholder": "",
    "prefix": "",
    "suffix": "",
    "rows": 3,
    "multiple": false,
    "defaultValue": "",
    "protected": false,
    "persistent": true,
    "validate": {
        "required": true,
        "minLength": 2,
        "maxLength": 10,
        "pattern": "",
        "custom": "",
        "customPrivate": false
    }
}"#;

#[test]
fn test_parse_builder_json() {
    let definition: FieldDefinition = serde_json::from_str(TEXTAREA).unwrap();
    assert_eq!(definition.key, "textarea");
    assert_eq!(definition.component_type, "textarea");
    assert_eq!(definition.label, "Textarea");
    assert_eq!(definition.default_value, Some(Value::from("")));
    assert!(!definition.multiple);
    assert_eq!(
        definition.validate,
        Some(
            ValidationRuleSet::new()
                .required(true)
                .min_length(2)
                .max_length(10)
                .pattern("")
                .custom("")
        )
    );
}

#[test]
fn test_blank_lengths_are_absent() {
    let rules: ValidationRuleSet =
        serde_json::from_str(r#"{"minLength": "", "maxLength": null}"#).unwrap();
    assert_eq!(rules.min_length, None);
    assert_eq!(rules.max_length, None);

    let rules: ValidationRuleSet = serde_json::from_str(r#"{"minLength": "4"}"#).unwrap();
    assert_eq!(rules.min_length, Some(4));

    assert!(serde_json::from_str::<ValidationRuleSet>(r#"{"minLength": "four"}"#).is_err());
}

#[test]
fn test_type_defaults_to_textfield() {
    let definition: FieldDefinition = serde_json::from_str(r#"{"key": "name"}"#).unwrap();
    assert_eq!(definition.component_type, "textfield");
    assert_eq!(definition.validate, None);
    assert!(!definition.is_required());
}

#[test]
fn test_build_form_from_json() {
    let json = format!(r#"{{"components": [{}, {{"key": "tags", "multiple": true}}]}}"#, TEXTAREA);
    let definition: FormDefinition = serde_json::from_str(&json).unwrap();
    let form = FormBuilder::new().build(&definition).unwrap();

    assert_eq!(form.keys().collect::<Vec<_>>(), vec!["textarea", "tags"]);
    assert!(form.repeater("tags").is_some());
    assert_eq!(form.errors(), vec!["Textarea is required"]);
}

#[test]
fn test_config_from_json() {
    let config: FormConfig = serde_json::from_str(
        r#"{"errorReporting": "all", "messages": {"required": "{label} please"}}"#,
    )
    .unwrap();
    assert_eq!(config.error_reporting, ErrorReporting::All);

    let definition: FieldDefinition = serde_json::from_str(TEXTAREA).unwrap();
    let field = FormBuilder::new().config(config).field(definition).unwrap();
    assert_eq!(field.errors(), vec!["Textarea please"]);

    let empty: FormConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, FormConfig::default());
}

#[test]
fn test_builtin_registry() {
    let registry = ComponentRegistry::with_builtins();
    for tag in [
        "textfield",
        "textarea",
        "password",
        "hidden",
        "phoneNumber",
        "email",
        "number",
        "checkbox",
    ] {
        assert!(registry.contains(tag), "missing {}", tag);
    }
    assert!(ComponentRegistry::new().is_empty());
}

#[derive(Debug)]
struct Upper;

impl ComponentKind for Upper {
    fn empty_value(&self) -> Value {
        Value::from("")
    }

    fn normalize(&self, value: Value) -> Value {
        match value {
            Value::String(s) => Value::String(s.to_uppercase()),
            other => other,
        }
    }
}

fn upper(_: &FieldDefinition) -> Box<dyn ComponentKind> {
    Box::new(Upper)
}

#[test]
fn test_register_custom_component() {
    let builder = FormBuilder::new().component("upper", upper);
    let mut field = builder.field(FieldDefinition::new("code", "upper")).unwrap();
    field.set_value("abc");
    assert_eq!(field.value(), Value::from("ABC"));
}
