use std::sync::{Arc, Mutex};

use formwork::definition::{FieldDefinition, ValidationRuleSet};
use formwork::notify::ChangeEvent;
use formwork::{FormError, RepeaterController, StructureError, Value};

fn textareas() -> RepeaterController {
    let definition = FieldDefinition::new("textarea", "textarea")
        .label("Textarea")
        .multiple(true);
    RepeaterController::new(definition).unwrap()
}

fn assert_in_sync(repeater: &RepeaterController) {
    assert_eq!(repeater.len(), repeater.container().len());
    for (i, item) in repeater.iter().enumerate() {
        assert_eq!(item.index(), Some(i));
        assert_eq!(repeater.container().at(i), Some(item.value()));
        if i == 0 {
            assert_eq!(item.label(), "Textarea");
        } else {
            assert_eq!(item.label(), "");
        }
    }
}

#[test]
fn test_starts_with_one_labelled_item() {
    let repeater = textareas();
    assert_eq!(repeater.len(), 1);
    assert_eq!(repeater.labels(), vec!["Textarea"]);
    assert_in_sync(&repeater);
}

#[test]
fn test_multiple_text_areas() {
    let mut repeater = textareas();

    repeater.add_component();
    assert_eq!(repeater.len(), 2);
    assert_eq!(repeater.at(0).unwrap().label(), "Textarea");
    assert_eq!(repeater.at(1).unwrap().label(), "");

    repeater.add_component();
    assert_eq!(repeater.len(), 3);
    assert_eq!(repeater.container().len(), 3);
    assert_eq!(repeater.labels(), vec!["Textarea", "", ""]);

    for (i, name) in ["Joe", "Mary", "Smith"].into_iter().enumerate() {
        repeater.at_mut(i).unwrap().set_value(name);
    }
    assert_eq!(repeater.container().at(0), Some(Value::from("Joe")));
    assert_eq!(repeater.container().at(1), Some(Value::from("Mary")));
    assert_eq!(repeater.container().at(2), Some(Value::from("Smith")));
    assert_eq!(
        repeater.values(),
        vec![Value::from("Joe"), Value::from("Mary"), Value::from("Smith")]
    );

    repeater.remove_at(1).unwrap();
    assert_eq!(repeater.len(), 2);
    assert_eq!(repeater.values(), vec![Value::from("Joe"), Value::from("Smith")]);
    assert_eq!(repeater.labels(), vec!["Textarea", ""]);
    assert_in_sync(&repeater);
}

#[test]
fn test_removing_first_item_moves_label() {
    let mut repeater = textareas();
    repeater.add_component().set_value("second");

    repeater.remove_at(0).unwrap();
    assert_eq!(repeater.len(), 1);
    assert_eq!(repeater.at(0).unwrap().label(), "Textarea");
    assert_eq!(repeater.at(0).unwrap().value(), Value::from("second"));
    assert_in_sync(&repeater);
}

#[test]
fn test_messages_follow_current_label() {
    let definition = FieldDefinition::new("names", "textfield")
        .label("Name")
        .multiple(true)
        .validate(ValidationRuleSet::new().required(true));
    let mut repeater = RepeaterController::new(definition).unwrap();
    repeater.at_mut(0).unwrap().set_value("Joe");
    repeater.add_component();

    assert_eq!(repeater.errors(), vec!["is required"]);

    repeater.remove_at(0).unwrap();
    assert_eq!(repeater.errors(), vec!["Name is required"]);
}

#[test]
fn test_insert_at() {
    let mut repeater = textareas();
    repeater.at_mut(0).unwrap().set_value("a");
    repeater.add_component().set_value("c");
    repeater.insert_at(1).unwrap().set_value("b");

    assert_eq!(
        repeater.values(),
        vec![Value::from("a"), Value::from("b"), Value::from("c")]
    );
    assert_in_sync(&repeater);

    repeater.insert_at(0).unwrap();
    assert_eq!(repeater.at(0).unwrap().value(), Value::from(""));
    assert_eq!(repeater.at(1).unwrap().label(), "");
    assert_in_sync(&repeater);

    assert!(matches!(
        repeater.insert_at(10),
        Err(FormError::Structure(StructureError::IndexOutOfRange { index: 10, len: 4, .. }))
    ));
}

#[test]
fn test_remove_out_of_range() {
    let mut repeater = textareas();
    let err = repeater.remove_at(1).unwrap_err();
    assert!(matches!(
        err,
        FormError::Structure(StructureError::IndexOutOfRange { index: 1, len: 1, .. })
    ));
    assert_eq!(repeater.len(), 1);
}

#[test]
fn test_remove_down_to_zero() {
    let mut repeater = textareas();
    repeater.remove_at(0).unwrap();
    assert!(repeater.is_empty());
    assert!(repeater.container().is_empty());
    assert!(repeater.is_valid());

    repeater.add_component();
    assert_eq!(repeater.labels(), vec!["Textarea"]);
}

#[test]
fn test_invariant_after_mixed_mutations() {
    let mut repeater = textareas();
    let ops: [(bool, usize); 9] = [
        (true, 0),
        (true, 0),
        (false, 1),
        (true, 0),
        (false, 0),
        (true, 0),
        (false, 2),
        (false, 0),
        (true, 0),
    ];
    for (add, index) in ops {
        if add {
            repeater.add_component();
        } else {
            repeater.remove_at(index).unwrap();
        }
        assert_in_sync(&repeater);
    }
}

#[test]
fn test_default_value_only_seeds_first_item() {
    let definition = FieldDefinition::new("tags", "textfield")
        .multiple(true)
        .default_value("first");
    let mut repeater = RepeaterController::new(definition).unwrap();
    repeater.add_component();

    assert_eq!(repeater.values(), vec![Value::from("first"), Value::from("")]);
}

#[test]
fn test_resize_and_reset() {
    let mut repeater = textareas();
    repeater.resize(4);
    assert_eq!(repeater.len(), 4);
    assert_in_sync(&repeater);

    repeater.resize(2);
    assert_eq!(repeater.len(), 2);
    assert_in_sync(&repeater);

    repeater.at_mut(1).unwrap().set_value("x");
    assert!(repeater.is_dirty());
    repeater.reset();
    assert_eq!(repeater.len(), 1);
    assert!(!repeater.is_dirty());
    assert_in_sync(&repeater);
}

#[test]
fn test_structural_changes_notify_synchronously() {
    let definition = FieldDefinition::new("items", "textfield").multiple(true);
    let builder = formwork::FormBuilder::new();
    let mut form = builder.empty_form();
    builder.add(&mut form, definition).unwrap();

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    form.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

    let repeater = form.repeater_mut("items").unwrap();
    repeater.add_component().set_value("b");
    repeater.remove_at(0).unwrap();

    assert_eq!(
        events.lock().unwrap().as_slice(),
        &[
            ChangeEvent::ItemAdded {
                key: "items".to_string(),
                index: 1
            },
            ChangeEvent::ValueChanged {
                key: "items".to_string(),
                index: Some(1),
                value: Value::from("b"),
            },
            ChangeEvent::ItemRemoved {
                key: "items".to_string(),
                index: 0
            },
        ]
    );
}

#[test]
fn test_reset_added_item_restores_empty_value() {
    let definition = FieldDefinition::new("tags", "textfield")
        .multiple(true)
        .default_value("first");
    let mut repeater = RepeaterController::new(definition).unwrap();
    repeater.add_component().set_value("second");

    let item = repeater.at_mut(1).unwrap();
    assert_eq!(item.default_value(), Value::from(""));
    item.reset();
    assert_eq!(repeater.values(), vec![Value::from("first"), Value::from("")]);

    repeater.at_mut(0).unwrap().set_value("changed");
    repeater.at_mut(0).unwrap().reset();
    assert_eq!(repeater.at(0).unwrap().value(), Value::from("first"));
}

#[test]
fn test_standalone_repeater_notifies_listeners() {
    let mut repeater = textareas();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let id = repeater.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

    repeater.add_component();
    repeater.resize(1);

    assert_eq!(
        events.lock().unwrap().as_slice(),
        &[
            ChangeEvent::ItemAdded {
                key: "textarea".to_string(),
                index: 1
            },
            ChangeEvent::ItemRemoved {
                key: "textarea".to_string(),
                index: 1
            },
        ]
    );

    assert!(repeater.unsubscribe(id));
    repeater.add_component();
    assert_eq!(events.lock().unwrap().len(), 2);
    assert_eq!(repeater.notifier().listener_count(), 0);
}

#[test]
fn test_views_and_errors_follow_positions() {
    let definition = FieldDefinition::new("names", "textfield")
        .label("Name")
        .multiple(true)
        .validate(ValidationRuleSet::new().required(true));
    let mut repeater = RepeaterController::new(definition).unwrap();
    repeater.add_component();
    repeater.add_component().set_value("Joe");

    let views = repeater.views();
    assert_eq!(
        views.iter().map(|v| v.index).collect::<Vec<_>>(),
        vec![Some(0), Some(1), Some(2)]
    );
    assert_eq!(
        views.iter().map(|v| v.label.as_str()).collect::<Vec<_>>(),
        vec!["Name", "", ""]
    );
    assert_eq!(views[0].errors, vec!["Name is required"]);
    assert_eq!(views[1].errors, vec!["is required"]);
    assert!(views[2].errors.is_empty());
    assert_eq!(repeater.errors(), vec!["Name is required", "is required"]);
    assert_eq!(views[1], repeater.at(1).unwrap().view());
}
