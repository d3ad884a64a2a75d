//! Interface to the presentation layer.

use crate::value::Value;

/// Read-only snapshot of a control, everything a renderer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub key: String,
    /// Position within a repeatable field, `None` for single fields.
    pub index: Option<usize>,
    /// Derived label; empty for every item but the first of a repeatable field.
    pub label: String,
    pub placeholder: String,
    pub prefix: String,
    pub suffix: String,
    pub value: Value,
    /// Whether to mark the control as required.
    pub required: bool,
    /// Messages to display, already resolved.
    pub errors: Vec<String>,
}

/// Something that can display a control.
///
/// User input flows back through
/// [`FieldController::set_value`](crate::FieldController::set_value); the
/// engine never depends on how the control is drawn.
pub trait RenderableControl {
    fn render(&mut self, view: &FieldView);
}

impl<F: FnMut(&FieldView)> RenderableControl for F {
    fn render(&mut self, view: &FieldView) {
        self(view)
    }
}
