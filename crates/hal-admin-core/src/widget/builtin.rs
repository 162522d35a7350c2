//! Constructors of the built-in widget catalog.

use super::{Composer, Mode, Widget};
use crate::schema::{Field, NestedSlot};
use crate::validator::field_validators;
use serde_json::Value;

fn base(key: String, kind: &str, field: &Field) -> Widget {
    let mut widget = Widget::new(key, kind, field.source.clone());
    widget.params = field.params.clone();
    widget
}

/// Display widget rendered as-is.
pub(super) fn view(_cx: &Composer<'_>, key: String, field: &Field) -> Widget {
    base(key, &field.ty, field)
}

/// Input widget with the field's validators attached.
pub(super) fn input(_cx: &Composer<'_>, key: String, field: &Field) -> Widget {
    let mut widget = base(key, &field.ty, field);
    widget.validators = field_validators(field);
    widget
}

pub(super) fn date_time_field(_cx: &Composer<'_>, key: String, field: &Field) -> Widget {
    let mut widget = base(key, "DateField", field);
    widget.default_param("showTime", Value::Bool(true));
    widget
}

pub(super) fn select_input(cx: &Composer<'_>, key: String, field: &Field) -> Widget {
    let mut widget = input(cx, key, field);
    if widget.params.get("emptyValue").map_or(true, is_falsy) {
        widget.params.insert("emptyValue".to_string(), Value::from(""));
    }
    widget
}

pub(super) fn array_field(cx: &Composer<'_>, key: String, field: &Field) -> Widget {
    let mut widget = base(key, &field.ty, field);
    widget.children = cx.compose_nested(Mode::Field, field, field.children());
    widget
}

pub(super) fn array_input(cx: &Composer<'_>, key: String, field: &Field) -> Widget {
    let mut widget = input(cx, key, field);
    widget.children = cx.compose_nested(Mode::Input, field, field.children());
    widget
}

/// Either a table of sub-fields or, with `single_field`, one chip per row.
pub(super) fn nested_array_field(cx: &Composer<'_>, key: String, field: &Field) -> Widget {
    let mut widget = base(key, &field.ty, field);
    widget.children = match field.children_in(NestedSlot::SingleField) {
        Some(single) => cx.compose_list(Mode::Field, single),
        None => cx.compose_list(Mode::Field, field.children()),
    };
    widget
}

pub(super) fn reference_field(cx: &Composer<'_>, key: String, field: &Field) -> Widget {
    let mut widget = base(key, &field.ty, field);
    check_reference(cx, field);
    widget.children = reference_child(cx, Mode::Field, field);
    widget
}

pub(super) fn reference_input(cx: &Composer<'_>, key: String, field: &Field) -> Widget {
    let mut widget = base(key, &field.ty, field);
    check_reference(cx, field);
    widget.default_param("sort", Value::Bool(false));
    widget.children = reference_child(cx, Mode::Input, field);
    widget
}

pub(super) fn mapping_field(cx: &Composer<'_>, key: String, field: &Field) -> Widget {
    let mut widget = base(key, &field.ty, field);
    widget.children = cx.compose_nested(Mode::Field, field, field.children());
    widget
}

pub(super) fn mapping_input(cx: &Composer<'_>, key: String, field: &Field) -> Widget {
    let mut widget = base(key, &field.ty, field);
    widget.children = cx.compose_nested(Mode::Input, field, field.children());
    widget
}

/// File picker previewing the chosen file through a `FileField`.
pub(super) fn file_input(_cx: &Composer<'_>, key: String, field: &Field) -> Widget {
    let mut widget = base(key, &field.ty, field);
    let mut preview = Widget::new("1", "FileField", Some("src".to_string()));
    preview.params.insert("title".to_string(), Value::from("title"));
    widget.children = vec![preview];
    widget
}

/// The child of a reference displays a property of the referenced record,
/// so its source is not re-based.
fn reference_child(cx: &Composer<'_>, mode: Mode, field: &Field) -> Vec<Widget> {
    match field.children_in(NestedSlot::Child) {
        Some([child, ..]) => vec![cx.compose(mode, "1".to_string(), child)],
        _ => vec![],
    }
}

fn check_reference(cx: &Composer<'_>, field: &Field) {
    if let Some(reference) = field.params.get("reference").and_then(Value::as_str) {
        if cx.schema().get(reference).is_none() {
            tracing::warn!(
                reference,
                source = ?field.source,
                "reference widget points to an undeclared resource"
            );
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}
