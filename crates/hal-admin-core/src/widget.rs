//! Turns field descriptors into a tree of widget instances.
//!
//! Widgets are picked by type tag from an open [`WidgetRegistry`]; tags
//! without a registered constructor fall back to a plain text widget.

mod builtin;

mod compose;
pub use compose::Composer;

mod registry;
pub use registry::{Constructor, WidgetRegistry};

use crate::validator::Validator;
use serde_json::{Map, Value};

/// Whether widgets are composed for display or for editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Field,
    Input,
}

impl Mode {
    /// Widget used for type tags nobody registered.
    pub fn fallback_kind(self) -> &'static str {
        match self {
            Mode::Field => "TextField",
            Mode::Input => "TextInput",
        }
    }
}

/// One widget instance ready to be rendered.
#[derive(Debug, Clone)]
pub struct Widget {
    /// Stable key among siblings.
    pub key: String,

    /// Name of the widget to render, e.g. `TextInput`.
    pub kind: String,

    /// Dot-path into the record.
    pub source: Option<String>,

    /// Position among the parent's children, for children without a source.
    pub index: Option<usize>,

    pub params: Map<String, Value>,

    pub validators: Vec<Validator>,

    pub children: Vec<Widget>,
}

impl Widget {
    pub fn new(key: impl Into<String>, kind: impl Into<String>, source: Option<String>) -> Widget {
        Widget {
            key: key.into(),
            kind: kind.into(),
            source,
            index: None,
            params: Map::new(),
            validators: vec![],
            children: vec![],
        }
    }

    /// Sets `name` unless the params already carry it.
    pub(crate) fn default_param(&mut self, name: &str, value: Value) {
        if !self.params.contains_key(name) {
            self.params.insert(name.to_string(), value);
        }
    }

    /// Runs the widget's validators against `value`.
    pub fn validate(&self, value: &Value) -> Vec<String> {
        crate::validator::validate_all(&self.validators, value)
    }
}

/// Result of composing a descriptor list.
///
/// Mirrors what list-valued callers expect: nothing, a single widget, or
/// several widgets.
#[derive(Debug, Clone)]
pub enum Widgets {
    Empty,
    One(Widget),
    Many(Vec<Widget>),
}

impl Widgets {
    /// Wraps composed widgets. A single widget is unwrapped unless
    /// `always_many` is set.
    pub fn from_vec(mut widgets: Vec<Widget>, always_many: bool) -> Widgets {
        match widgets.len() {
            0 => Widgets::Empty,
            1 if !always_many => Widgets::One(widgets.remove(0)),
            _ => Widgets::Many(widgets),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Widgets::Empty)
    }

    pub fn len(&self) -> usize {
        match self {
            Widgets::Empty => 0,
            Widgets::One(_) => 1,
            Widgets::Many(widgets) => widgets.len(),
        }
    }

    pub fn as_slice(&self) -> &[Widget] {
        match self {
            Widgets::Empty => &[],
            Widgets::One(widget) => std::slice::from_ref(widget),
            Widgets::Many(widgets) => widgets,
        }
    }

    pub fn into_vec(self) -> Vec<Widget> {
        match self {
            Widgets::Empty => vec![],
            Widgets::One(widget) => vec![widget],
            Widgets::Many(widgets) => widgets,
        }
    }
}
