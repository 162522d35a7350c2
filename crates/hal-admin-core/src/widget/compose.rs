use super::{Mode, Widget, WidgetRegistry, Widgets};
use crate::schema::{field_key, Field, Schema};
use crate::validator::field_validators;

/// Composes widget trees from field descriptors.
///
/// Holds the schema, so constructors can look up resource-level context
/// (e.g. whether a referenced resource exists), and the registry used to
/// pick a constructor per type tag.
#[derive(Debug, Clone, Copy)]
pub struct Composer<'a> {
    schema: &'a Schema,
    registry: &'a WidgetRegistry,
}

impl<'a> Composer<'a> {
    pub fn new(schema: &'a Schema, registry: &'a WidgetRegistry) -> Composer<'a> {
        Composer { schema, registry }
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// Composes display widgets.
    pub fn compose_fields(&self, fields: &[Field]) -> Widgets {
        Widgets::from_vec(self.compose_list(Mode::Field, fields), false)
    }

    /// Composes input widgets. With `always_many`, a single input is still
    /// returned as a list.
    pub fn compose_inputs(&self, fields: &[Field], always_many: bool) -> Widgets {
        Widgets::from_vec(self.compose_list(Mode::Input, fields), always_many)
    }

    pub fn compose_list(&self, mode: Mode, fields: &[Field]) -> Vec<Widget> {
        fields
            .iter()
            .enumerate()
            .map(|(index, field)| self.compose(mode, field_key(field, index), field))
            .collect()
    }

    /// Composes one field with the constructor registered for its type tag.
    ///
    /// Short tags (`file`, `mapping`, `array`, `reference`) stand for the
    /// display or input widget of that family, depending on `mode`.
    pub fn compose(&self, mode: Mode, key: String, field: &Field) -> Widget {
        if let Some(constructor) = self.registry.get(&field.ty) {
            return constructor(self, key, field);
        }

        if let Some(tag) = widget_tag(&field.ty, mode) {
            let field = Field {
                ty: tag.to_string(),
                ..field.clone()
            };
            return self.compose(mode, key, &field);
        }

        tracing::warn!(ty = %field.ty, "no widget registered for type; using a text widget");
        self.fallback(mode, key, field)
    }

    fn fallback(&self, mode: Mode, key: String, field: &Field) -> Widget {
        let mut widget = Widget::new(key, mode.fallback_kind(), field.source.clone());
        widget.params = field.params.clone();
        if mode == Mode::Input {
            widget.validators = field_validators(field);
        }
        widget
    }

    /// Composes the nested fields of `parent` with paths re-based under the
    /// parent's source.
    ///
    /// A child that declares its own source becomes a named sub-field
    /// (`parent.child`); a child without one is a positional element that
    /// keeps the parent's path and gets its index assigned instead.
    pub(crate) fn compose_nested(&self, mode: Mode, parent: &Field, children: &[Field]) -> Vec<Widget> {
        children
            .iter()
            .enumerate()
            .map(|(index, child)| {
                let mut widget = self.compose(mode, field_key(child, index), child);
                match &child.source {
                    Some(own) => {
                        widget.source = Some(match &parent.source {
                            Some(base) => format!("{}.{}", base, own),
                            None => own.clone(),
                        });
                        widget.index = None;
                    }
                    None => {
                        widget.source = parent.source.clone();
                        widget.index = Some(index);
                    }
                }
                widget
            })
            .collect()
    }
}

fn widget_tag(short: &str, mode: Mode) -> Option<&'static str> {
    let tag = match (short, mode) {
        ("file", Mode::Field) => "FileField",
        ("file", Mode::Input) => "FileInput",
        ("mapping", Mode::Field) => "MappingField",
        ("mapping", Mode::Input) => "MappingInput",
        ("array", Mode::Field) => "ArrayField",
        ("array", Mode::Input) => "ArrayInput",
        ("reference", Mode::Field) => "ReferenceField",
        ("reference", Mode::Input) => "ReferenceInput",
        _ => return None,
    };
    Some(tag)
}
