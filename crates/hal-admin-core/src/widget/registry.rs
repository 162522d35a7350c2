use super::{builtin, Composer, Widget};
use crate::schema::Field;
use std::collections::HashMap;

/// Builds a widget for a field. Receives the composer (for children and
/// schema lookups) and the key assigned to the field.
pub type Constructor = fn(&Composer<'_>, String, &Field) -> Widget;

/// Widget constructors keyed by field type tag.
#[derive(Clone)]
pub struct WidgetRegistry {
    constructors: HashMap<String, Constructor>,
}

impl std::fmt::Debug for WidgetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tags: Vec<_> = self.constructors.keys().collect();
        tags.sort();
        f.debug_struct("WidgetRegistry").field("tags", &tags).finish()
    }
}

impl WidgetRegistry {
    /// A registry with no constructors; every field renders as text.
    pub fn empty() -> WidgetRegistry {
        WidgetRegistry {
            constructors: HashMap::new(),
        }
    }

    /// Registers `constructor` for `tag`, replacing any previous one.
    pub fn register(&mut self, tag: impl Into<String>, constructor: Constructor) -> &mut Self {
        self.constructors.insert(tag.into(), constructor);
        self
    }

    pub fn get(&self, tag: &str) -> Option<Constructor> {
        self.constructors.get(tag).copied()
    }
}

impl Default for WidgetRegistry {
    /// The built-in widget catalog.
    fn default() -> WidgetRegistry {
        let mut registry = WidgetRegistry::empty();

        for tag in [
            "TextField",
            "RichTextField",
            "DateField",
            "NumberField",
            "BooleanField",
            "FunctionField",
            "ReferenceManyField",
            "SelectField",
            "SimpleArrayField",
            "JsonField",
            "ChipField",
            "UrlField",
            "EmailField",
            "FileField",
            "RichTextInput",
        ] {
            registry.register(tag, builtin::view);
        }

        for tag in [
            "TextInput",
            "DateInput",
            "DateTimeInput",
            "NullableBooleanInput",
            "BooleanInput",
            "NumberInput",
            "JsonInput",
            "SelectArrayInput",
        ] {
            registry.register(tag, builtin::input);
        }

        registry
            .register("DateTimeField", builtin::date_time_field)
            .register("SelectInput", builtin::select_input)
            .register("ArrayField", builtin::array_field)
            .register("ArrayInput", builtin::array_input)
            .register("NestedArrayField", builtin::nested_array_field)
            .register("ReferenceField", builtin::reference_field)
            .register("ReferenceInput", builtin::reference_input)
            .register("MappingField", builtin::mapping_field)
            .register("MappingInput", builtin::mapping_input)
            .register("FileInput", builtin::file_input);

        registry
    }
}
