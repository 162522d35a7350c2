use serde::Deserialize;
use serde_json::{Map, Value};

/// One displayed or edited property of a record.
///
/// Composite widgets (`MappingInput`, `ArrayField`, `ReferenceInput`, ...)
/// embed further field descriptors inside their params. Those are lifted out
/// of `params` at parse time into [`FieldTree::Composite`], so nested fields
/// are parsed and validated exactly like top-level ones.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawField")]
pub struct Field {
    /// Stable key. When absent, callers derive a positional key.
    pub id: Option<String>,

    /// Widget type tag, e.g. `TextInput` or `MappingField`.
    pub ty: String,

    /// Dot-path into the record.
    pub source: Option<String>,

    /// Widget configuration, without the nested field descriptors.
    pub params: Map<String, Value>,

    /// Validators, in declaration order.
    pub validators: Vec<ValidatorSpec>,

    pub tree: FieldTree,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldTree {
    Leaf,
    Composite {
        /// The param key the children were declared under.
        slot: NestedSlot,
        children: Vec<Field>,
    },
}

/// Where nested field descriptors live inside `params`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestedSlot {
    /// `params.fields`: a list of sub-fields (arrays and mappings).
    Fields,
    /// `params.child`: the single field displayed for a reference.
    Child,
    /// `params.single_field`: chip display for nested arrays.
    SingleField,
}

impl NestedSlot {
    const ALL: [NestedSlot; 3] = [NestedSlot::Fields, NestedSlot::Child, NestedSlot::SingleField];

    pub fn param_name(self) -> &'static str {
        match self {
            NestedSlot::Fields => "fields",
            NestedSlot::Child => "child",
            NestedSlot::SingleField => "single_field",
        }
    }
}

/// Behavior class of a field, derived from its type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldClass {
    File,
    Mapping,
    Array,
    NestedArray,
    Reference,
    Plain,
}

/// A validator declaration: `{name, args}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValidatorSpec {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

#[derive(Deserialize)]
struct RawField {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    params: Option<Map<String, Value>>,
    #[serde(default)]
    validators: Option<Vec<ValidatorSpec>>,
}

impl From<RawField> for Field {
    fn from(raw: RawField) -> Field {
        let mut params = raw.params.unwrap_or_default();
        let mut tree = FieldTree::Leaf;

        for slot in NestedSlot::ALL {
            // Servers send the unused slot as `null`.
            let value = match params.remove(slot.param_name()) {
                None | Some(Value::Null) => continue,
                Some(value) => value,
            };

            let parsed = match slot {
                NestedSlot::Fields => serde_json::from_value::<Vec<Field>>(value.clone()),
                NestedSlot::Child | NestedSlot::SingleField => {
                    serde_json::from_value::<Field>(value.clone()).map(|field| vec![field])
                }
            };

            match parsed {
                Ok(children) if matches!(tree, FieldTree::Leaf) => {
                    tree = FieldTree::Composite { slot, children };
                }
                Ok(_) => {
                    tracing::warn!(
                        ty = %raw.ty,
                        slot = slot.param_name(),
                        "field declares nested fields in more than one slot; keeping the first"
                    );
                    params.insert(slot.param_name().to_string(), value);
                }
                Err(err) => {
                    tracing::warn!(
                        ty = %raw.ty,
                        slot = slot.param_name(),
                        error = %err,
                        "nested field descriptors do not parse; keeping them as a plain param"
                    );
                    params.insert(slot.param_name().to_string(), value);
                }
            }
        }

        Field {
            id: raw.id,
            ty: raw.ty,
            source: raw.source.filter(|source| !source.is_empty()),
            params,
            validators: raw.validators.unwrap_or_default(),
            tree,
        }
    }
}

impl Field {
    /// Creates a leaf field with no params or validators.
    pub fn new(ty: impl Into<String>, source: impl Into<String>) -> Field {
        Field {
            id: None,
            ty: ty.into(),
            source: Some(source.into()),
            params: Map::new(),
            validators: vec![],
            tree: FieldTree::Leaf,
        }
    }

    pub fn class(&self) -> FieldClass {
        match self.ty.as_str() {
            "FileInput" | "FileField" | "file" => FieldClass::File,
            "MappingInput" | "MappingField" | "mapping" => FieldClass::Mapping,
            "ArrayInput" | "ArrayField" | "array" => FieldClass::Array,
            "NestedArrayField" => FieldClass::NestedArray,
            "ReferenceInput" | "ReferenceField" | "reference" => FieldClass::Reference,
            _ => FieldClass::Plain,
        }
    }

    /// Returns the nested field descriptors, empty for leaf fields.
    pub fn children(&self) -> &[Field] {
        match &self.tree {
            FieldTree::Leaf => &[],
            FieldTree::Composite { children, .. } => children,
        }
    }

    /// Returns the children declared under `slot`, if that is where this
    /// field keeps them.
    pub fn children_in(&self, slot: NestedSlot) -> Option<&[Field]> {
        match &self.tree {
            FieldTree::Composite {
                slot: declared,
                children,
            } if *declared == slot => Some(children),
            _ => None,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.tree, FieldTree::Composite { .. })
    }
}

/// Returns the key used for the field at `index` in a descriptor list.
///
/// Declared ids win; otherwise the key is derived from the position, which
/// stays the same across re-renders of the same list.
pub fn field_key(field: &Field, index: usize) -> String {
    match &field.id {
        Some(id) => id.clone(),
        None => format!("field{}", index),
    }
}
