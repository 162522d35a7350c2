use super::{Field, FieldClass, Views};
use indexmap::IndexSet;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Descriptor of one resource exposed by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct Resource {
    /// Display order hint.
    #[serde(default)]
    pub index: i64,

    /// Set from the key of the `resources` map when the document omits it.
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub title: String,

    /// Path appended to the root URL.
    pub location: String,

    /// Name of the identifier property. May be empty.
    #[serde(default)]
    pub id_field: String,

    /// Key under `_embedded` holding this resource's collection.
    #[serde(default)]
    pub embedded_name: String,

    /// HTTP verb used for updates.
    #[serde(default = "default_update_method")]
    pub update_method: String,

    #[serde(default)]
    pub deletable: bool,

    /// Fields the server can sort by.
    #[serde(default, rename = "order_by")]
    pub orderable_fields: Vec<String>,

    #[serde(default)]
    pub infinite_pagination: bool,

    #[serde(default)]
    pub extra: Map<String, Value>,

    #[serde(default)]
    pub views: Views,

    /// Dot-paths of the file fields of the create and edit views.
    #[serde(skip)]
    pub(crate) file_inputs: Vec<String>,
}

fn default_update_method() -> String {
    "PUT".to_string()
}

impl Resource {
    /// Finishes a freshly parsed resource: fills in defaults that depend on
    /// the map key and computes the derived indices.
    pub(crate) fn prepare(&mut self, key: &str) {
        if self.name.is_empty() {
            self.name = key.to_string();
        }
        if self.update_method.is_empty() {
            self.update_method = default_update_method();
        } else {
            self.update_method = self.update_method.to_ascii_uppercase();
        }
        if let Some(list) = &self.views.list {
            self.infinite_pagination |= list.infinite_pagination;
        }

        let mut paths = IndexSet::new();
        for view in [&self.views.create, &self.views.edit].into_iter().flatten() {
            collect_file_inputs(&view.fields, "", &mut paths);
        }
        self.file_inputs = paths.into_iter().collect();
    }

    pub fn file_inputs(&self) -> &[String] {
        &self.file_inputs
    }

    pub fn is_orderable(&self, field: &str) -> bool {
        self.orderable_fields.iter().any(|name| name == field)
    }
}

fn collect_file_inputs(fields: &[Field], prefix: &str, paths: &mut IndexSet<String>) {
    for field in fields {
        let Some(source) = &field.source else {
            continue;
        };
        let path = format!("{}{}", prefix, source);

        match field.class() {
            FieldClass::File => {
                paths.insert(path);
            }
            FieldClass::Mapping | FieldClass::Array => {
                collect_file_inputs(field.children(), &format!("{}.", path), paths);
            }
            _ => {}
        }
    }
}
