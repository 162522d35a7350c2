mod field;
pub use field::{field_key, Field, FieldClass, FieldTree, NestedSlot, ValidatorSpec};

mod identifier;
pub use identifier::Identifier;
use identifier::IdStrategy;

mod resource;
pub use resource::Resource;

mod sort;
pub use sort::{Sort, SortOrder};

mod view;
pub use view::{ListView, View, Views};

use crate::{Error, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};

/// A decoded JSON object: one record of a resource.
pub type Record = Map<String, Value>;

/// Query parameters produced by [`Schema::order_clause`].
pub type OrderClause = IndexMap<String, String>;

/// The parsed descriptor document.
///
/// Built once at start-up and read-only afterward. Derived indices, such as
/// the file fields of each resource, are computed while building.
#[derive(Debug)]
pub struct Schema {
    root_url: String,
    title: String,
    resources: IndexMap<String, Resource>,
    extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct Document {
    #[serde(default)]
    root_url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    resources: IndexMap<String, Resource>,
    #[serde(default)]
    extra: Option<Map<String, Value>>,
}

impl Schema {
    /// Builds the schema from a decoded descriptor document.
    pub fn from_json(document: Value) -> Result<Schema> {
        let document: Document =
            serde_json::from_value(document).map_err(Error::invalid_descriptor)?;
        Ok(Schema::from_document(document))
    }

    /// Builds the schema from the raw bytes of a descriptor document.
    pub fn from_slice(bytes: &[u8]) -> Result<Schema> {
        let document: Document =
            serde_json::from_slice(bytes).map_err(Error::invalid_descriptor)?;
        Ok(Schema::from_document(document))
    }

    fn from_document(document: Document) -> Schema {
        let mut resources = document.resources;
        for (key, resource) in &mut resources {
            resource.prepare(key);
        }

        Schema {
            root_url: document.root_url,
            title: document.title,
            resources,
            extra: document.extra.unwrap_or_default(),
        }
    }

    /// Display title of the whole application.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    /// Application-wide extra settings.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Iterates the declared resources in document order.
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values()
    }

    /// Looks up a resource, without logging when it is missing.
    pub fn get(&self, name: &str) -> Option<&Resource> {
        self.resources.get(name)
    }

    /// Looks up a resource, logging a warning when it is not declared.
    pub fn resource(&self, name: &str) -> Option<&Resource> {
        let resource = self.resources.get(name);
        if resource.is_none() {
            tracing::warn!(resource = name, "unknown resource");
        }
        resource
    }

    /// Returns `root_url + location` of the resource.
    pub fn resource_url(&self, name: &str) -> Result<String> {
        match self.resource(name) {
            Some(resource) => Ok(format!("{}{}", self.root_url, resource.location)),
            None => Err(Error::unknown_resource(name)),
        }
    }

    /// Name of the identifier property; empty when the resource declares
    /// none or is unknown.
    pub fn resource_id_field(&self, name: &str) -> &str {
        self.resource(name)
            .map(|resource| resource.id_field.as_str())
            .unwrap_or("")
    }

    /// HTTP verb used to update records of the resource, `PUT` when the
    /// resource is unknown.
    pub fn resource_update_method(&self, name: &str) -> &str {
        self.resource(name)
            .map(|resource| resource.update_method.as_str())
            .unwrap_or("PUT")
    }

    pub fn resource_extra(&self, name: &str) -> Option<&Map<String, Value>> {
        self.resource(name).map(|resource| &resource.extra)
    }

    /// Dot-paths of all file fields across the create and edit views,
    /// without duplicates.
    pub fn resource_file_inputs(&self, name: &str) -> &[String] {
        self.resource(name)
            .map(|resource| resource.file_inputs())
            .unwrap_or(&[])
    }

    /// Returns the `order_by` query parameter for a sort request.
    ///
    /// Empty when no sort was requested or the field is not orderable.
    pub fn order_clause(&self, name: &str, sort: Option<&Sort>) -> OrderClause {
        let mut clause = OrderClause::new();
        let Some(resource) = self.resource(name) else {
            return clause;
        };
        let Some(sort) = sort else {
            return clause;
        };
        if !sort.field.is_empty() && resource.is_orderable(&sort.field) {
            clause.insert("order_by".to_string(), sort.order_by());
        }
        clause
    }

    /// Resolves the identifier of a record.
    ///
    /// Tries, in order: the declared id field, an `id` property, the last
    /// segment of the self link, then `fallback`.
    pub fn resolve_id(
        &self,
        name: &str,
        record: &Record,
        fallback: Option<&Identifier>,
    ) -> Result<Identifier> {
        let resource = self.get(name);

        IdStrategy::CHAIN
            .iter()
            .find_map(|strategy| strategy.resolve(resource, record))
            .or_else(|| fallback.cloned())
            .ok_or_else(|| Error::identifier_not_found(name))
    }

    /// Returns the records embedded under `_embedded[embedded_name]`, each
    /// with its `id` property set to the resolved identifier.
    ///
    /// A missing `_embedded`, an empty `embedded_name` or a missing key under
    /// `_embedded` yields an empty list.
    pub fn extract_embedded(&self, name: &str, document: &Value) -> Result<Vec<Record>> {
        let Some(resource) = self.resource(name) else {
            return Ok(vec![]);
        };

        let Some(embedded) = document.get("_embedded") else {
            tracing::warn!(resource = name, "`_embedded` is absent from the response");
            return Ok(vec![]);
        };

        if resource.embedded_name.is_empty() {
            tracing::warn!(resource = name, "`embedded_name` of the resource is empty");
            return Ok(vec![]);
        }

        let Some(items) = embedded.get(&resource.embedded_name) else {
            tracing::warn!(
                resource = name,
                embedded_name = %resource.embedded_name,
                "embedded resources are missing from `_embedded`"
            );
            return Ok(vec![]);
        };

        let Some(items) = items.as_array() else {
            tracing::warn!(
                resource = name,
                embedded_name = %resource.embedded_name,
                "embedded resources are not a list"
            );
            return Ok(vec![]);
        };

        let mut records = Vec::with_capacity(items.len());
        for item in items {
            let Some(record) = item.as_object() else {
                tracing::warn!(resource = name, "skipping embedded item that is not an object");
                continue;
            };
            let mut record = record.clone();
            let id = self.resolve_id(name, &record, None)?;
            record.insert("id".to_string(), id.to_value());
            records.push(record);
        }
        Ok(records)
    }

    /// Returns whether the list page of the resource uses infinite pagination.
    pub fn is_infinite_pagination(&self, name: &str) -> bool {
        self.resource(name)
            .map(|resource| resource.infinite_pagination)
            .unwrap_or(false)
    }

    /// Applies `f` to every resource in document order.
    pub fn map_resources<T>(&self, f: impl FnMut(&Resource) -> T) -> Vec<T> {
        self.resources.values().map(f).collect()
    }
}
