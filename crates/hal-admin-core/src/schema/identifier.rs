use super::{Record, Resource};
use crate::hal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Identifier of a record, as it appears in URLs and `__in` filters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Int(i64),
    String(String),
}

impl Identifier {
    /// Converts a JSON property into an identifier.
    ///
    /// Only strings and numbers identify a record; any other value is
    /// treated as absent.
    pub fn from_value(value: &Value) -> Option<Identifier> {
        match value {
            Value::String(s) => Some(Identifier::String(s.clone())),
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => Identifier::Int(i),
                None => Identifier::String(n.to_string()),
            }),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Identifier::Int(i) => Value::from(*i),
            Identifier::String(s) => Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Int(i) => write!(f, "{}", i),
            Identifier::String(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Identifier {
        Identifier::Int(value)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Identifier {
        Identifier::String(value.to_string())
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Identifier {
        Identifier::String(value)
    }
}

/// One step of the identifier resolution chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IdStrategy {
    /// The property named by the resource's `id_field`.
    DeclaredField,
    /// A property literally named `id`.
    IdProperty,
    /// The last path segment of `_links.self.href`.
    SelfLink,
}

impl IdStrategy {
    /// Strategies in precedence order.
    pub(crate) const CHAIN: [IdStrategy; 3] = [
        IdStrategy::DeclaredField,
        IdStrategy::IdProperty,
        IdStrategy::SelfLink,
    ];

    pub(crate) fn resolve(self, resource: Option<&Resource>, record: &Record) -> Option<Identifier> {
        match self {
            IdStrategy::DeclaredField => {
                let id_field = resource.map(|r| r.id_field.as_str()).unwrap_or("");
                if id_field.is_empty() {
                    return None;
                }
                Identifier::from_value(record.get(id_field)?)
            }
            IdStrategy::IdProperty => Identifier::from_value(record.get("id")?),
            IdStrategy::SelfLink => {
                let href = hal::record_link("self", record)?;
                id_from_href(href).map(Identifier::from)
            }
        }
    }
}

/// Returns the last path segment of a self link, ignoring the query, the
/// fragment and one trailing slash.
fn id_from_href(href: &str) -> Option<&str> {
    let path = href.split(['?', '#']).next().unwrap_or(href);
    let path = path.strip_suffix('/').unwrap_or(path);
    let segment = path.rsplit('/').next()?;
    if segment.is_empty() {
        None
    } else {
        Some(segment)
    }
}
