use serde_json::Value;
use std::collections::BTreeMap;
use url::form_urlencoded;

/// Query string parameters, merged in insertion order and encoded with
/// sorted keys.
///
/// Later inserts override earlier ones. Arrays become repeated keys, `null`
/// a bare key, nested objects their JSON text.
#[derive(Debug, Default)]
pub(super) struct Query {
    params: BTreeMap<String, Value>,
}

impl Query {
    pub(super) fn new() -> Query {
        Query::default()
    }

    pub(super) fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub(super) fn remove(&mut self, key: &str) -> &mut Self {
        self.params.remove(key);
        self
    }

    pub(super) fn extend<K, V>(&mut self, params: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in params {
            self.insert(key, value);
        }
        self
    }

    pub(super) fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.params {
            match value {
                Value::Array(items) => {
                    for item in items {
                        append(&mut serializer, key, item);
                    }
                }
                value => append(&mut serializer, key, value),
            }
        }
        serializer.finish()
    }

    /// Appends the encoded query to `url`.
    pub(super) fn to_url(&self, url: &str) -> String {
        let query = self.encode();
        if query.is_empty() {
            url.to_string()
        } else {
            format!("{}?{}", url, query)
        }
    }
}

fn append(serializer: &mut form_urlencoded::Serializer<'_, String>, key: &str, value: &Value) {
    match value {
        Value::Null => {
            serializer.append_key_only(key);
        }
        Value::String(s) => {
            serializer.append_pair(key, s);
        }
        other => {
            serializer.append_pair(key, &other.to_string());
        }
    }
}
