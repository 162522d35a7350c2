//! Helpers for reading the HAL conventions out of a decoded JSON document.
//!
//! Links live under `_links.<name>.href`, nested collections under
//! `_embedded.<name>`.

use serde_json::{Map, Value};

/// Returns `_links.<name>.href`, if present and a string.
pub fn link<'a>(name: &str, document: &'a Value) -> Option<&'a str> {
    document.get("_links")?.get(name)?.get("href")?.as_str()
}

/// Same as [`link`], for a record that was already unwrapped into a map.
pub fn record_link<'a>(name: &str, record: &'a Map<String, Value>) -> Option<&'a str> {
    record.get("_links")?.get(name)?.get("href")?.as_str()
}

/// Returns `_links.next.href`.
pub fn next_link(document: &Value) -> Option<&str> {
    link("next", document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn named_links() {
        let doc = json!({
            "_links": {
                "self": {"href": "/api/posts/?offset=0"},
                "next": {"href": "/api/posts/?offset=10"},
                "broken": {"title": "no href"},
            }
        });

        assert_eq!(link("self", &doc), Some("/api/posts/?offset=0"));
        assert_eq!(next_link(&doc), Some("/api/posts/?offset=10"));
        assert_eq!(link("broken", &doc), None);
        assert_eq!(link("prev", &doc), None);
    }

    #[test]
    fn no_links() {
        assert_eq!(next_link(&json!({"id": 1})), None);
        assert_eq!(next_link(&json!([1, 2])), None);
    }
}
