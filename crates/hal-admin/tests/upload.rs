mod support;

use hal_admin::{Error, FileUpload, FileValue, Method, Record, Result};
use hal_admin_core::async_trait;
use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use support::*;

fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

/// Replaces every file with a CDN URL and records what it was given.
#[derive(Debug, Default, Clone)]
struct CdnUpload {
    calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
    fail: bool,
}

#[async_trait]
impl FileUpload for CdnUpload {
    async fn upload(
        &self,
        resource: &str,
        files: IndexMap<String, FileValue>,
    ) -> Result<IndexMap<String, FileValue>> {
        self.calls
            .lock()
            .unwrap()
            .push((resource.to_string(), files.keys().cloned().collect()));

        if self.fail {
            return Err(Error::from(anyhow::anyhow!("storage quota exceeded")));
        }

        Ok(files
            .into_iter()
            .map(|(path, file)| {
                let src = format!("https://cdn.test/{}", path);
                (path, FileValue { src, raw_file: None, ..file })
            })
            .collect())
    }
}

fn new_user() -> Record {
    record(json!({
        "name": "Ann",
        "avatar": {
            "title": "me.png",
            "src": "blob:1",
            "rawFile": {"name": "me.png", "type": "image/png", "bytes": [104, 105]},
        },
        "profile": {
            "city": "Oslo",
            "photo": {"title": "old.jpg", "src": "https://cdn.test/old.jpg"},
        },
    }))
}

#[tokio::test]
async fn default_upload_inlines_new_files_and_drops_the_rest() {
    let client = MockClient::new();
    client.on(Method::Post, "http://api.test/users", status(201, json!({"uid": "u-1"})));

    provider(&client).create("users", new_user()).await.unwrap();

    assert_eq!(
        client.only_body(),
        json!({
            "name": "Ann",
            "avatar": {"title": "me.png", "src": "data:image/png;base64,aGk="},
            "profile": {"city": "Oslo"},
        })
    );
}

#[tokio::test]
async fn custom_adapter_substitutes_files() {
    let client = MockClient::new();
    client.on(Method::Patch, "http://api.test/users/u-1", ok(json!({"uid": "u-1"})));

    let upload = CdnUpload::default();
    let provider = provider(&client).with_upload(Arc::new(upload.clone()));

    provider
        .update("users", &hal_admin::Identifier::from("u-1"), new_user())
        .await
        .unwrap();

    assert_eq!(
        *upload.calls.lock().unwrap(),
        [(
            "users".to_string(),
            vec!["avatar".to_string(), "profile.photo".to_string()]
        )]
    );

    let body = client.only_body();
    assert_eq!(body["avatar"], json!({"title": "me.png", "src": "https://cdn.test/avatar"}));
    assert_eq!(
        body["profile"],
        json!({"city": "Oslo", "photo": {"title": "old.jpg", "src": "https://cdn.test/profile.photo"}})
    );
}

#[tokio::test]
async fn values_that_are_not_files_skip_the_adapter() {
    let client = MockClient::new();
    client.on(Method::Post, "http://api.test/users", status(201, json!({"uid": "u-2"})));

    let upload = CdnUpload::default();
    let provider = provider(&client).with_upload(Arc::new(upload.clone()));

    provider
        .create("users", record(json!({"name": "Bo", "avatar": null})))
        .await
        .unwrap();

    assert!(upload.calls.lock().unwrap().is_empty());
    assert_eq!(client.only_body(), json!({"name": "Bo", "avatar": null}));
}

#[tokio::test]
async fn resources_without_file_fields_skip_the_adapter() {
    let client = MockClient::new();
    client.on(Method::Post, "http://api.test/posts", status(201, json!({"id": 1})));

    let upload = CdnUpload::default();
    let provider = provider(&client).with_upload(Arc::new(upload.clone()));

    provider
        .create("posts", record(json!({"avatar": {"title": "x", "src": "y"}})))
        .await
        .unwrap();

    assert!(upload.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn adapter_failures_abort_the_write() {
    let client = MockClient::new();

    let upload = CdnUpload {
        fail: true,
        ..CdnUpload::default()
    };
    let provider = provider(&client).with_upload(Arc::new(upload));

    let err = provider.create("users", new_user()).await.unwrap_err();

    assert!(err.is_upload());
    assert_eq!(
        err.to_string(),
        "file upload for `users` failed: the upload adapter failed: storage quota exceeded"
    );
    assert!(client.requests().is_empty());
}

fn user_with_gallery() -> Record {
    record(json!({
        "name": "Ann",
        "gallery": [
            {
                "caption": "beach",
                "image": {
                    "title": "a.png",
                    "src": "blob:a",
                    "rawFile": {"name": "a.png", "type": "image/png", "bytes": [1, 2, 3]},
                },
            },
            {"caption": "old", "image": {"title": "b.jpg", "src": "https://cdn.test/b.jpg"}},
            {"caption": "none"},
        ],
    }))
}

#[tokio::test]
async fn files_inside_array_items_are_uploaded() {
    let client = MockClient::new();
    client.on(Method::Post, "http://api.test/users", status(201, json!({"uid": "u-3"})));

    provider(&client).create("users", user_with_gallery()).await.unwrap();

    assert_eq!(
        client.only_body(),
        json!({
            "name": "Ann",
            "gallery": [
                {"caption": "beach", "image": {"title": "a.png", "src": "data:image/png;base64,AQID"}},
                {"caption": "old"},
                {"caption": "none"},
            ],
        })
    );
}

#[tokio::test]
async fn array_items_reach_the_adapter_by_index() {
    let client = MockClient::new();
    client.on(Method::Post, "http://api.test/users", status(201, json!({"uid": "u-3"})));

    let upload = CdnUpload::default();
    let provider = provider(&client).with_upload(Arc::new(upload.clone()));

    provider.create("users", user_with_gallery()).await.unwrap();

    assert_eq!(
        *upload.calls.lock().unwrap(),
        [(
            "users".to_string(),
            vec!["gallery.0.image".to_string(), "gallery.1.image".to_string()]
        )]
    );

    let body = client.only_body();
    assert_eq!(
        body["gallery"][0]["image"],
        json!({"title": "a.png", "src": "https://cdn.test/gallery.0.image"})
    );
    assert_eq!(
        body["gallery"][1]["image"],
        json!({"title": "b.jpg", "src": "https://cdn.test/gallery.1.image"})
    );
    assert!(!body.to_string().contains("rawFile"));
}
