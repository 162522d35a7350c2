//! Translates admin data operations into HAL HTTP requests.

mod params;
pub use params::{
    GetManyParams, GetManyReferenceParams, ListParams, ListResult, Pagination, ReferenceResult,
};

mod path;
mod query;
mod read;
mod total_count;
mod write;

use crate::client::{HttpClient, Request, Response};
use crate::upload::{DefaultFileUpload, FileUpload};
use hal_admin_core::{Error, Identifier, Record, Result, Schema};
use serde_json::Value;
use std::sync::Arc;

/// Runs list, read and write operations against the API described by a
/// [`Schema`].
///
/// The provider holds no mutable state. Cloning is cheap and clones share the
/// schema, the HTTP client and the upload adapter.
#[derive(Debug, Clone)]
pub struct DataProvider {
    schema: Arc<Schema>,
    client: Arc<dyn HttpClient>,
    upload: Arc<dyn FileUpload>,
}

impl DataProvider {
    /// Creates a provider using [`DefaultFileUpload`] for file fields.
    pub fn new(schema: Arc<Schema>, client: Arc<dyn HttpClient>) -> DataProvider {
        DataProvider {
            schema,
            client,
            upload: Arc::new(DefaultFileUpload),
        }
    }

    /// Replaces the file upload adapter.
    pub fn with_upload(mut self, upload: Arc<dyn FileUpload>) -> DataProvider {
        self.upload = upload;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Sends `request`, turning non-2xx responses into [`Error::http`].
    async fn send(&self, request: Request) -> Result<Response> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        let response = self.client.send(request).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(status_error(&response))
        }
    }

    async fn fetch(&self, url: &str) -> Result<Response> {
        self.send(Request::get(url)).await
    }

    fn record_url(&self, resource: &str, id: &Identifier) -> Result<String> {
        Ok(format!("{}/{}", self.schema.resource_url(resource)?, id))
    }
}

fn status_error(response: &Response) -> Error {
    let message = ["message", "description"]
        .iter()
        .find_map(|key| response.json.get(key).and_then(Value::as_str))
        .unwrap_or_default();

    tracing::debug!(status = response.status, message, "request failed");
    Error::http(response.status, message, response.json.clone())
}

/// Takes the body of a single-record response as a record.
fn into_record(json: Value) -> Record {
    match json {
        Value::Object(record) => record,
        Value::Null => Record::new(),
        other => {
            tracing::warn!(body = %other, "expected a JSON object in the response body");
            Record::new()
        }
    }
}
