use super::{into_record, path, DataProvider};
use crate::client::{Method, Request, Response};
use crate::upload::FileValue;
use futures::future;
use hal_admin_core::{Error, Identifier, Record, Result};
use indexmap::IndexMap;
use serde_json::{Map, Value};

impl DataProvider {
    /// Creates a record with `POST` on the collection URL.
    pub async fn create(&self, resource: &str, mut data: Record) -> Result<Record> {
        let url = self.schema.resource_url(resource)?;
        self.upload_files(resource, &mut data).await?;

        let response = self
            .write(Request::with_json(Method::Post, url, &Value::Object(data)))
            .await?;

        let mut record = into_record(response.json);
        let id = self.schema.resolve_id(resource, &record, None)?;
        record.insert("id".to_string(), id.to_value());
        Ok(record)
    }

    /// Updates a record with the resource's update verb.
    pub async fn update(&self, resource: &str, id: &Identifier, mut data: Record) -> Result<Record> {
        let url = self.record_url(resource, id)?;
        let method = Method::from_name(self.schema.resource_update_method(resource));
        self.upload_files(resource, &mut data).await?;

        let response = self
            .write(Request::with_json(method, url, &Value::Object(data)))
            .await?;

        let mut record = into_record(response.json);
        let id = self.schema.resolve_id(resource, &record, Some(id))?;
        record.insert("id".to_string(), id.to_value());
        Ok(record)
    }

    /// Applies the same update to every record in `ids`, one request per
    /// record.
    ///
    /// All requests run to completion. The first failure, in `ids` order,
    /// fails the batch; updates that already succeeded stay applied.
    pub async fn update_many(
        &self,
        resource: &str,
        ids: &[Identifier],
        mut data: Record,
    ) -> Result<Vec<Identifier>> {
        let url = self.schema.resource_url(resource)?;
        let method = Method::from_name(self.schema.resource_update_method(resource));
        self.upload_files(resource, &mut data).await?;

        let body = Value::Object(data);
        let updates = ids.iter().map(|id| {
            let request = Request::with_json(method.clone(), format!("{}/{}", url, id), &body);
            async move {
                let response = self.write(request).await?;
                self.schema
                    .resolve_id(resource, &into_record(response.json), Some(id))
            }
        });

        future::join_all(updates).await.into_iter().collect()
    }

    /// Deletes a record, returning the decoded response body.
    pub async fn delete(&self, resource: &str, id: &Identifier) -> Result<Value> {
        let url = self.record_url(resource, id)?;
        let response = self.write(delete_request(url)).await?;
        Ok(response.json)
    }

    /// Deletes every record in `ids`, one request per record.
    ///
    /// Failure semantics match [`DataProvider::update_many`].
    pub async fn delete_many(&self, resource: &str, ids: &[Identifier]) -> Result<Vec<Identifier>> {
        let url = self.schema.resource_url(resource)?;

        let deletes = ids.iter().map(|id| {
            let request = delete_request(format!("{}/{}", url, id));
            async move {
                self.write(request).await?;
                Ok(id.clone())
            }
        });

        future::join_all(deletes).await.into_iter().collect()
    }

    /// Passes the file values of `data` through the upload adapter.
    ///
    /// Values at the resource's file paths are replaced with the adapter's
    /// substitutes. Paths the adapter dropped are removed from `data`. Values
    /// that are not file objects, such as `null` or an existing URL, are left
    /// as they are.
    pub async fn upload_files(&self, resource: &str, data: &mut Record) -> Result<()> {
        let mut files = IndexMap::new();
        let paths = self
            .schema
            .resource_file_inputs(resource)
            .iter()
            .flat_map(|declared| path::expand(data, declared));
        for path in paths {
            let Some(value) = path::get(data, &path) else {
                continue;
            };
            match serde_json::from_value::<FileValue>(value.clone()) {
                Ok(file) => {
                    files.insert(path, file);
                }
                Err(_) => {
                    tracing::debug!(resource, path = %path, "not a file object; sending as is");
                }
            }
        }

        if files.is_empty() {
            return Ok(());
        }

        let picked: Vec<String> = files.keys().cloned().collect();
        let uploaded = self
            .upload
            .upload(resource, files)
            .await
            .map_err(|err| err.context(Error::upload(resource, "the upload adapter failed")))?;

        let mut dropped = vec![];
        for path in picked {
            match uploaded.get(&path) {
                Some(file) => {
                    let value = serde_json::to_value(file).map_err(anyhow::Error::from)?;
                    path::set(data, &path, value);
                }
                None => {
                    tracing::debug!(resource, path = %path, "upload adapter dropped the file");
                    dropped.push(path);
                }
            }
        }

        // Last first, so removing an array element keeps earlier indices valid.
        for path in dropped.iter().rev() {
            path::remove(data, path);
        }
        Ok(())
    }

    /// Sends a write, remapping `422` responses to validation errors.
    async fn write(&self, request: Request) -> Result<Response> {
        self.send(request).await.map_err(into_validation_error)
    }
}

fn delete_request(url: String) -> Request {
    Request::with_json(Method::Delete, url, &Value::Object(Map::new()))
}

fn into_validation_error(err: Error) -> Error {
    if !err.is_http() || err.http_status() != Some(422) {
        return err;
    }

    let body = err.http_body().cloned().unwrap_or(Value::Null);
    let description = body
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let errors = match body.get("detail") {
        Some(Value::Object(detail)) => detail.clone(),
        _ => Map::new(),
    };

    Error::validation(description, errors)
}
