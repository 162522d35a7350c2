//! Converting file values before they are written to the API.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hal_admin_core::{async_trait, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A file as held in a record payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileValue {
    #[serde(default)]
    pub title: String,

    /// Where the file can be fetched from, or its content as a data URL.
    #[serde(default)]
    pub src: String,

    /// Content picked by the user and not uploaded yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_file: Option<RawFile>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFile {
    #[serde(default)]
    pub name: String,

    /// MIME type.
    #[serde(default, rename = "type")]
    pub content_type: String,

    pub bytes: Vec<u8>,
}

/// Turns the file values of a write into something the API accepts.
///
/// `files` maps dot-paths of the record to the file found there. The
/// returned map holds the substitutes; a path missing from it is removed from
/// the payload before the write is sent.
#[async_trait]
pub trait FileUpload: std::fmt::Debug + Send + Sync + 'static {
    async fn upload(
        &self,
        resource: &str,
        files: IndexMap<String, FileValue>,
    ) -> Result<IndexMap<String, FileValue>>;
}

/// Inlines newly picked files as base64 data URLs.
///
/// Files without raw content are dropped, so the API only ever receives
/// files that were picked in this write.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFileUpload;

#[async_trait]
impl FileUpload for DefaultFileUpload {
    async fn upload(
        &self,
        resource: &str,
        files: IndexMap<String, FileValue>,
    ) -> Result<IndexMap<String, FileValue>> {
        let mut converted = IndexMap::with_capacity(files.len());

        for (path, file) in files {
            match &file.raw_file {
                Some(raw) => {
                    let src = data_url(raw);
                    converted.insert(
                        path,
                        FileValue {
                            title: file.title,
                            src,
                            raw_file: None,
                            extra: Map::new(),
                        },
                    );
                }
                None => {
                    tracing::debug!(resource, path = %path, "file has no new content; dropping");
                }
            }
        }

        Ok(converted)
    }
}

fn data_url(raw: &RawFile) -> String {
    let mime = if raw.content_type.is_empty() {
        "application/octet-stream"
    } else {
        &raw.content_type
    };
    format!("data:{};base64,{}", mime, STANDARD.encode(&raw.bytes))
}
