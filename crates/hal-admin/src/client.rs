//! The HTTP transport the data provider talks through.
//!
//! The provider never opens connections itself. It builds [`Request`]s and
//! hands them to an injected [`HttpClient`], which is free to add
//! authentication, retries or timeouts.

use hal_admin_core::{async_trait, Result};
use serde_json::Value;
use std::fmt;

#[async_trait]
pub trait HttpClient: fmt::Debug + Send + Sync + 'static {
    /// Sends one request and returns the response, whatever its status.
    ///
    /// Only transport failures (connection refused, TLS, timeouts) are
    /// reported as errors. Status handling is up to the caller.
    async fn send(&self, request: Request) -> Result<Response>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Other(String),
}

impl Method {
    /// Parses a verb name, case-insensitively.
    pub fn from_name(name: &str) -> Method {
        match name.to_ascii_uppercase().as_str() {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "PATCH" => Method::Patch,
            "DELETE" => Method::Delete,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Other(name) => name,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request issued by the data provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: String,

    /// Pre-serialized JSON body. Only writes carry one.
    pub body: Option<String>,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Request {
        Request {
            method: Method::Get,
            url: url.into(),
            body: None,
        }
    }

    pub fn with_json(method: Method, url: impl Into<String>, body: &Value) -> Request {
        Request {
            method,
            url: url.into(),
            body: Some(body.to_string()),
        }
    }
}

/// Response headers with case-insensitive lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Headers {
        Headers::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.push((name.into(), value.into()));
        self
    }

    /// Returns the first value of the header `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Headers {
        Headers {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A response as returned by an [`HttpClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub headers: Headers,

    /// Raw body text.
    pub body: String,

    /// The body decoded as JSON, `Value::Null` when empty or not JSON.
    pub json: Value,
}

impl Response {
    pub fn new(status: u16, headers: Headers, body: impl Into<String>) -> Response {
        let body = body.into();
        let json = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body).unwrap_or(Value::Null)
        };

        Response {
            status,
            headers,
            body,
            json,
        }
    }

    /// A response whose body is `json`.
    pub fn json(status: u16, headers: Headers, json: Value) -> Response {
        Response {
            status,
            headers,
            body: json.to_string(),
            json,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
