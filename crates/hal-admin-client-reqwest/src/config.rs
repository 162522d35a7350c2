use hal_admin::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use std::time::Duration;

/// Configuration of the [`ReqwestClient`](crate::ReqwestClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Headers sent with every request.
    pub headers: Vec<(String, String)>,

    /// Deadline for a whole request, response body included.
    pub timeout: Option<Duration>,

    /// Sent as `Authorization: Bearer <token>`.
    pub bearer_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            headers: vec![
                ("Accept".to_string(), "application/json".to_string()),
                ("X-Requested-With".to_string(), "XMLHttpRequest".to_string()),
            ],
            timeout: None,
            bearer_token: None,
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header, replacing any default of the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub(crate) fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(Error::client)?;
            let value = HeaderValue::from_str(value).map_err(Error::client)?;
            headers.insert(name, value);
        }

        if let Some(token) = &self.bearer_token {
            let mut value =
                HeaderValue::from_str(&format!("Bearer {}", token)).map_err(Error::client)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    pub(crate) fn build(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder().default_headers(self.default_headers()?);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(Error::client)
    }
}
