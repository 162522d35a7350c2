mod config;
pub use config::ClientConfig;

use hal_admin::{async_trait, Error, Headers, HttpClient, Request, Response, Result};
use reqwest::header::CONTENT_TYPE;
use url::Url;

/// [`HttpClient`] backed by a [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a client with the default [`ClientConfig`].
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: config.build()?,
        })
    }

    /// Wraps an already configured [`reqwest::Client`].
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn send(&self, request: Request) -> Result<Response> {
        let url = Url::parse(&request.url).map_err(Error::client)?;
        let method =
            reqwest::Method::from_bytes(request.method.as_str().as_bytes()).map_err(Error::client)?;

        let mut builder = self.client.request(method, url);
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder.send().await.map_err(Error::client)?;
        let status = response.status().as_u16();
        let headers = headers(response.headers());
        let body = response.text().await.map_err(Error::client)?;

        tracing::trace!(status, bytes = body.len(), "received response");
        Ok(Response::new(status, headers, body))
    }
}

/// Copies response headers, skipping values that are not visible ASCII.
fn headers(map: &reqwest::header::HeaderMap) -> Headers {
    map.iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hal_admin::Method;
    use reqwest::header::{HeaderMap, HeaderValue};

    #[test]
    fn response_headers_are_copied() {
        let mut map = HeaderMap::new();
        map.insert("x-total-count", HeaderValue::from_static("25"));
        map.insert("x-binary", HeaderValue::from_bytes(b"\xff").unwrap());

        let headers = headers(&map);
        assert_eq!(headers.get("X-Total-Count"), Some("25"));
        assert_eq!(headers.get("x-binary"), None);
    }

    #[tokio::test]
    async fn relative_urls_are_rejected_before_sending() {
        let client = ReqwestClient::new().unwrap();
        let err = client
            .send(Request {
                method: Method::Get,
                url: "/api/posts".to_string(),
                body: None,
            })
            .await
            .unwrap_err();

        assert!(err.is_client());
    }
}
