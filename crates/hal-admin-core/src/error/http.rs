use super::Error;

/// Error when the server answers with a non-successful status.
#[derive(Debug)]
pub(super) struct HttpError {
    status: u16,
    message: Box<str>,
    body: serde_json::Value,
}

impl std::error::Error for HttpError {}

impl core::fmt::Display for HttpError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates an HTTP status error.
    ///
    /// `body` is the decoded response body, or `Value::Null` when the body was
    /// empty or not JSON.
    pub fn http(status: u16, message: impl Into<String>, body: serde_json::Value) -> Error {
        Error::from(super::ErrorKind::Http(HttpError {
            status,
            message: message.into().into(),
            body,
        }))
    }

    /// Returns `true` if this error is an HTTP status error.
    pub fn is_http(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Http(_))
    }

    /// Returns the HTTP status carried by this error or any error it wraps.
    ///
    /// Remapped validation errors report `422`.
    pub fn http_status(&self) -> Option<u16> {
        self.find_kind(|kind| match kind {
            super::ErrorKind::Http(err) => Some(err.status),
            super::ErrorKind::Validation(_) => Some(422),
            _ => None,
        })
    }

    /// Returns the decoded body of an HTTP status error.
    pub fn http_body(&self) -> Option<&serde_json::Value> {
        self.find_kind(|kind| match kind {
            super::ErrorKind::Http(err) => Some(&err.body),
            _ => None,
        })
    }
}
