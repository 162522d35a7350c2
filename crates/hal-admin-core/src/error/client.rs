use super::Error;

/// Error raised by an HTTP client before a response was received.
#[derive(Debug)]
pub(super) struct ClientError {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for ClientError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        // Display the error and walk its source chain
        core::fmt::Display::fmt(&self.inner, f)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates an error from an HTTP client failure.
    ///
    /// This is the preferred way to convert transport errors (connection refused,
    /// TLS failures, timeouts, ...) into hal-admin errors.
    pub fn client(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::Client(ClientError {
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error is an HTTP client error.
    pub fn is_client(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Client(_))
    }
}
