mod adhoc;
mod client;
mod http;
mod identifier_not_found;
mod invalid_descriptor;
mod total_count;
mod unknown_resource;
mod upload;
mod validation;

use adhoc::AdhocError;
use client::ClientError;
use http::HttpError;
use identifier_not_found::IdentifierNotFoundError;
use invalid_descriptor::InvalidDescriptorError;
use std::sync::Arc;
use total_count::TotalCountError;
use unknown_resource::UnknownResourceError;
use upload::UploadError;
use validation::ValidationError;

/// Returns early with an ad-hoc error built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Builds an ad-hoc error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur while talking to a HAL API.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context is shown first,
    /// followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let kind = match consequent.inner {
            Some(inner) => match Arc::try_unwrap(inner) {
                Ok(inner) => inner.kind,
                Err(shared) => ErrorKind::Adhoc(AdhocError::new(shared.kind.to_string())),
            },
            None => ErrorKind::Unknown,
        };
        Error {
            inner: Some(Arc::new(ErrorInner {
                kind,
                cause: Some(self),
            })),
        }
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    /// Finds the first error in the context chain matching `f`.
    fn find_kind<'a, T>(&'a self, f: impl Fn(&'a ErrorKind) -> Option<T>) -> Option<T> {
        self.chain().find_map(|err| f(err.kind()))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Client(err) => Some(err),
            ErrorKind::InvalidDescriptor(err) => Some(err),
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    Client(ClientError),
    Http(HttpError),
    IdentifierNotFound(IdentifierNotFoundError),
    InvalidDescriptor(InvalidDescriptorError),
    TotalCount(TotalCountError),
    UnknownResource(UnknownResourceError),
    Upload(UploadError),
    Validation(ValidationError),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            Client(err) => core::fmt::Display::fmt(err, f),
            Http(err) => core::fmt::Display::fmt(err, f),
            IdentifierNotFound(err) => core::fmt::Display::fmt(err, f),
            InvalidDescriptor(err) => core::fmt::Display::fmt(err, f),
            TotalCount(err) => core::fmt::Display::fmt(err, f),
            UnknownResource(err) => core::fmt::Display::fmt(err, f),
            Upload(err) => core::fmt::Display::fmt(err, f),
            Validation(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown hal-admin error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(err: std::num::ParseIntError) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_size() {
        // Ensure Error stays at one word (size of pointer/Arc)
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn error_from_args() {
        let err = Error::from_args(format_args!("test error: {}", 42));
        assert_eq!(err.to_string(), "test error: 42");
    }

    #[test]
    fn error_chain_display() {
        let root = Error::from_args(format_args!("root cause"));
        let mid = Error::from_args(format_args!("middle context"));
        let top = Error::from_args(format_args!("top context"));

        let chained = root.context(mid).context(top);
        assert_eq!(
            chained.to_string(),
            "top context: middle context: root cause"
        );
    }

    #[test]
    fn anyhow_bridge() {
        let anyhow_err = anyhow::anyhow!("something failed");
        let our_err: Error = anyhow_err.into();
        assert_eq!(our_err.to_string(), "something failed");
    }

    #[test]
    fn unknown_resource() {
        let err = Error::unknown_resource("posts");
        assert!(err.is_unknown_resource());
        assert_eq!(err.to_string(), "unknown resource `posts`");
    }

    #[test]
    fn identifier_not_found() {
        let err = Error::identifier_not_found("posts");
        assert!(err.is_identifier_not_found());
        assert_eq!(
            err.to_string(),
            "could not find the identifier of a `posts` record"
        );
    }

    #[test]
    fn missing_total_count() {
        let err = Error::missing_total_count();
        assert!(err.is_missing_total_count());
        assert!(err.to_string().starts_with("the X-Total-Count header is missing"));
    }

    #[test]
    fn invalid_total_count_is_not_missing() {
        let err = Error::invalid_total_count("abc");
        assert!(!err.is_missing_total_count());
        assert_eq!(err.to_string(), "invalid X-Total-Count header value `abc`");
    }

    #[test]
    fn http_error_status() {
        let err = Error::http(404, "Not Found", serde_json::Value::Null);
        assert!(err.is_http());
        assert_eq!(err.http_status(), Some(404));
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn validation_error_fields() {
        let mut errors = serde_json::Map::new();
        errors.insert("name".into(), serde_json::json!(["too short"]));
        let err = Error::validation("bad", errors);

        assert!(err.is_validation());
        assert_eq!(err.http_status(), Some(422));
        assert_eq!(err.validation_description(), Some("bad"));
        assert_eq!(
            err.validation_errors().and_then(|e| e.get("name")),
            Some(&serde_json::json!(["too short"]))
        );
        assert_eq!(err.to_string(), "validation failed: bad");
    }

    #[test]
    fn validation_error_found_through_context() {
        let err = Error::validation("bad", serde_json::Map::new())
            .context(err!("update of `posts` 1 failed"));

        assert!(!err.is_validation());
        assert_eq!(err.validation_description(), Some("bad"));
        assert_eq!(err.to_string(), "update of `posts` 1 failed: validation failed: bad");
    }
}
