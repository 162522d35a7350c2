use super::Error;

/// Error when a list response does not carry a usable `X-Total-Count` header.
#[derive(Debug)]
pub(super) enum TotalCountError {
    Missing,
    Invalid { value: Box<str> },
}

impl std::error::Error for TotalCountError {}

impl core::fmt::Display for TotalCountError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            TotalCountError::Missing => f.write_str(
                "the X-Total-Count header is missing or empty in the HTTP response; \
                 list responses must carry it with the total number of results \
                 (when using CORS, expose it with Access-Control-Expose-Headers)",
            ),
            TotalCountError::Invalid { value } => {
                write!(f, "invalid X-Total-Count header value `{}`", value)
            }
        }
    }
}

impl Error {
    /// Creates a missing total count error.
    pub fn missing_total_count() -> Error {
        Error::from(super::ErrorKind::TotalCount(TotalCountError::Missing))
    }

    /// Creates an error for a total count header that is not an integer.
    pub fn invalid_total_count(value: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::TotalCount(TotalCountError::Invalid {
            value: value.into().into(),
        }))
    }

    /// Returns `true` if the `X-Total-Count` header was missing or empty.
    pub fn is_missing_total_count(&self) -> bool {
        matches!(
            self.kind(),
            super::ErrorKind::TotalCount(TotalCountError::Missing)
        )
    }
}
