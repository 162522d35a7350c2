use super::Error;

/// Error when no identifier can be resolved for a record.
#[derive(Debug)]
pub(super) struct IdentifierNotFoundError {
    resource: Box<str>,
}

impl std::error::Error for IdentifierNotFoundError {}

impl core::fmt::Display for IdentifierNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "could not find the identifier of a `{}` record",
            self.resource
        )
    }
}

impl Error {
    /// Creates an identifier-not-found error.
    ///
    /// Raised when the record has neither the declared id field, an `id`
    /// property nor a usable self link, and no fallback was supplied.
    pub fn identifier_not_found(resource: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::IdentifierNotFound(IdentifierNotFoundError {
            resource: resource.into().into(),
        }))
    }

    /// Returns `true` if this error is an identifier-not-found error.
    pub fn is_identifier_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::IdentifierNotFound(_))
    }
}
