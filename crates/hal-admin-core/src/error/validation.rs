use super::Error;

/// Error when the server rejects a write with `422 Unprocessable Entity`.
///
/// Carries the human readable description and the per-field error map taken
/// from the response body's `detail`, so a form can attach each message to
/// the field that caused it.
#[derive(Debug)]
pub(super) struct ValidationError {
    description: Box<str>,
    errors: serde_json::Map<String, serde_json::Value>,
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("validation failed")?;
        if !self.description.is_empty() {
            write!(f, ": {}", self.description)?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates a validation error.
    pub fn validation(
        description: impl Into<String>,
        errors: serde_json::Map<String, serde_json::Value>,
    ) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError {
            description: description.into().into(),
            errors,
        }))
    }

    /// Returns `true` if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Validation(_))
    }

    /// Returns the description of a validation error in the context chain.
    pub fn validation_description(&self) -> Option<&str> {
        self.find_kind(|kind| match kind {
            super::ErrorKind::Validation(err) => Some(&*err.description),
            _ => None,
        })
    }

    /// Returns the per-field errors of a validation error in the context chain.
    pub fn validation_errors(&self) -> Option<&serde_json::Map<String, serde_json::Value>> {
        self.find_kind(|kind| match kind {
            super::ErrorKind::Validation(err) => Some(&err.errors),
            _ => None,
        })
    }
}
