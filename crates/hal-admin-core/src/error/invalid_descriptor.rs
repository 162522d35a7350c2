use super::Error;

/// Error when the descriptor document cannot be parsed.
#[derive(Debug)]
pub(super) struct InvalidDescriptorError {
    inner: serde_json::Error,
}

impl std::error::Error for InvalidDescriptorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.inner)
    }
}

impl core::fmt::Display for InvalidDescriptorError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid descriptor document: {}", self.inner)
    }
}

impl Error {
    /// Creates an invalid descriptor error.
    pub fn invalid_descriptor(err: serde_json::Error) -> Error {
        Error::from(super::ErrorKind::InvalidDescriptor(InvalidDescriptorError {
            inner: err,
        }))
    }

    /// Returns `true` if this error is an invalid descriptor error.
    pub fn is_invalid_descriptor(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidDescriptor(_))
    }
}
