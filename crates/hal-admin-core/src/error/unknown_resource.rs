use super::Error;

/// Error when a resource name is not declared in the descriptor document.
#[derive(Debug)]
pub(super) struct UnknownResourceError {
    name: Box<str>,
}

impl std::error::Error for UnknownResourceError {}

impl core::fmt::Display for UnknownResourceError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unknown resource `{}`", self.name)
    }
}

impl Error {
    /// Creates an unknown resource error.
    pub fn unknown_resource(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownResource(UnknownResourceError {
            name: name.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown resource error.
    pub fn is_unknown_resource(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownResource(_))
    }
}
