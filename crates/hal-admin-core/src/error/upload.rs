use super::Error;

/// Error raised by a file upload adapter.
#[derive(Debug)]
pub(super) struct UploadError {
    resource: Box<str>,
    message: Box<str>,
}

impl std::error::Error for UploadError {}

impl core::fmt::Display for UploadError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "file upload for `{}` failed: {}",
            self.resource, self.message
        )
    }
}

impl Error {
    /// Creates a file upload error.
    pub fn upload(resource: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Upload(UploadError {
            resource: resource.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a file upload error.
    pub fn is_upload(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Upload(_))
    }
}
