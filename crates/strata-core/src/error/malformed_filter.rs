use super::Error;

/// Error when a filter description cannot be compiled.
///
/// This occurs when:
/// - A special filter node carries zero or more than one reserved key
/// - An operator payload has the wrong shape (e.g. `$in` without a list)
/// - A `$raw` query references a placeholder with no binding
///
/// These are caller errors and are never retried.
#[derive(Debug)]
pub(super) struct MalformedFilter {
    pub(super) message: Box<str>,
}

impl std::error::Error for MalformedFilter {}

impl core::fmt::Display for MalformedFilter {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "malformed filter: {}", self.message)
    }
}

impl Error {
    /// Creates a malformed filter error.
    pub fn malformed_filter(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MalformedFilter(MalformedFilter {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a malformed filter error.
    pub fn is_malformed_filter(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MalformedFilter(_))
    }
}
