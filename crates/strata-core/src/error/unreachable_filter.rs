use super::Error;

/// Error when a reserved filter key has no compiler branch, or a deferred
/// branch reaches the serializer unresolved.
///
/// This indicates a gap in the compiler rather than bad input.
#[derive(Debug)]
pub(super) struct UnreachableFilter {
    pub(super) key: Box<str>,
}

impl std::error::Error for UnreachableFilter {}

impl core::fmt::Display for UnreachableFilter {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "no filter branch handles `{}`", self.key)
    }
}

impl Error {
    /// Creates an unreachable filter error for the given reserved key.
    pub fn unreachable_filter(key: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnreachableFilter(UnreachableFilter {
            key: key.into().into(),
        }))
    }

    /// Returns `true` if this error is an unreachable filter error.
    pub fn is_unreachable_filter(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnreachableFilter(_))
    }
}
