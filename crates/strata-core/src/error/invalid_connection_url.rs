use super::Error;

/// Error when a connection URL does not name a database strata can reach.
///
/// This occurs when:
/// - The URL does not parse
/// - The scheme has no driver, or its cargo feature is disabled
/// - A required part (host, database name) is missing
#[derive(Debug)]
pub(super) struct InvalidConnectionUrl {
    pub(super) reason: Box<str>,
}

impl std::error::Error for InvalidConnectionUrl {}

impl core::fmt::Display for InvalidConnectionUrl {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid connection URL: {}", self.reason)
    }
}

impl Error {
    pub fn invalid_connection_url(reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidConnectionUrl(
            InvalidConnectionUrl {
                reason: reason.into().into(),
            },
        ))
    }

    pub fn is_invalid_connection_url(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidConnectionUrl(_))
    }
}
