use std::fmt;

use crate::http::response::StatusCode;

/// A client-caused failure, mapped one-to-one onto an HTTP error status.
///
/// Returned by the parser and the resolver instead of a normal result. The
/// connection turns it into an error response; it never aborts a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// 400 - malformed request line or oversized request
    BadRequest,
    /// 403 - the file exists but may not be read, or the target leaves the root
    Forbidden,
    /// 404 - nothing to serve at the target
    NotFound,
    /// 405 - HEAD or POST
    MethodNotAllowed,
    /// 505 - version token other than HTTP/1.0 or HTTP/1.1
    VersionNotSupported,
}

impl ProtocolError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProtocolError::BadRequest => StatusCode::BadRequest,
            ProtocolError::Forbidden => StatusCode::Forbidden,
            ProtocolError::NotFound => StatusCode::NotFound,
            ProtocolError::MethodNotAllowed => StatusCode::MethodNotAllowed,
            ProtocolError::VersionNotSupported => StatusCode::VersionNotSupported,
        }
    }

    pub fn code(&self) -> u16 {
        self.status().as_u16()
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.status();
        write!(f, "{} {}", status.as_u16(), status.reason_phrase())
    }
}

impl std::error::Error for ProtocolError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_statuses() {
        assert_eq!(ProtocolError::BadRequest.code(), 400);
        assert_eq!(ProtocolError::Forbidden.code(), 403);
        assert_eq!(ProtocolError::NotFound.code(), 404);
        assert_eq!(ProtocolError::MethodNotAllowed.code(), 405);
        assert_eq!(ProtocolError::VersionNotSupported.code(), 505);
    }

    #[test]
    fn display_uses_reason_phrase() {
        assert_eq!(
            ProtocolError::VersionNotSupported.to_string(),
            "505 HTTP Version Not Supported"
        );
    }
}
