use crate::http::error::ProtocolError;
use crate::http::request::Version;

/// HTTP status codes the server can produce.
///
/// - `Ok` (200): file served
/// - `BadRequest` (400): malformed request
/// - `Forbidden` (403): file not readable or outside the document root
/// - `NotFound` (404): nothing at the target
/// - `MethodNotAllowed` (405): HEAD or POST
/// - `VersionNotSupported` (505): unknown protocol version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 505 HTTP Version Not Supported
    VersionNotSupported,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use uhttp::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::VersionNotSupported.as_u16(), 505);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::VersionNotSupported => 505,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use uhttp::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::VersionNotSupported => "HTTP Version Not Supported",
        }
    }
}

/// A complete HTTP response ready to be serialized.
///
/// Headers keep their insertion order; clients of this server may depend on
/// the exact byte layout.
#[derive(Debug)]
pub struct Response {
    /// Version written in the status line
    pub version: Version,
    /// The HTTP status code
    pub status: StatusCode,
    /// Headers in the order they are written
    pub headers: Vec<(String, String)>,
    /// Response body as bytes
    pub body: Vec<u8>,
    /// Append CRLFCRLF after the body
    pub trailer: bool,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .version(Version::Http10)
///     .header("Content-Type", "text/plain")
///     .body(b"hi".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    version: Version,
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    trailer: bool,
}

impl ResponseBuilder {
    /// Creates a new HTTP/1.1 response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            version: Version::Http11,
            status,
            headers: Vec::new(),
            body: Vec::new(),
            trailer: false,
        }
    }

    pub fn version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// Appends a header after those already added.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn trailer(mut self, trailer: bool) -> Self {
        self.trailer = trailer;
        self
    }

    /// Adds the `Connection` header HTTP/1.1 responses carry.
    ///
    /// HTTP/1.0 responses never get one.
    pub fn connection(self, keep_alive: bool) -> Self {
        match self.version {
            Version::Http11 if keep_alive => self.header("Connection", "Keep-alive"),
            Version::Http11 => self.header("Connection", "Close"),
            Version::Http10 => self,
        }
    }

    pub fn build(self) -> Response {
        Response {
            version: self.version,
            status: self.status,
            headers: self.headers,
            body: self.body,
            trailer: self.trailer,
        }
    }
}

impl Response {
    /// A 200 OK carrying a full file body.
    ///
    /// Headers are `Content-Type`, `Content-Length`, then `Connection` for
    /// HTTP/1.1 only. `Content-Length` is the length of `body`.
    pub fn success(
        version: Version,
        keep_alive: bool,
        content_type: &str,
        body: Vec<u8>,
        trailer: bool,
    ) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .version(version)
            .header("Content-Type", content_type)
            .header("Content-Length", body.len().to_string())
            .connection(keep_alive)
            .body(body)
            .trailer(trailer)
            .build()
    }

    /// An error response without a body.
    ///
    /// When the request version never parsed, the status line says HTTP/1.1
    /// and no `Connection` header is written.
    pub fn error(version: Option<Version>, keep_alive: bool, err: ProtocolError) -> Self {
        let builder = ResponseBuilder::new(err.status());
        match version {
            Some(version) => builder.version(version).connection(keep_alive).build(),
            None => builder.build(),
        }
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
