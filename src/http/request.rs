/// HTTP request methods.
///
/// Only GET is served. HEAD and POST are recognized by the parser solely so
/// they can be refused with 405 Method Not Allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// # Example
    ///
    /// ```
    /// # use uhttp::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
        }
    }
}

/// Protocol versions the server speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    Http10,
    Http11,
}

impl Version {
    /// Parses the exact version token of a request line.
    ///
    /// ```
    /// # use uhttp::http::request::Version;
    /// assert_eq!(Version::from_str("HTTP/1.1"), Some(Version::Http11));
    /// assert_eq!(Version::from_str("http/1.1"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "HTTP/1.0" => Some(Version::Http10),
            "HTTP/1.1" => Some(Version::Http11),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Version::Http10 => "HTTP/1.0",
            Version::Http11 => "HTTP/1.1",
        }
    }
}

/// A parsed request line plus the persistence preference.
///
/// Built once per request read from a connection and dropped as soon as the
/// response for it has been written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method (always GET once parsed)
    pub method: Method,
    /// The raw request target (e.g. "/index.html")
    pub target: String,
    /// HTTP version of the request line
    pub version: Version,
    /// Set when an HTTP/1.1 request carried `Connection: Keep-alive`
    pub wants_keep_alive: bool,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Method,
    target: Option<String>,
    version: Version,
    wants_keep_alive: bool,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: Method::GET,
            target: None,
            version: Version::Http11,
            wants_keep_alive: false,
        }
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    pub fn keep_alive(mut self, keep_alive: bool) -> Self {
        self.wants_keep_alive = keep_alive;
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            method: self.method,
            target: self.target.ok_or("target missing")?,
            version: self.version,
            wants_keep_alive: self.wants_keep_alive,
        })
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    /// The substring after the last `.` of the target, used for MIME guessing.
    ///
    /// Returns `None` when the target has no dot at all.
    pub fn extension(&self) -> Option<&str> {
        self.target
            .rfind('.')
            .map(|dot| &self.target[dot + 1..])
    }

    /// Whether the target names a directory (ends with `/`).
    pub fn is_directory(&self) -> bool {
        self.target.ends_with('/')
    }
}
