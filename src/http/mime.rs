//! MIME type detection based on file extensions.
//!
//! Matching is exact and case-sensitive: `HTML` is not `html`. Anything the
//! table does not know is served as plain text.

pub const TEXT_HTML: &str = "text/html";
pub const TEXT_PLAIN: &str = "text/plain";

/// Guesses a content type from the extension of a request target.
///
/// ```
/// # use uhttp::http::mime::content_type_for;
/// assert_eq!(content_type_for(Some("png")), "image/png");
/// assert_eq!(content_type_for(None), "text/plain");
/// ```
pub fn content_type_for(extension: Option<&str>) -> &'static str {
    match extension {
        Some("html") | Some("htm") => TEXT_HTML,
        Some("txt") => TEXT_PLAIN,
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("jpg") => "image/jpg",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        _ => TEXT_PLAIN,
    }
}
