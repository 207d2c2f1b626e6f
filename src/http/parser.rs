use crate::http::error::ProtocolError;
use crate::http::request::{Method, Request, Version};

/// Largest request the server will read in a single receive.
///
/// A request must fit strictly below this bound; one that fills the whole
/// buffer has no room left for its terminator and is rejected.
pub const MAX_REQUEST_LEN: usize = 1024;

/// The only header the server looks at, matched byte for byte.
const KEEP_ALIVE_HEADER: &str = "Connection: Keep-alive";

const DELIMITERS: [char; 4] = [' ', '\t', '\r', '\n'];

/// Parses one request from a raw receive buffer.
///
/// Checks run in a fixed order: length bound, method, target, version. HEAD
/// and POST map to `MethodNotAllowed`, any other unknown method to
/// `BadRequest`. Only HTTP/1.1 requests inspect headers, looking for an
/// exact `Connection: Keep-alive` line before the first blank line.
pub fn parse_request(buf: &[u8], max_len: usize) -> Result<Request, ProtocolError> {
    if buf.len() >= max_len {
        return Err(ProtocolError::BadRequest);
    }

    // Anything past a NUL is not part of the request text
    let buf = match buf.iter().position(|&b| b == 0) {
        Some(nul) => &buf[..nul],
        None => buf,
    };

    let text = std::str::from_utf8(buf).map_err(|_| ProtocolError::BadRequest)?;

    let (method_str, rest) = next_token(text).ok_or(ProtocolError::BadRequest)?;
    let method = match method_str {
        "HEAD" | "POST" => return Err(ProtocolError::MethodNotAllowed),
        other => Method::from_str(other).ok_or(ProtocolError::BadRequest)?,
    };

    let (target, rest) = next_token(rest).ok_or(ProtocolError::BadRequest)?;

    let (version_str, rest) = next_token(rest).ok_or(ProtocolError::BadRequest)?;
    let version = Version::from_str(version_str).ok_or(ProtocolError::VersionNotSupported)?;

    let wants_keep_alive = version == Version::Http11 && has_keep_alive_header(rest);

    Ok(Request {
        method,
        target: target.to_string(),
        version,
        wants_keep_alive,
    })
}

/// Splits off the next whitespace-delimited token, skipping leading delimiters.
fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start_matches(DELIMITERS);
    if s.is_empty() {
        return None;
    }

    match s.find(DELIMITERS) {
        Some(end) => Some((&s[..end], &s[end..])),
        None => Some((s, "")),
    }
}

/// Scans the header block that follows the request line.
fn has_keep_alive_header(after_version: &str) -> bool {
    // Drop whatever is left of the request line itself
    let Some((_, headers)) = after_version.split_once('\n') else {
        return false;
    };

    headers
        .lines()
        .take_while(|line| !line.is_empty())
        .any(|line| line == KEEP_ALIVE_HEADER)
}
