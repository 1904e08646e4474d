//! HTTP request line parsing
//!
//! Only the request line matters here: the method decides between serving
//! and a 405, the target feeds the path resolver, and the version is echoed
//! in the response status line. The rest of the head is read and discarded.

use super::http_version::HttpVersion;

/// Parsed request line of an inbound HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// Request method, exactly as the client sent it (e.g. "GET", "POST").
    pub method: String,
    /// Raw request target, percent-encoding and query string intact.
    pub target: String,
    /// Protocol version to echo in the status line.
    pub version: HttpVersion,
}

impl RequestLine {
    /// Parse the first line of an HTTP request, e.g. `GET /index.html HTTP/1.1`.
    ///
    /// Returns `None` for lines that do not carry at least a method and a
    /// target; such requests are dropped without a response.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let method = parts.next()?;
        let target = parts.next()?;
        Some(Self {
            method: method.to_string(),
            target: target.to_string(),
            version: HttpVersion::from_request_line(line),
        })
    }

    pub fn is_get(&self) -> bool {
        self.method == "GET"
    }
}
