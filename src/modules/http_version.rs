//! HTTP Version Support
//!
//! This module parses the protocol version out of the request line so that
//! responses can echo it back in their status line.

/// HTTP version enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVersion {
    /// HTTP/1.0 - one request per connection unless Keep-Alive is negotiated
    Http10,
    /// HTTP/1.1 - persistent connections by default
    Http11,
}

impl HttpVersion {
    /// Parse the HTTP version from a request line
    ///
    /// # Arguments
    /// * `request_line` - The first line of the HTTP request (e.g., "GET /path HTTP/1.1")
    ///
    /// # Returns
    /// * `HttpVersion` - The parsed HTTP version; anything that is not
    ///   HTTP/1.0 is treated as HTTP/1.1
    pub fn from_request_line(request_line: &str) -> Self {
        if let Some(version_start) = request_line.rfind("HTTP/") {
            let version_part = &request_line[version_start..];
            if version_part.starts_with("HTTP/1.0") {
                return HttpVersion::Http10;
            }
        }
        HttpVersion::Http11
    }

    /// Get the status line prefix for this HTTP version
    pub fn status_line_prefix(&self) -> &'static str {
        match self {
            HttpVersion::Http10 => "HTTP/1.0",
            HttpVersion::Http11 => "HTTP/1.1",
        }
    }
}

impl std::fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.status_line_prefix())
    }
}
