//! HTTP Response Builder
//!
//! Builds the status line and headers of a response and encodes them to
//! bytes. Small bodies (error text) ride along in the struct; file bodies
//! are streamed separately after `encode_head`. Headers keep their
//! insertion order so encoded output is deterministic.

use super::http_version::HttpVersion;

/// HTTP response head plus an optional in-memory body
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code (e.g., 200, 404, 500)
    pub status_code: u16,
    /// HTTP status text (e.g., "OK", "Not Found", "Internal Server Error")
    pub status_text: String,
    /// HTTP headers, in the order they will be written
    headers: Vec<(String, String)>,
    /// Response body; empty when the body is streamed by the caller
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a new HTTP response
    ///
    /// # Arguments
    /// * `status_code` - HTTP status code
    /// * `status_text` - HTTP status text
    /// * `body` - Response body as bytes
    pub fn new(status_code: u16, status_text: &str, body: Vec<u8>) -> Self {
        Self {
            status_code,
            status_text: status_text.to_string(),
            headers: Vec::new(),
            body,
        }
    }

    /// Create a 200 OK response
    pub fn ok(body: Vec<u8>) -> Self {
        Self::new(200, "OK", body)
    }

    /// Create a 404 Not Found response
    pub fn not_found(body: Vec<u8>) -> Self {
        Self::new(404, "Not Found", body)
    }

    /// Create a 405 Method Not Allowed response
    pub fn method_not_allowed(body: Vec<u8>) -> Self {
        Self::new(405, "Method Not Allowed", body)
    }

    /// Create a 500 Internal Server Error response
    pub fn internal_server_error(body: Vec<u8>) -> Self {
        Self::new(500, "Internal Server Error", body)
    }

    /// Create a 307 Temporary Redirect response
    ///
    /// # Arguments
    /// * `location` - Where the client should retry the request
    pub fn temporary_redirect(location: &str) -> Self {
        let mut response = Self::new(307, "Temporary Redirect", Vec::new());
        response.set_header("Location", location);
        response.set_header("Content-Length", "0");
        response
    }

    /// Set a header, replacing any earlier value under the same name
    pub fn set_header(&mut self, name: &str, value: &str) {
        if let Some(existing) = self.headers.iter_mut().find(|(n, _)| n == name) {
            existing.1 = value.to_string();
        } else {
            self.headers.push((name.to_string(), value.to_string()));
        }
    }

    /// Set Content-Type header
    pub fn set_content_type(&mut self, content_type: &str) {
        self.set_header("Content-Type", content_type);
    }

    /// Set Content-Length header based on body size
    pub fn set_content_length(&mut self) {
        self.set_header("Content-Length", &self.body.len().to_string());
    }

    /// Set Date header
    pub fn set_date(&mut self, date: &str) {
        self.set_header("Date", date);
    }

    /// Set Last-Modified header
    pub fn set_last_modified(&mut self, last_modified: &str) {
        self.set_header("Last-Modified", last_modified);
    }

    /// Encode the status line and headers for a specific HTTP version
    ///
    /// Every response announces `Connection: close`; the server handles one
    /// exchange per connection and then shuts the stream down.
    ///
    /// # Returns
    /// * `Vec<u8>` - Status line, headers, and the blank separator line
    pub fn encode_head(&self, version: &HttpVersion) -> Vec<u8> {
        let mut head = Vec::new();

        let status_line = format!(
            "{} {} {}\r\n",
            version.status_line_prefix(),
            self.status_code,
            self.status_text
        );
        head.extend_from_slice(status_line.as_bytes());

        for (name, value) in &self.headers {
            let header_line = format!("{}: {}\r\n", name, value);
            head.extend_from_slice(header_line.as_bytes());
        }

        head.extend_from_slice(b"Connection: close\r\n");
        head.extend_from_slice(b"\r\n");

        head
    }

    /// Encode the full response, head and in-memory body
    pub fn encode(&self, version: &HttpVersion) -> Vec<u8> {
        let mut response = self.encode_head(version);
        response.extend_from_slice(&self.body);
        response
    }
}
