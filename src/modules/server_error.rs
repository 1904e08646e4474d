//! Server error types
//!
//! Errors that can end a server before it ever accepts a connection.
//! Per-request failures are reported to the client as status codes and
//! never surface here.

use std::error::Error;
use std::fmt;
use std::io;

/// Startup failure raised while acquiring the listening socket.
#[derive(Debug)]
pub enum ServerError {
    /// Every port from the requested one up to 65534 was taken.
    PortsExhausted {
        /// First port that was tried.
        first_port: u16,
    },
    /// A bind attempt failed for a reason retrying another port cannot fix.
    Bind { port: u16, source: io::Error },
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::PortsExhausted { first_port } => {
                write!(f, "no free port found between {} and 65534", first_port)
            }
            ServerError::Bind { port, source } => {
                write!(f, "failed to bind port {}: {}", port, source)
            }
        }
    }
}

impl Error for ServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ServerError::PortsExhausted { .. } => None,
            ServerError::Bind { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ports_exhausted_display() {
        let error = ServerError::PortsExhausted { first_port: 8080 };
        assert_eq!(error.to_string(), "no free port found between 8080 and 65534");
    }

    #[test]
    fn test_bind_display_carries_port_and_cause() {
        let source = io::Error::new(io::ErrorKind::Other, "boom");
        let error = ServerError::Bind { port: 80, source };
        let text = error.to_string();
        assert!(text.contains("port 80"));
        assert!(text.contains("boom"));
        assert!(error.source().is_some());
    }
}
