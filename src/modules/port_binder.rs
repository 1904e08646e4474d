//! Listening socket acquisition
//!
//! Binds the first free port at or above the requested one. Ports that are
//! taken (or privileged) just advance the walk; any other bind failure is
//! surfaced immediately, since the next port will not fix it.

use std::io::ErrorKind;

use log::{info, warn};
use tokio::net::TcpListener;

use super::server_error::ServerError;

/// One past the highest port probed.
const PORT_LIMIT: u16 = 0xffff;

/// Bind a listener on all interfaces, walking up from `first_port` one
/// port at a time until a bind succeeds. Returns the listener and the port
/// it actually bound, read back from the socket.
pub async fn bind_first_free(first_port: u16) -> Result<(TcpListener, u16), ServerError> {
    for port in first_port..PORT_LIMIT {
        info!("Trying port {}", port);
        match TcpListener::bind(("0.0.0.0", port)).await {
            Ok(listener) => {
                let bound = listener
                    .local_addr()
                    .map_err(|e| ServerError::Bind { port, source: e })?
                    .port();
                return Ok((listener, bound));
            }
            Err(e) if retryable(e.kind()) => {
                warn!("Port {} is already in use. Trying another one.", port);
            }
            Err(e) => return Err(ServerError::Bind { port, source: e }),
        }
    }
    Err(ServerError::PortsExhausted { first_port })
}

fn retryable(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::AddrInUse | ErrorKind::PermissionDenied)
}
