//! Server lifecycle
//!
//! A `StaticFileServer` is configuration waiting to run. `start` binds a
//! port, fires the readiness callback with the port it actually got, and
//! hands the accept loop to a background task. The returned `ServerHandle`
//! is the only way to observe or stop the running server.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::connection;
use super::port_binder;
use super::server_error::ServerError;

/// Immutable configuration a server is constructed with.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory whose contents are served. Callers validate that it
    /// exists and is a directory before constructing the server.
    pub root: PathBuf,
    /// First port tried when binding; the walk moves up from here.
    pub port: u16,
}

/// A configured server that has not started listening yet.
pub struct StaticFileServer {
    config: Arc<ServerConfig>,
    on_ready: Option<Box<dyn FnOnce(u16) + Send>>,
}

impl StaticFileServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            on_ready: None,
        }
    }

    /// Register a callback invoked exactly once, after the listener is
    /// bound and before the first connection is accepted, with the port
    /// the server actually bound.
    pub fn on_ready(mut self, callback: impl FnOnce(u16) + Send + 'static) -> Self {
        self.on_ready = Some(Box::new(callback));
        self
    }

    /// Bind a port and start accepting connections on a background task.
    pub async fn start(mut self) -> Result<ServerHandle, ServerError> {
        let (listener, port) = port_binder::bind_first_free(self.config.port).await?;
        info!("Serving '{}' on port {}", self.config.root.display(), port);

        if let Some(ready) = self.on_ready.take() {
            ready(port);
        }

        let (shutdown, shutdown_rx) = watch::channel(false);
        let done = Arc::new(AtomicBool::new(false));
        let task = tokio::spawn(accept_loop(
            listener,
            Arc::clone(&self.config),
            shutdown_rx,
            Arc::clone(&done),
        ));

        Ok(ServerHandle {
            port,
            shutdown,
            done,
            task,
        })
    }
}

/// Control handle for a running server.
///
/// Dropping the handle without calling [`stop`](ServerHandle::stop) stops
/// the server too: the accept loop treats a closed shutdown channel the
/// same as a shutdown signal.
pub struct ServerHandle {
    port: u16,
    shutdown: watch::Sender<bool>,
    done: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl ServerHandle {
    /// Port the listener is bound to.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Ask the accept loop to stop. No new connections are accepted;
    /// responses already being written run to completion. Calling this
    /// again, including after the loop has wound down, is a no-op.
    pub fn stop(&self) {
        self.shutdown.send_replace(true);
    }

    /// Whether the accept loop has exited and released the listener.
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }

    /// Wait for the accept loop to finish. Does not itself stop the
    /// server; pair with [`stop`](ServerHandle::stop).
    pub async fn wait(self) {
        let _ = self.task.await;
    }
}

async fn accept_loop(
    listener: TcpListener,
    config: Arc<ServerConfig>,
    mut shutdown: watch::Receiver<bool>,
    done: Arc<AtomicBool>,
) {
    loop {
        tokio::select! {
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, peer)) => {
                        debug!("Accepted connection from {}", peer);
                        let config = Arc::clone(&config);
                        tokio::spawn(connection::handle_connection(stream, config));
                    }
                    // One bad accept (out of descriptors, aborted
                    // handshake) must not take the server down.
                    Err(e) => warn!("Failed to accept a connection: {}", e),
                }
            }
            _ = shutdown.changed() => break,
        }
    }

    drop(listener);
    done.store(true, Ordering::SeqCst);
    info!("Stopped accepting connections");
}
