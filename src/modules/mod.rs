//! Modules for the starthere HTTP server
//!
//! The serving engine lives here: request parsing, path resolution,
//! response encoding, file streaming, and the accept loop. Launch plumbing
//! (settings, command line, browser) sits next to the binary instead.

pub mod connection;
pub mod http_request;
pub mod http_response;
pub mod http_version;
pub mod mime_types;
pub mod path_resolver;
pub mod port_binder;
pub mod server_error;
pub mod static_file_server;
