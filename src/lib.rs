//! starthere - a static file server for local development
//!
//! Serves a directory over plain HTTP: request paths are resolved against
//! the document root, directories resolve to their index file, files are
//! streamed in fixed chunks, and binding walks up from the requested port
//! until a free one is found. Useful for previewing web content locally;
//! not meant to face the public internet.

pub mod browser;
pub mod cli;
pub mod logger;
pub mod modules;
pub mod settings;

pub use modules::path_resolver::{ResolvedTarget, TargetKind, INDEX_FILES};
pub use modules::server_error::ServerError;
pub use modules::static_file_server::{ServerConfig, ServerHandle, StaticFileServer};
