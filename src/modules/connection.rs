//! Per-connection request handling
//!
//! Each accepted connection gets one exchange: read the request head under
//! a timeout, resolve the target, write one response, flush, shut down.
//! File bodies are streamed in fixed-size chunks rather than buffered, so
//! serving a large file costs one buffer, not the file's size.

use std::io;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;

use super::http_request::RequestLine;
use super::http_response::HttpResponse;
use super::mime_types;
use super::path_resolver::{self, ResolvedTarget, TargetKind};
use super::static_file_server::ServerConfig;

/// Chunk size for streaming file bodies.
const STREAM_BUFFER_SIZE: usize = 16 * 1024;
/// How long a client gets to deliver its request head.
const REQUEST_READ_TIMEOUT: Duration = Duration::from_secs(10);
/// Request heads longer than this many lines are treated as malformed.
const MAX_HEADER_LINES: usize = 100;

/// Serve one connection start to finish. Never panics or propagates; any
/// failure here is logged and ends with this connection only.
pub async fn handle_connection(stream: TcpStream, config: Arc<ServerConfig>) {
    if let Err(e) = serve_connection(stream, &config).await {
        debug!("Connection ended early: {}", e);
    }
}

async fn serve_connection(mut stream: TcpStream, config: &ServerConfig) -> io::Result<()> {
    let request = match timeout(REQUEST_READ_TIMEOUT, read_request_head(&mut stream)).await {
        Ok(request) => request?,
        Err(_) => {
            debug!("Timed out waiting for a request head");
            return Ok(());
        }
    };
    let request = match request {
        Some(request) => request,
        // Malformed or empty request line: drop without a response.
        None => return Ok(()),
    };

    if !request.is_get() {
        info!("{} {} --> 405 Method Not Allowed", request.method, request.target);
        let body = format!("Method not allowed: {}\r\n", request.method);
        let mut response = HttpResponse::method_not_allowed(body.into_bytes());
        response.set_content_type("text/plain");
        response.set_content_length();
        stream.write_all(&response.encode(&request.version)).await?;
        return finish(stream).await;
    }

    let request_path = path_resolver::strip_query_and_fragment(&request.target);
    let target = path_resolver::resolve(&config.root, &request.target);

    if target.directory_request && !request_path.ends_with('/') {
        // A directory reached without its trailing slash: send the client
        // back to the slashed form so relative links resolve there.
        let location = format!("{}/", request_path);
        info!(
            "{} --> {} --> 307 Temporary Redirect",
            request_path,
            target.relative.display()
        );
        let response = HttpResponse::temporary_redirect(&location);
        stream.write_all(&response.encode(&request.version)).await?;
        return finish(stream).await;
    }

    match target.kind {
        TargetKind::RegularFile => send_file(&mut stream, &request, &target).await?,
        TargetKind::Directory | TargetKind::Missing => {
            info!(
                "{} --> {} --> 404 Not Found",
                request_path,
                target.relative.display()
            );
            let body = format!("Not found: '{}'\r\n", target.relative.display());
            let mut response = HttpResponse::not_found(body.into_bytes());
            response.set_content_type("text/plain");
            response.set_content_length();
            stream.write_all(&response.encode(&request.version)).await?;
        }
    }

    finish(stream).await
}

/// Read the request line and drain the rest of the head. Returns `Ok(None)`
/// for connections that close without a parseable request line.
async fn read_request_head(stream: &mut TcpStream) -> io::Result<Option<RequestLine>> {
    let mut reader = BufReader::new(stream);

    let mut line = String::new();
    reader.read_line(&mut line).await?;
    let request = RequestLine::parse(line.trim_end());
    if request.is_none() && !line.trim_end().is_empty() {
        warn!("Dropping malformed request line: {:?}", line.trim_end());
        return Ok(None);
    }

    // Drain the remaining header lines so the client reads our response
    // instead of seeing a reset connection.
    let mut header = String::new();
    for _ in 0..MAX_HEADER_LINES {
        header.clear();
        let n = reader.read_line(&mut header).await?;
        if n == 0 || header == "\r\n" || header == "\n" {
            break;
        }
    }

    Ok(request)
}

/// Stream a regular file to the client. Failures before the head is sent
/// become a 500; failures after it abort the stream, and the Content-Length
/// mismatch tells the client the body is short.
async fn send_file(
    stream: &mut TcpStream,
    request: &RequestLine,
    target: &ResolvedTarget,
) -> io::Result<()> {
    let request_path = path_resolver::strip_query_and_fragment(&request.target);

    let (mut file, metadata) = match open_with_metadata(&target.path).await {
        Ok(opened) => opened,
        Err(e) => {
            // Resolution said this was a file moments ago; it raced away or
            // is unreadable. Report it without leaking the absolute path.
            warn!("Failed to open '{}': {}", target.relative.display(), e);
            info!(
                "{} --> {} --> 500 Internal Server Error",
                request_path,
                target.relative.display()
            );
            let body = format!("Internal server error: '{}'\r\n", target.relative.display());
            let mut response = HttpResponse::internal_server_error(body.into_bytes());
            response.set_content_type("text/plain");
            response.set_content_length();
            return stream.write_all(&response.encode(&request.version)).await;
        }
    };

    let mut response = HttpResponse::ok(Vec::new());
    response.set_content_type(mime_types::mime_type_for_path(&target.path));
    response.set_header("Content-Length", &metadata.len().to_string());
    response.set_date(&httpdate::fmt_http_date(SystemTime::now()));
    if let Ok(modified) = metadata.modified() {
        response.set_last_modified(&httpdate::fmt_http_date(modified));
    }
    stream.write_all(&response.encode_head(&request.version)).await?;

    let mut buffer = [0u8; STREAM_BUFFER_SIZE];
    loop {
        let n = file.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        stream.write_all(&buffer[..n]).await?;
    }

    info!(
        "{} --> {} --> 200 OK",
        request_path,
        target.relative.display()
    );
    Ok(())
}

async fn open_with_metadata(
    path: &std::path::Path,
) -> io::Result<(tokio::fs::File, std::fs::Metadata)> {
    let file = tokio::fs::File::open(path).await?;
    let metadata = file.metadata().await?;
    Ok((file, metadata))
}

/// Flush and shut the write half down exactly once, on every response path.
async fn finish(mut stream: TcpStream) -> io::Result<()> {
    stream.flush().await?;
    stream.shutdown().await
}
