//! Development server.
//!
//! A small `tiny_http` server over the build output:
//!
//! - Static file serving from `config.build.output`
//! - `index.html` resolution for directories
//! - Config watching and rebuild (via `watch` module)
//! - Graceful shutdown on Ctrl+C
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │   Main Thread   │     │  Watcher Thread  │
//! │  (HTTP Server)  │     │  (campus.toml)   │
//! └────────┬────────┘     └────────┬─────────┘
//!          │                       │
//!          ▼                       ▼
//!    Serve files            Reload config, rebuild
//!          └──────────┬────────────┘
//!                     ▼
//!              config.build.output
//! ```

use crate::{
    build::INDEX_FILE,
    config::{SiteConfig, cfg},
    log,
    watch::watch_for_changes_blocking,
};
use anyhow::{Context, Result, anyhow};
use std::{
    fs,
    io::Cursor,
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

/// Start the development server.
///
/// Blocks until Ctrl+C is received.
pub fn serve_site() -> Result<()> {
    let c = cfg();
    let interface: IpAddr = c
        .serve
        .interface
        .parse()
        .with_context(|| format!("Invalid interface `{}`", c.serve.interface))?;

    let (server, addr) = try_bind_port(interface, c.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    if c.serve.watch {
        std::thread::spawn(|| {
            if let Err(err) = watch_for_changes_blocking() {
                log!("watch"; "{err}");
            }
        });
    }

    for request in server.incoming_requests() {
        // Load per request so a reloaded config is picked up.
        if let Err(e) = handle_request(request, &cfg()) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_err = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_err = Some(e),
        }
    }

    Err(anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_err.map(|e| e.to_string()).unwrap_or_default()
    ))
}

/// Map a request URL to a file under `root`.
///
/// Decodes percent-escapes, drops the query string, and resolves
/// directories to their `index.html`. Paths that climb out of `root` are
/// rejected.
fn resolve_path(root: &Path, url: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(url).ok()?;
    let path = decoded.split(['?', '#']).next().unwrap_or_default();
    let request_path = path.trim_matches('/');

    if request_path.split('/').any(|segment| segment == "..") {
        return None;
    }

    let local = root.join(request_path);
    if local.is_file() {
        return Some(local);
    }
    let index = local.join(INDEX_FILE);
    index.is_file().then_some(index)
}

fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    match resolve_path(&config.build.output, request.url()) {
        Some(path) => serve_file(request, &path),
        None => serve_not_found(request),
    }
}

fn content_type_header(value: &str) -> Result<Header> {
    Header::from_bytes("Content-Type", value).map_err(|()| anyhow!("invalid header `{value}`"))
}

fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let response =
        Response::from_data(content).with_header(content_type_header(guess_content_type(path))?);

    request.respond(response)?;
    Ok(())
}

fn serve_not_found(request: Request) -> Result<()> {
    let body = "404 Not Found";
    let response = Response::new(
        StatusCode(404),
        vec![content_type_header("text/plain")?],
        Cursor::new(body),
        Some(body.len()),
        None,
    );
    request.respond(response)?;
    Ok(())
}

/// Guess MIME content type from file extension.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}
