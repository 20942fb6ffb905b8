//! Static site serving.
//!
//! The marketing pages and their assets live in a directory on disk
//! (`SITE_DIR`); this router serves them with traversal protection and
//! content-type mapping. Pages are served uncached so edits show up on
//! the next request; fingerprint-free assets get a day.

use axum::body::Body;
use axum::extract::{Path as UrlPath, State};
use axum::http::{StatusCode, Uri, header};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use std::path::PathBuf;
use tokio::fs;
use tracing::warn;

use crate::state::AppState;

/// Create the static files router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(serve_index))
        .route("/static/{*path}", get(serve_asset))
        .fallback(serve_page)
}

/// Serve the front page.
async fn serve_index(State(state): State<AppState>) -> Response<Body> {
    serve_file(&state, "index.html", "no-cache").await
}

/// Serve a site asset under /static/.
async fn serve_asset(State(state): State<AppState>, UrlPath(path): UrlPath<String>) -> Response<Body> {
    let relative = format!("static/{path}");
    serve_file(&state, &relative, "public, max-age=86400").await
}

/// Serve a top-level page, trying `{name}.html` for extension-less paths.
async fn serve_page(State(state): State<AppState>, uri: Uri) -> Response<Body> {
    let path = uri.path().trim_start_matches('/');
    if path.is_empty() {
        return serve_file(&state, "index.html", "no-cache").await;
    }

    if PathBuf::from(path).extension().is_some() {
        serve_file(&state, path, "no-cache").await
    } else {
        let with_ext = format!("{path}.html");
        serve_file(&state, &with_ext, "no-cache").await
    }
}

/// Read and serve one file from the site directory.
#[allow(clippy::unwrap_used)]
async fn serve_file(state: &AppState, relative: &str, cache_control: &str) -> Response<Body> {
    // Security: prevent path traversal
    if relative.contains("..") || relative.contains('\0') {
        return not_found();
    }

    let file_path = state.config().site_dir.join(relative);

    let content = match fs::read(&file_path).await {
        Ok(content) => content,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %file_path.display(), error = %e, "failed to read site file");
            }
            return not_found();
        }
    };

    let content_type = mime_from_path(&file_path);

    // SAFETY: Response::builder() with hard-coded valid status and headers cannot fail
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, cache_control)
        .body(Body::from(content))
        .unwrap()
}

#[allow(clippy::unwrap_used)]
fn not_found() -> Response<Body> {
    // SAFETY: Response::builder() with hard-coded valid status cannot fail
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .body(Body::from("Not found"))
        .unwrap()
}

fn mime_from_path(path: &std::path::Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        Some("html") => "text/html",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("ico") => "image/x-icon",
        Some("mp4") => "video/mp4",
        _ => "application/octet-stream",
    }
}
