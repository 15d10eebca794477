//! Static file serving module
//!
//! Maps request paths onto the document root, handles directory redirects
//! and index files, and builds file responses with `Last-Modified`.

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http::{self, mime, modified, HttpResponse};
use crate::logger;
use hyper::body::Bytes;
use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Outcome of mapping a request path onto the filesystem
#[derive(Debug, PartialEq, Eq)]
pub enum Resolved {
    File(PathBuf),
    /// Directory requested without trailing slash, value is the new location
    Redirect(String),
    NotFound,
}

/// Translate a raw URL path into a filesystem path under `root`
///
/// The path is percent-decoded and normalized: empty and `.` segments are
/// dropped, `..` removes the previous segment but never climbs above the
/// root, and segments carrying a path separator are ignored. Returns the
/// joined path and whether the URL ended with `/`.
pub fn translate_path(root: &Path, url_path: &str) -> (PathBuf, bool) {
    let decoded = percent_decode_str(url_path).decode_utf8_lossy();
    let trailing_slash = decoded.trim_end().ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s if s.contains('\\') || s.contains('\0') => {}
            s => segments.push(s),
        }
    }

    let mut path = root.to_path_buf();
    path.extend(segments);
    (path, trailing_slash)
}

/// Resolve a request to a regular file, a redirect, or nothing
pub async fn resolve(root: &Path, ctx: &RequestContext<'_>, index_files: &[String]) -> Resolved {
    let (path, trailing_slash) = translate_path(root, ctx.path);

    let Ok(metadata) = fs::metadata(&path).await else {
        return Resolved::NotFound;
    };

    let file_path = if metadata.is_dir() {
        if !ctx.path.ends_with('/') {
            let location = match ctx.query {
                Some(q) => format!("{}/?{q}", ctx.path),
                None => format!("{}/", ctx.path),
            };
            return Resolved::Redirect(location);
        }
        match find_index_file(&path, index_files).await {
            Some(index) => index,
            // Directory listing is not offered
            None => return Resolved::NotFound,
        }
    } else if trailing_slash {
        return Resolved::NotFound;
    } else {
        path
    };

    // Symlinks must not lead outside the document root
    let Ok(canonical) = fs::canonicalize(&file_path).await else {
        return Resolved::NotFound;
    };
    if !canonical.starts_with(root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            ctx.path,
            canonical.display()
        ));
        return Resolved::NotFound;
    }

    Resolved::File(file_path)
}

async fn find_index_file(dir: &Path, index_files: &[String]) -> Option<PathBuf> {
    for index_file in index_files {
        let candidate = dir.join(index_file);
        if fs::metadata(&candidate).await.is_ok_and(|m| m.is_file()) {
            return Some(candidate);
        }
    }
    None
}

/// Serve the file or directory a request points at
pub async fn serve(ctx: &RequestContext<'_>, state: &AppState) -> HttpResponse {
    match resolve(&state.root, ctx, &state.config.root.index_files).await {
        Resolved::File(path) => serve_file(ctx, &path).await,
        Resolved::Redirect(location) => http::build_directory_redirect(&location),
        Resolved::NotFound => http::build_404_response(ctx.is_head),
    }
}

async fn serve_file(ctx: &RequestContext<'_>, path: &Path) -> HttpResponse {
    let metadata = match fs::metadata(path).await {
        Ok(m) => m,
        Err(e) => {
            logger::log_warning(&format!("Failed to stat '{}': {e}", path.display()));
            return http::build_404_response(ctx.is_head);
        }
    };
    let last_modified = metadata.modified().ok();

    // If-None-Match takes precedence; without ETags it can never match, so
    // the date check is skipped entirely
    if !ctx.has_if_none_match {
        if let Some(mtime) = last_modified {
            if modified::is_not_modified(ctx.if_modified_since, mtime) {
                return http::build_304_response(&modified::format_http_date(mtime));
            }
        }
    }

    let content = match fs::read(path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_warning(&format!("Failed to read file '{}': {e}", path.display()));
            return http::build_404_response(ctx.is_head);
        }
    };

    let content_type = mime::get_content_type(path.extension().and_then(|e| e.to_str()));
    let last_modified = last_modified
        .map(modified::format_http_date)
        .unwrap_or_default();

    http::build_file_response(Bytes::from(content), content_type, &last_modified, ctx.is_head)
}
