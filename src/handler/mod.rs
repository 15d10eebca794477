//! Request handler module
//!
//! `handle_request` is the service `hyper` calls for every request. It lets
//! the router produce the plain static-file response and then decorates it:
//! isolation headers, `Server` header and the access log line. Because the
//! decoration runs on whatever the router returns, redirects, 304s and error
//! pages carry the isolation headers too.

pub mod router;
pub mod static_files;

use crate::config::AppState;
use crate::http::{self, HttpResponse};
use crate::logger::{self, AccessLogEntry};
use hyper::body::Body;
use hyper::header::{HeaderName, HeaderValue, REFERER, SERVER, USER_AGENT};
use hyper::http::request::Parts;
use hyper::Request;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<HttpResponse, Infallible> {
    let started = Instant::now();
    // GET and HEAD carry no body worth reading
    let (parts, _) = req.into_parts();

    let mut response = router::route(&parts, &state).await;

    let target = parts
        .uri
        .path_and_query()
        .map_or_else(|| parts.uri.path(), |pq| pq.as_str());
    http::apply_isolation_headers(target, response.headers_mut());

    if let Ok(server) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, server);
    }

    if state.config.logging.access_log {
        let entry = access_log_entry(&parts, &response, peer_addr, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn access_log_entry(
    parts: &Parts,
    response: &HttpResponse,
    peer_addr: SocketAddr,
    started: Instant,
) -> AccessLogEntry {
    let header = |name: HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        parts.method.to_string(),
        parts.uri.path().to_string(),
    );
    entry.query = parts.uri.query().map(ToString::to_string);
    entry.http_version = format!("{:?}", parts.version)
        .trim_start_matches("HTTP/")
        .to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Overrides};
    use hyper::header::CONTENT_TYPE;
    use hyper::{Method, StatusCode};

    fn state_for(root: &std::path::Path) -> Arc<AppState> {
        let overrides = Overrides {
            directory: root.to_str().map(ToString::to_string),
            ..Overrides::default()
        };
        let mut config = Config::load(None, &overrides).unwrap();
        config.logging.access_log = false;
        Arc::new(AppState::new(config).unwrap())
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>home</h1>").unwrap();
        std::fs::write(dir.path().join("script.js"), "export {};").unwrap();
        std::fs::write(dir.path().join("data.json"), "{}").unwrap();
        dir
    }

    async fn request(state: &Arc<AppState>, method: Method, uri: &str) -> HttpResponse {
        let req = Request::builder().method(method).uri(uri).body(()).unwrap();
        let peer = SocketAddr::from(([127, 0, 0, 1], 50000));
        handle_request(req, Arc::clone(state), peer).await.unwrap()
    }

    fn assert_isolated(response: &HttpResponse) {
        assert_eq!(response.headers()["cross-origin-opener-policy"], "same-origin");
        assert_eq!(response.headers()["cross-origin-embedder-policy"], "require-corp");
    }

    #[tokio::test]
    async fn test_html_keeps_default_type() {
        let dir = fixture();
        let state = state_for(dir.path());
        let response = request(&state, Method::GET, "/index.html").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_isolated(&response);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/html");
    }

    #[tokio::test]
    async fn test_js_content_type_overridden() {
        let dir = fixture();
        let state = state_for(dir.path());
        let response = request(&state, Method::GET, "/script.js").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_isolated(&response);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/javascript");
        assert_eq!(response.headers().get_all(CONTENT_TYPE).iter().count(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_isolated() {
        let dir = fixture();
        let state = state_for(dir.path());
        let response = request(&state, Method::GET, "/missing.txt").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_isolated(&response);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/html;charset=utf-8");

        // The override follows the target, not the outcome
        let response = request(&state, Method::GET, "/missing.js").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_isolated(&response);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/javascript");
        assert_eq!(response.headers().get_all(CONTENT_TYPE).iter().count(), 1);
    }

    #[tokio::test]
    async fn test_unsupported_method_is_isolated() {
        let dir = fixture();
        let state = state_for(dir.path());
        let response = request(&state, Method::POST, "/index.html").await;
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
        assert_isolated(&response);
    }

    #[tokio::test]
    async fn test_server_header() {
        let dir = fixture();
        let state = state_for(dir.path());
        let response = request(&state, Method::GET, "/data.json").await;
        assert!(response.headers()[SERVER]
            .to_str()
            .unwrap()
            .starts_with("coi-serve/"));
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    }

    #[tokio::test]
    async fn test_repeated_requests_identical_headers() {
        let dir = fixture();
        let state = state_for(dir.path());
        let first = request(&state, Method::GET, "/script.js").await;
        let second = request(&state, Method::GET, "/script.js").await;
        assert_eq!(first.headers(), second.headers());
    }

    #[test]
    fn test_access_log_entry() {
        let (parts, ()) = Request::builder()
            .uri("/app.js?v=3")
            .header("User-Agent", "curl/8.0")
            .body(())
            .unwrap()
            .into_parts();
        let response = http::build_404_response(false);
        let peer = SocketAddr::from(([10, 0, 0, 7], 4000));

        let entry = access_log_entry(&parts, &response, peer, Instant::now());
        assert_eq!(entry.remote_addr, "10.0.0.7");
        assert_eq!(entry.path, "/app.js");
        assert_eq!(entry.query.as_deref(), Some("v=3"));
        assert_eq!(entry.http_version, "1.1");
        assert_eq!(entry.status, 404);
        assert!(entry.body_bytes > 0);
        assert_eq!(entry.user_agent.as_deref(), Some("curl/8.0"));
        assert!(entry.referer.is_none());
    }
}
