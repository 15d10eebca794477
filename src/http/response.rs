//! HTTP response building module
//!
//! Provides builders for the status codes the file server emits.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{ALLOW, CONTENT_LENGTH, CONTENT_TYPE, LAST_MODIFIED, LOCATION};
use hyper::{Response, StatusCode};

pub type HttpResponse = Response<Full<Bytes>>;

const ERROR_CONTENT_TYPE: &str = "text/html;charset=utf-8";

/// Build 200 OK response for a file
///
/// `Content-Length` always reflects the file size, also for `HEAD`.
pub fn build_file_response(
    data: Bytes,
    content_type: &str,
    last_modified: &str,
    is_head: bool,
) -> HttpResponse {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, content_length)
        .header(LAST_MODIFIED, last_modified)
        .body(Full::new(body))
        .unwrap_or_else(|e| fallback("200", &e))
}

/// Build 301 redirect to the same path with a trailing slash
pub fn build_directory_redirect(location: &str) -> HttpResponse {
    Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header(LOCATION, location)
        .header(CONTENT_LENGTH, 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| fallback("301", &e))
}

/// Build 304 Not Modified response
pub fn build_304_response(last_modified: &str) -> HttpResponse {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header(LAST_MODIFIED, last_modified)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| fallback("304", &e))
}

/// Build 404 Not Found response
pub fn build_404_response(is_head: bool) -> HttpResponse {
    build_error_response(
        StatusCode::NOT_FOUND,
        "File not found",
        "Nothing matches the given URI",
        is_head,
    )
}

/// Build 501 response for any method other than GET and HEAD
pub fn build_501_response(method: &hyper::Method) -> HttpResponse {
    let mut response = build_error_response(
        StatusCode::NOT_IMPLEMENTED,
        &format!("Unsupported method ('{method}')"),
        "Server does not support this operation",
        false,
    );
    response
        .headers_mut()
        .insert(ALLOW, hyper::header::HeaderValue::from_static("GET, HEAD"));
    response
}

/// Build an HTML error page
pub fn build_error_response(
    status: StatusCode,
    message: &str,
    explanation: &str,
    is_head: bool,
) -> HttpResponse {
    let page = error_page(status, message, explanation);
    let content_length = page.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(page)
    };

    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, ERROR_CONTENT_TYPE)
        .header(CONTENT_LENGTH, content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| fallback(status.as_str(), &e))
}

fn error_page(status: StatusCode, message: &str, explanation: &str) -> String {
    let code = status.as_u16();
    let message = escape_html(message);
    format!(
        r#"<!DOCTYPE HTML>
<html lang="en">
    <head>
        <meta charset="utf-8">
        <title>Error response</title>
    </head>
    <body>
        <h1>Error response</h1>
        <p>Error code: {code}</p>
        <p>Message: {message}.</p>
        <p>Error code explanation: {code} - {explanation}.</p>
    </body>
</html>
"#
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Log response build error and return a bare 500
fn fallback(status: &str, error: &hyper::http::Error) -> HttpResponse {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(response: HttpResponse) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_file_response() {
        let response = build_file_response(
            Bytes::from_static(b"<h1>hi</h1>"),
            "text/html",
            "Sun, 06 Nov 1994 08:49:37 GMT",
            false,
        );
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/html");
        assert_eq!(response.headers()[CONTENT_LENGTH], "11");
        assert_eq!(body_string(response).await, "<h1>hi</h1>");
    }

    #[tokio::test]
    async fn test_head_keeps_length_drops_body() {
        let response = build_file_response(Bytes::from_static(b"abc"), "text/plain", "x", true);
        assert_eq!(response.headers()[CONTENT_LENGTH], "3");
        assert_eq!(body_string(response).await, "");
    }

    #[tokio::test]
    async fn test_404_page() {
        let response = build_404_response(false);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[CONTENT_TYPE], ERROR_CONTENT_TYPE);
        let body = body_string(response).await;
        assert!(body.contains("Error code: 404"));
        assert!(body.contains("File not found"));
    }

    #[tokio::test]
    async fn test_501_names_method() {
        let response = build_501_response(&hyper::Method::POST);
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(response.headers()[ALLOW], "GET, HEAD");
        let body = body_string(response).await;
        assert!(body.contains("Unsupported method ('POST')"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a & b>"), "&lt;a &amp; b&gt;");
    }

    #[test]
    fn test_redirect() {
        let response = build_directory_redirect("/docs/?page=2");
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[LOCATION], "/docs/?page=2");
        assert_eq!(response.headers()[CONTENT_LENGTH], "0");
    }
}
