//! Request dispatch module
//!
//! Method validation and extraction of the request fields the file server
//! needs, then dispatch to static file serving.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http::{self, HttpResponse};
use crate::logger;
use hyper::header::{IF_MODIFIED_SINCE, IF_NONE_MATCH};
use hyper::http::request::Parts;
use hyper::Method;

/// Request context encapsulating information needed for request processing
#[derive(Debug)]
pub struct RequestContext<'a> {
    /// Raw (still percent-encoded) URL path
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_modified_since: Option<&'a str>,
    pub has_if_none_match: bool,
}

impl<'a> RequestContext<'a> {
    pub fn from_parts(parts: &'a Parts) -> Self {
        let headers = &parts.headers;
        Self {
            path: parts.uri.path(),
            query: parts.uri.query(),
            is_head: parts.method == Method::HEAD,
            if_modified_since: headers
                .get(IF_MODIFIED_SINCE)
                .and_then(|v| v.to_str().ok()),
            has_if_none_match: headers.contains_key(IF_NONE_MATCH),
        }
    }
}

/// Produce the base response for a request, before header augmentation
pub async fn route(parts: &Parts, state: &AppState) -> HttpResponse {
    if let Some(resp) = check_http_method(&parts.method) {
        return resp;
    }

    let ctx = RequestContext::from_parts(parts);
    static_files::serve(&ctx, state).await
}

/// Only GET and HEAD are served; everything else is 501
fn check_http_method(method: &Method) -> Option<HttpResponse> {
    match *method {
        Method::GET | Method::HEAD => None,
        _ => {
            logger::log_warning(&format!("Unsupported method: {method}"));
            Some(http::build_501_response(method))
        }
    }
}
