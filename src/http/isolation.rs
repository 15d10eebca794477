//! Cross-origin isolation headers
//!
//! Every response leaves the server with `Cross-Origin-Opener-Policy:
//! same-origin` and `Cross-Origin-Embedder-Policy: require-corp`, which
//! together make the page cross-origin isolated (needed for
//! `SharedArrayBuffer` and high-resolution timers). Requests whose target
//! ends in `.js` additionally get `Content-Type: application/javascript`.

use hyper::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};

pub const CROSS_ORIGIN_OPENER_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-opener-policy");
pub const CROSS_ORIGIN_EMBEDDER_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-embedder-policy");

pub const SAME_ORIGIN: HeaderValue = HeaderValue::from_static("same-origin");
pub const REQUIRE_CORP: HeaderValue = HeaderValue::from_static("require-corp");
pub const JAVASCRIPT: HeaderValue = HeaderValue::from_static("application/javascript");

/// Whether the raw request target (path plus any query) ends with `.js`
///
/// The comparison is a literal, case-sensitive suffix test on the target as
/// received, so `/app.js?v=2` and `/APP.JS` do not match.
pub fn is_javascript_target(target: &str) -> bool {
    target.ends_with(".js")
}

/// Apply the isolation headers to a finished response header map
///
/// Uses `insert`, so each header ends up with exactly one value no matter
/// what the file handler already set.
pub fn apply_isolation_headers(target: &str, headers: &mut HeaderMap) {
    headers.insert(CROSS_ORIGIN_OPENER_POLICY, SAME_ORIGIN);
    headers.insert(CROSS_ORIGIN_EMBEDDER_POLICY, REQUIRE_CORP);

    if is_javascript_target(target) {
        headers.insert(CONTENT_TYPE, JAVASCRIPT);
    }
}
