//! Static file server that makes every response cross-origin isolated.
//!
//! Files are served from a document root; each response additionally carries
//! `Cross-Origin-Opener-Policy: same-origin` and
//! `Cross-Origin-Embedder-Policy: require-corp`, and requests for `.js`
//! targets are answered with `Content-Type: application/javascript`.

pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use error::{Result, ServerError};
