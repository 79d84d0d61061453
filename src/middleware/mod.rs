//! Middleware components for HTTP request processing.
//!
//! Cross-cutting response concerns layered onto the router by `app`.

pub mod security_headers;
