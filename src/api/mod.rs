//! REST API layer for HTTP request/response handling.
//!
//! This layer validates requests, calls application services and formats
//! every `/api` response as the uniform JSON envelope.
//!
//! # Modules
//!
//! - [`dto`] - Query and body parameters with their validation rules
//! - [`envelope`] - Success/failure envelope and `Cache-Control` policy
//! - [`extract`] - Validating extractors
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Rate limiting, access log and tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod envelope;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
