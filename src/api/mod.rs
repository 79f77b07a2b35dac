//! HTTP API layer.
//!
//! Translates HTTP requests into service calls and formats responses.
//!
//! - [`dto`] - Response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Tracing and current-user extraction
//! - [`routes`] - `/api` route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
