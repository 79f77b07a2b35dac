//! Application layer: event dispatch and link services.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! - [`services::event_service::EventEmitter`] - Builds events and runs handlers
//! - [`services::link_service::LinkService`] - Link lookup and follow
//! - [`handlers::VisitCounterHandler`] - Built-in visit counting
//! - [`handlers::EventLogHandler`] - Optional event logging

pub mod handlers;
pub mod services;
