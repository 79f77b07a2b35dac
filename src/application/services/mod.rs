//! Business logic services for the application layer.

pub mod event_service;
pub mod link_service;

pub use event_service::{EmitError, EventEmitter, OnError};
pub use link_service::LinkService;
