//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations. Implementations live in
//! `crate::infrastructure::persistence`; mock implementations are generated via
//! `mockall` for unit tests.
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod short_link_repository;

pub use short_link_repository::{ShortLinkRepository, StoreError};

#[cfg(test)]
pub use short_link_repository::MockShortLinkRepository;
