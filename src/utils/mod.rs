//! Utility functions shared by the API layer and the admin CLI.
//!
//! - [`last_visited`] - Relative "last visited" formatting

pub mod last_visited;
