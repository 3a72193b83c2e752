//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the repository and event layers can stay focused on infrastructure.

pub mod errors;
pub mod service;

pub use errors::{Result, RuntimeError};
pub use service::ScoringService;
