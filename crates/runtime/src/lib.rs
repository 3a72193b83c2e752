//! Runtime orchestration around the scoring engine.
//!
//! This crate wires the pure engine in `scoring-core` to storage and to the
//! viewers that follow a match. Consumers embed [`ScoringService`] to score
//! balls and run lifecycle operations, and subscribe to its [`EventBus`] to
//! re-project the match after every change.
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the service and the error types downstream clients see
//! - [`events`] provides the topic-based event bus
//! - [`repository`] persists whole scorebooks
//! - [`scorebook`] defines the persisted document
pub mod api;
pub mod events;
pub mod repository;
pub mod scorebook;

pub use api::{Result, RuntimeError, ScoringService};
pub use events::{EventBus, LifecycleAction, LifecycleEvent, MatchEvent, ScoringEvent, Topic};
pub use repository::{
    FileScorebookRepository, InMemoryScorebookRepo, RepositoryError, ScorebookRepository,
};
pub use scorebook::{Scorebook, Tournament};
