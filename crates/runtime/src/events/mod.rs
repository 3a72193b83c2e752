//! Topic-based event bus for match updates.
//!
//! The service publishes one event per operation after the scorebook has been
//! saved, so a subscriber that reloads on receipt always sees the new state.

mod bus;
mod types;

pub use bus::{DEFAULT_CAPACITY, EventBus, MatchEvent, Topic};
pub use types::{LifecycleAction, LifecycleEvent, ScoringEvent};
