//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use scoring_core::MatchId;

use super::types::{LifecycleEvent, ScoringEvent};

/// Default channel capacity per topic.
pub const DEFAULT_CAPACITY: usize = 100;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Balls recorded, ignored or undone
    Scoring,
    /// Status, innings and crease changes
    Lifecycle,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    Scoring(ScoringEvent),
    Lifecycle(LifecycleEvent),
}

impl MatchEvent {
    pub fn topic(&self) -> Topic {
        match self {
            MatchEvent::Scoring(_) => Topic::Scoring,
            MatchEvent::Lifecycle(_) => Topic::Lifecycle,
        }
    }

    pub fn match_id(&self) -> &MatchId {
        match self {
            MatchEvent::Scoring(
                ScoringEvent::BallRecorded { match_id, .. }
                | ScoringEvent::BallIgnored { match_id, .. }
                | ScoringEvent::BallUndone { match_id, .. },
            ) => match_id,
            MatchEvent::Lifecycle(event) => &event.match_id,
        }
    }
}

impl From<ScoringEvent> for MatchEvent {
    fn from(event: ScoringEvent) -> Self {
        MatchEvent::Scoring(event)
    }
}

impl From<LifecycleEvent> for MatchEvent {
    fn from(event: LifecycleEvent) -> Self {
        MatchEvent::Lifecycle(event)
    }
}

/// Topic-based event bus
///
/// Viewers subscribe to the topics they render from and re-project the match
/// on every event. Cloning the bus shares the underlying channels.
#[derive(Clone)]
pub struct EventBus {
    scoring: broadcast::Sender<MatchEvent>,
    lifecycle: broadcast::Sender<MatchEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            scoring: broadcast::channel(capacity).0,
            lifecycle: broadcast::channel(capacity).0,
        }
    }

    fn channel(&self, topic: Topic) -> &broadcast::Sender<MatchEvent> {
        match topic {
            Topic::Scoring => &self.scoring,
            Topic::Lifecycle => &self.lifecycle,
        }
    }

    /// Publish an event to its corresponding topic
    ///
    /// Best-effort: with no subscribers the event is dropped.
    pub fn publish(&self, event: impl Into<MatchEvent>) {
        let event = event.into();
        let topic = event.topic();

        if self.channel(topic).send(event).is_err() {
            tracing::trace!(?topic, "no subscribers for topic");
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<MatchEvent> {
        self.channel(topic).subscribe()
    }

    /// Subscribe to every topic at once, one receiver per topic.
    pub fn subscribe_all(&self) -> [(Topic, broadcast::Receiver<MatchEvent>); 2] {
        [
            (Topic::Scoring, self.scoring.subscribe()),
            (Topic::Lifecycle, self.lifecycle.subscribe()),
        ]
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
