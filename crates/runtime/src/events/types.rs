//! Event types for each topic.

use serde::{Deserialize, Serialize};

use scoring_core::{Ball, BallEvent, IgnoreReason, InningsIndex, MatchDelta, MatchId, MatchStatus};

/// Ball-level changes to a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringEvent {
    /// A ball was appended to the timeline.
    BallRecorded {
        match_id: MatchId,
        ball: Ball,
        delta: MatchDelta,
    },

    /// A ball event was accepted but the match did not change.
    BallIgnored {
        match_id: MatchId,
        event: BallEvent,
        reason: IgnoreReason,
    },

    /// The most recent ball was removed.
    BallUndone {
        match_id: MatchId,
        ball: Ball,
        delta: MatchDelta,
    },
}

/// Operator actions that change a match without scoring a ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum LifecycleAction {
    Created,
    Started,
    Paused,
    Ended,
    InningsChanged,
    PlayersAssigned,
    StatsCorrected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    pub match_id: MatchId,
    pub action: LifecycleAction,
    /// Status after the action.
    pub status: MatchStatus,
    pub innings: InningsIndex,
}
