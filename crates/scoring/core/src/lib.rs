//! Deterministic cricket scoring logic shared by every scoring surface.
//!
//! `scoring-core` defines the canonical rules (ball events, engine, match
//! state) and exposes pure APIs that can be reused by the runtime, the
//! operator console, and any overlay renderer. All match mutation flows
//! through [`engine::ScoringEngine`], and read-only presentation values are
//! derived by [`view::DisplayModel`].
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod roster;
pub mod state;
pub mod view;

pub use config::{MatchFormat, ScoringConfig};
pub use engine::{
    BallResult, BatsmanCorrection, BowlerCorrection, ExecutionOutcome, IgnoreReason,
    LifecycleError, ScoringEngine, UndoResult, apply_ball, undo_last_ball,
};
pub use error::{ErrorSeverity, ScoringError};
pub use event::{BallEvent, Delivery, InvalidBallEvent};
pub use roster::{Player, PlayerRole, Team, TeamLookup};
pub use state::{
    Ball, BatsmanStats, BowlerStats, Innings, InningsIndex, InningsTotals, Match, MatchDelta,
    MatchId, MatchSnapshot, MatchStatus, PlayerId, TeamId, Toss, TossDecision, TournamentId,
};
pub use view::{BallSlot, BatterLine, BowlerLine, DisplayModel, InningsFraming, OverSlots, ScoreLine};
