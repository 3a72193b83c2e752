//! Error and no-op reasons surfaced by the scoring engine.

use crate::error::{ErrorSeverity, ScoringError};
use crate::state::{InningsIndex, MatchId, MatchStatus};

/// Why a ball event was accepted but had no effect.
///
/// Not an error: the caller decides whether "nothing happened" matters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IgnoreReason {
    /// Ball events only apply while the match is live.
    NotLive { status: MatchStatus },
    /// The innings slot pointed to by `current_innings` does not exist.
    MissingInnings { innings: InningsIndex },
}

impl core::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotLive { status } => write!(f, "match is {status}, not live"),
            Self::MissingInnings { innings } => {
                write!(f, "innings {} has not started", innings.number())
            }
        }
    }
}

/// Errors raised by lifecycle operations (start, pause, innings change, ...).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("match {match_id} is already finished")]
    Finished { match_id: MatchId },

    #[error("match {match_id} is {status}, expected {expected}")]
    UnexpectedStatus {
        match_id: MatchId,
        status: MatchStatus,
        expected: MatchStatus,
    },

    #[error("match {match_id} is already in its second innings")]
    SecondInningsStarted { match_id: MatchId },

    #[error("match {match_id}: bowler {field} {value} is out of range (max {max})")]
    CorrectionOutOfRange {
        match_id: MatchId,
        field: &'static str,
        value: u8,
        max: u8,
    },

    #[error("match {match_id} has no innings {}", .innings.number())]
    MissingInnings {
        match_id: MatchId,
        innings: InningsIndex,
    },
}

impl ScoringError for LifecycleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Finished { .. }
            | Self::SecondInningsStarted { .. }
            | Self::CorrectionOutOfRange { .. } => ErrorSeverity::Validation,
            Self::UnexpectedStatus { .. } => ErrorSeverity::Recoverable,
            Self::MissingInnings { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Finished { .. } => "match_finished",
            Self::UnexpectedStatus { .. } => "unexpected_status",
            Self::SecondInningsStarted { .. } => "second_innings_started",
            Self::CorrectionOutOfRange { .. } => "correction_out_of_range",
            Self::MissingInnings { .. } => "missing_innings",
        }
    }
}
