//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from repositories and engine lifecycle checks so clients
//! can bubble them up with consistent context.
use thiserror::Error;

use scoring_core::{ErrorSeverity, LifecycleError, MatchId, ScoringError, TeamId, TournamentId};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("scorebook {0:?} not found")]
    ScorebookNotFound(String),

    #[error("match {0} not found")]
    MatchNotFound(MatchId),

    #[error("tournament {0} not found")]
    TournamentNotFound(TournamentId),

    #[error("team {0} not found")]
    TeamNotFound(TeamId),

    #[error("toss winner {winner} is not playing this match")]
    InvalidToss { winner: TeamId },

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

impl ScoringError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ScorebookNotFound(_)
            | Self::MatchNotFound(_)
            | Self::TournamentNotFound(_)
            | Self::TeamNotFound(_)
            | Self::InvalidToss { .. } => ErrorSeverity::Validation,
            Self::Repository(_) => ErrorSeverity::Internal,
            Self::Lifecycle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ScorebookNotFound(_) => "scorebook_not_found",
            Self::MatchNotFound(_) => "match_not_found",
            Self::TournamentNotFound(_) => "tournament_not_found",
            Self::TeamNotFound(_) => "team_not_found",
            Self::InvalidToss { .. } => "invalid_toss",
            Self::Repository(_) => "repository",
            Self::Lifecycle(err) => err.error_code(),
        }
    }
}
