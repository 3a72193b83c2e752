//! Common error infrastructure for scoring-core.
//!
//! The engine itself never fails: scoring a ball on a match that is not live
//! is a no-op, and a missing player simply skips that player's figures. Errors
//! only exist at the edges, for rejecting malformed input
//! ([`crate::event::InvalidBallEvent`]) and lifecycle requests that do not fit
//! the match's current status ([`crate::engine::LifecycleError`]).

/// Severity level of an error, used by callers to pick a recovery strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The request may succeed once the operator changes something else
    /// (e.g. starting the match before scoring).
    Recoverable,

    /// Invalid input that should be rejected without retry.
    Validation,

    /// The match state is inconsistent with its own invariants.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all scoring-core errors.
pub trait ScoringError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
