//! Ball event vocabulary and its classification.
//!
//! The operator issues exactly one of eleven codes per delivery. Parsing a
//! code with [`BallEvent::from_str`](std::str::FromStr) is the input boundary:
//! anything outside the vocabulary is rejected there and never reaches the
//! engine.

use std::str::FromStr;

use crate::error::{ErrorSeverity, ScoringError};

/// A single delivery outcome as entered by the scorer.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum BallEvent {
    #[strum(to_string = "0")]
    #[cfg_attr(feature = "serde", serde(rename = "0"))]
    Dot,
    #[strum(to_string = "1")]
    #[cfg_attr(feature = "serde", serde(rename = "1"))]
    One,
    #[strum(to_string = "2")]
    #[cfg_attr(feature = "serde", serde(rename = "2"))]
    Two,
    #[strum(to_string = "3")]
    #[cfg_attr(feature = "serde", serde(rename = "3"))]
    Three,
    #[strum(to_string = "4")]
    #[cfg_attr(feature = "serde", serde(rename = "4"))]
    Four,
    #[strum(to_string = "5")]
    #[cfg_attr(feature = "serde", serde(rename = "5"))]
    Five,
    #[strum(to_string = "6")]
    #[cfg_attr(feature = "serde", serde(rename = "6"))]
    Six,
    /// Batter dismissed. Legal ball, no runs.
    #[strum(to_string = "W")]
    #[cfg_attr(feature = "serde", serde(rename = "W"))]
    Wicket,
    /// One extra run, does not count towards the over.
    #[strum(to_string = "WD")]
    #[cfg_attr(feature = "serde", serde(rename = "WD"))]
    Wide,
    /// One extra run, does not count towards the over.
    #[strum(to_string = "NB")]
    #[cfg_attr(feature = "serde", serde(rename = "NB"))]
    NoBall,
    /// One extra run on a legal ball, not charged to the bowler.
    #[strum(to_string = "LB")]
    #[cfg_attr(feature = "serde", serde(rename = "LB"))]
    LegBye,
}

/// What a [`BallEvent`] does to the scoreboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delivery {
    /// Runs added to the innings total.
    pub runs: u8,
    pub is_wicket: bool,
    pub is_extra: bool,
    /// Legal balls advance the over; wides and no-balls do not.
    pub is_legal: bool,
}

impl BallEvent {
    pub const fn classify(self) -> Delivery {
        match self {
            Self::Wicket => Delivery {
                runs: 0,
                is_wicket: true,
                is_extra: false,
                is_legal: true,
            },
            Self::Wide | Self::NoBall => Delivery {
                runs: 1,
                is_wicket: false,
                is_extra: true,
                is_legal: false,
            },
            Self::LegBye => Delivery {
                runs: 1,
                is_wicket: false,
                is_extra: true,
                is_legal: true,
            },
            Self::Dot | Self::One | Self::Two | Self::Three | Self::Four | Self::Five | Self::Six => {
                Delivery {
                    runs: self.bat_runs(),
                    is_wicket: false,
                    is_extra: false,
                    is_legal: true,
                }
            }
        }
    }

    /// Runs credited to the striker (numerals only).
    pub const fn bat_runs(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
            Self::Dot | Self::Wicket | Self::Wide | Self::NoBall | Self::LegBye => 0,
        }
    }

    pub const fn is_legal(self) -> bool {
        !matches!(self, Self::Wide | Self::NoBall)
    }

    /// Leg-byes are the only runs not conceded by the bowler.
    pub const fn charged_to_bowler(self) -> bool {
        !matches!(self, Self::LegBye)
    }

    /// Boundaries and wickets get a highlight on the overlay.
    pub const fn is_highlight(self) -> bool {
        matches!(self, Self::Four | Self::Six | Self::Wicket)
    }

    /// Validates an operator-entered code.
    pub fn parse(code: &str) -> Result<Self, InvalidBallEvent> {
        Self::from_str(code.trim()).map_err(|_| InvalidBallEvent(code.to_owned()))
    }
}

/// A ball code outside the eleven-code vocabulary.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid ball event code '{0}' (expected 0-6, W, WD, NB or LB)")]
pub struct InvalidBallEvent(pub String);

impl ScoringError for InvalidBallEvent {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "invalid_ball_event"
    }
}
