/// Scoring constants and the format → overs-cap lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ScoringConfig;

impl ScoringConfig {
    /// Legal deliveries that make up one over.
    pub const BALLS_PER_OVER: u8 = 6;
    /// Wickets that close an innings (all out).
    pub const MAX_WICKETS: u8 = 10;
    /// Slots rendered for the current over on an overlay.
    pub const OVER_SLOTS: usize = 6;
}

/// Limited-overs format played by a tournament.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum MatchFormat {
    T10,
    T20,
    /// One-day international, also the fallback when no format is known.
    #[default]
    #[strum(to_string = "ODI")]
    #[cfg_attr(feature = "serde", serde(rename = "ODI"))]
    Odi,
}

impl MatchFormat {
    /// Overs each side may bat before its innings closes.
    pub const fn overs_cap(self) -> u16 {
        match self {
            Self::T10 => 10,
            Self::T20 => 20,
            Self::Odi => 50,
        }
    }
}
