//! Authoritative match state representation.
//!
//! This module owns the data structures that describe a fixture, its innings,
//! the ball timeline, and per-player figures. Callers load and persist these
//! values but mutate them exclusively through the engine.
pub mod delta;
pub mod ids;
pub mod innings;
pub mod stats;

use arrayvec::ArrayVec;

pub use delta::{MatchDelta, MatchSnapshot};
pub use ids::{MatchId, PlayerId, TeamId, TournamentId};
pub use innings::{Ball, Innings, InningsTotals};
pub use stats::{BatsmanStats, BowlerStats};

use crate::config::ScoringConfig;

/// Lifecycle of a fixture. Only `Live` matches accept ball events.
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
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MatchStatus {
    #[default]
    Upcoming,
    Live,
    Paused,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TossDecision {
    Bat,
    Bowl,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Toss {
    pub winner: TeamId,
    pub decision: TossDecision,
}

impl Toss {
    pub fn new(winner: TeamId, decision: TossDecision) -> Self {
        Self { winner, decision }
    }

    /// Returns `(batting, bowling)` for the first innings.
    ///
    /// Team A bats when it won and chose to bat, or when team B won and chose
    /// to bowl. Any other combination puts team B in.
    pub fn first_innings_sides(&self, team_a: &TeamId, team_b: &TeamId) -> (TeamId, TeamId) {
        let a_bats = match self.decision {
            TossDecision::Bat => &self.winner == team_a,
            TossDecision::Bowl => &self.winner == team_b,
        };
        if a_bats {
            (team_a.clone(), team_b.clone())
        } else {
            (team_b.clone(), team_a.clone())
        }
    }
}

/// Current-over buffer, at most one over of legal balls.
pub type OverBuffer = ArrayVec<Ball, { ScoringConfig::OVER_SLOTS }>;

/// Collects the legal balls recorded in `over`, in timeline order.
pub fn over_buffer(timeline: &[Ball], over: u16) -> OverBuffer {
    timeline
        .iter()
        .filter(|ball| ball.is_legal() && ball.over_number == over)
        .take(ScoringConfig::OVER_SLOTS)
        .cloned()
        .collect()
}

/// Which innings slot is in play. Moves from `First` to `Second` exactly once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InningsIndex {
    #[default]
    First,
    Second,
}

impl InningsIndex {
    pub const fn number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }
}

/// One fixture between two teams.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Match {
    pub id: MatchId,
    pub tournament: TournamentId,
    pub team_a: TeamId,
    pub team_b: TeamId,
    pub status: MatchStatus,
    pub toss: Toss,
    pub innings1: Innings,
    /// Present iff `current_innings == Second`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub innings2: Option<Innings>,
    pub current_innings: InningsIndex,
    #[cfg_attr(feature = "serde", serde(default))]
    pub striker: Option<PlayerId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub non_striker: Option<PlayerId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bowler: Option<PlayerId>,
    /// Legal balls of the over on display; cleared when an over completes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub current_over: OverBuffer,
}

impl Match {
    /// Creates an upcoming fixture with an empty first innings decided by the toss.
    pub fn fixture(
        id: MatchId,
        tournament: TournamentId,
        team_a: TeamId,
        team_b: TeamId,
        toss: Toss,
    ) -> Self {
        let (batting, bowling) = toss.first_innings_sides(&team_a, &team_b);
        Self {
            id,
            tournament,
            team_a,
            team_b,
            status: MatchStatus::Upcoming,
            toss,
            innings1: Innings::new(batting, bowling),
            innings2: None,
            current_innings: InningsIndex::First,
            striker: None,
            non_striker: None,
            bowler: None,
            current_over: OverBuffer::new(),
        }
    }

    pub fn is_live(&self) -> bool {
        self.status == MatchStatus::Live
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    pub fn innings(&self, index: InningsIndex) -> Option<&Innings> {
        match index {
            InningsIndex::First => Some(&self.innings1),
            InningsIndex::Second => self.innings2.as_ref(),
        }
    }

    pub fn innings_mut(&mut self, index: InningsIndex) -> Option<&mut Innings> {
        match index {
            InningsIndex::First => Some(&mut self.innings1),
            InningsIndex::Second => self.innings2.as_mut(),
        }
    }

    /// The innings in play, `None` only if the state is malformed.
    pub fn current(&self) -> Option<&Innings> {
        self.innings(self.current_innings)
    }

    pub fn current_mut(&mut self) -> Option<&mut Innings> {
        self.innings_mut(self.current_innings)
    }

    pub(crate) fn swap_strike(&mut self) {
        std::mem::swap(&mut self.striker, &mut self.non_striker);
    }

    /// Opens the second innings with sides swapped and a target of
    /// first-innings score + 1. Does nothing if it is already open.
    pub(crate) fn open_second_innings(&mut self) -> bool {
        if self.current_innings == InningsIndex::Second {
            return false;
        }
        let first = &self.innings1;
        self.innings2 = Some(Innings::chasing(
            first.bowling_team.clone(),
            first.batting_team.clone(),
            first.score + 1,
        ));
        self.current_innings = InningsIndex::Second;
        self.striker = None;
        self.non_striker = None;
        self.bowler = None;
        self.current_over.clear();
        true
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use serde_json::json;

    use super::*;
    use crate::config::MatchFormat;
    use crate::engine::ScoringEngine;
    use crate::event::BallEvent;
    use crate::roster::PlayerRole;

    #[test]
    fn persisted_names_are_stable() {
        assert_eq!(serde_json::to_value(BallEvent::Dot).unwrap(), json!("0"));
        assert_eq!(serde_json::to_value(BallEvent::Wide).unwrap(), json!("WD"));
        assert_eq!(serde_json::to_value(BallEvent::LegBye).unwrap(), json!("LB"));
        assert_eq!(serde_json::to_value(MatchFormat::Odi).unwrap(), json!("ODI"));
        assert_eq!(serde_json::to_value(MatchStatus::Live).unwrap(), json!("live"));
        assert_eq!(
            serde_json::to_value(PlayerRole::AllRounder).unwrap(),
            json!("All-Rounder")
        );
        assert_eq!(
            serde_json::to_value(InningsIndex::Second).unwrap(),
            json!("second")
        );
        assert_eq!(serde_json::to_value(PlayerId::new("p1")).unwrap(), json!("p1"));
    }

    #[test]
    fn scored_match_survives_json() {
        let mut m = Match::fixture(
            MatchId::new("m1"),
            TournamentId::new("t1"),
            TeamId::new("a"),
            TeamId::new("b"),
            Toss::new(TeamId::new("a"), TossDecision::Bat),
        );
        m.status = MatchStatus::Live;
        m.striker = Some(PlayerId::new("a1"));
        m.bowler = Some(PlayerId::new("b1"));
        let mut engine = ScoringEngine::new(&mut m);
        for event in [BallEvent::Four, BallEvent::NoBall, BallEvent::Wicket] {
            engine.apply_ball(MatchFormat::T20, event);
        }

        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value["status"], json!("live"));
        assert_eq!(value["current_innings"], json!("first"));
        assert_eq!(value["innings1"]["timeline"][1]["event"], json!("NB"));
        assert_eq!(value["current_over"].as_array().map(Vec::len), Some(2));

        let restored: Match = serde_json::from_value(value).unwrap();
        assert_eq!(restored, m);
    }
}
