use std::collections::BTreeMap;

use crate::config::ScoringConfig;
use crate::event::BallEvent;

use super::ids::{PlayerId, TeamId};
use super::stats::{BatsmanStats, BowlerStats, roll_over};

/// One recorded delivery. Immutable once appended; undo removes it whole.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ball {
    /// Innings legal-ball counter after this delivery (1-6 for legal balls).
    pub ball_number: u8,
    /// Completed overs when the delivery was bowled.
    pub over_number: u16,
    pub event: BallEvent,
    pub runs: u8,
    pub is_wicket: bool,
    pub is_extra: bool,
    /// Striker at the time of the delivery, if one was assigned.
    pub batsman: Option<PlayerId>,
    /// Bowler at the time of the delivery, if one was assigned.
    pub bowler: Option<PlayerId>,
}

impl Ball {
    pub fn is_legal(&self) -> bool {
        self.event.is_legal()
    }
}

/// One team's batting effort.
///
/// The timeline is the source of truth: every counter here can be recomputed
/// with [`InningsTotals::fold`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Innings {
    pub batting_team: TeamId,
    pub bowling_team: TeamId,
    pub score: u32,
    pub wickets: u8,
    /// Completed overs.
    pub overs: u16,
    /// Legal balls in the current over (0-5).
    pub balls: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub timeline: Vec<Ball>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub batsman_stats: BTreeMap<PlayerId, BatsmanStats>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bowler_stats: BTreeMap<PlayerId, BowlerStats>,
    /// Runs required to win; only set on the second innings.
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: Option<u32>,
}

impl Innings {
    pub fn new(batting_team: TeamId, bowling_team: TeamId) -> Self {
        Self {
            batting_team,
            bowling_team,
            score: 0,
            wickets: 0,
            overs: 0,
            balls: 0,
            timeline: Vec::new(),
            batsman_stats: BTreeMap::new(),
            bowler_stats: BTreeMap::new(),
            target: None,
        }
    }

    /// Second innings chasing `target`.
    pub fn chasing(batting_team: TeamId, bowling_team: TeamId, target: u32) -> Self {
        Self {
            target: Some(target),
            ..Self::new(batting_team, bowling_team)
        }
    }

    /// Legal deliveries bowled so far.
    pub fn legal_balls(&self) -> u32 {
        u32::from(self.overs) * u32::from(ScoringConfig::BALLS_PER_OVER) + u32::from(self.balls)
    }

    pub fn is_all_out(&self) -> bool {
        self.wickets >= ScoringConfig::MAX_WICKETS
    }

    pub fn target_reached(&self) -> bool {
        self.target.is_some_and(|target| self.score >= target)
    }

    pub fn batsman(&self, id: &PlayerId) -> Option<&BatsmanStats> {
        self.batsman_stats.get(id)
    }

    pub fn bowler(&self, id: &PlayerId) -> Option<&BowlerStats> {
        self.bowler_stats.get(id)
    }

    /// Snapshot of the aggregate counters, for comparison with a fold.
    pub fn totals(&self) -> InningsTotals {
        InningsTotals {
            score: self.score,
            wickets: self.wickets,
            overs: self.overs,
            balls: self.balls,
            batsman_stats: self.batsman_stats.clone(),
            bowler_stats: self.bowler_stats.clone(),
        }
    }
}

/// Aggregate counters of an innings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InningsTotals {
    pub score: u32,
    pub wickets: u8,
    pub overs: u16,
    pub balls: u8,
    pub batsman_stats: BTreeMap<PlayerId, BatsmanStats>,
    pub bowler_stats: BTreeMap<PlayerId, BowlerStats>,
}

impl InningsTotals {
    /// Replays a timeline from an empty innings.
    pub fn fold(timeline: &[Ball]) -> Self {
        timeline.iter().fold(Self::default(), |mut totals, ball| {
            totals.score += u32::from(ball.runs);
            if ball.is_wicket {
                totals.wickets += 1;
            }
            if ball.is_legal() {
                totals.balls += 1;
                roll_over(&mut totals.overs, &mut totals.balls);
            }
            if let Some(batsman) = &ball.batsman {
                totals
                    .batsman_stats
                    .entry(batsman.clone())
                    .or_default()
                    .record(ball.event);
            }
            if let Some(bowler) = &ball.bowler {
                totals
                    .bowler_stats
                    .entry(bowler.clone())
                    .or_default()
                    .record(ball.event);
            }
            totals
        })
    }
}
