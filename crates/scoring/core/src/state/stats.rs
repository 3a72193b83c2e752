//! Per-player figures and the over-cursor arithmetic shared by the engine's
//! forward and inverse transitions.

use crate::config::ScoringConfig;
use crate::event::BallEvent;

/// Cumulative batting figures for one innings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatsmanStats {
    pub runs: u32,
    /// Legal balls faced, leg-byes included.
    pub balls: u32,
}

impl BatsmanStats {
    pub const fn new(runs: u32, balls: u32) -> Self {
        Self { runs, balls }
    }

    pub(crate) fn record(&mut self, event: BallEvent) {
        self.runs = self.runs.saturating_add(u32::from(event.bat_runs()));
        if event.is_legal() {
            self.balls = self.balls.saturating_add(1);
        }
    }

    pub(crate) fn revert(&mut self, event: BallEvent) {
        self.runs = self.runs.saturating_sub(u32::from(event.bat_runs()));
        if event.is_legal() {
            self.balls = self.balls.saturating_sub(1);
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Cumulative bowling figures for one innings.
///
/// `overs`/`balls` form the bowler's own over cursor. It moves in lock-step
/// with the innings cursor while this bowler is on, and keeps its value after
/// a bowling change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BowlerStats {
    pub overs: u16,
    /// Legal balls in the bowler's current over (0-5).
    pub balls: u8,
    pub runs: u32,
    pub wickets: u8,
}

impl BowlerStats {
    pub const fn new(overs: u16, balls: u8, runs: u32, wickets: u8) -> Self {
        Self {
            overs,
            balls,
            runs,
            wickets,
        }
    }

    pub(crate) fn record(&mut self, event: BallEvent) {
        let delivery = event.classify();
        if event.charged_to_bowler() {
            self.runs = self.runs.saturating_add(u32::from(delivery.runs));
        }
        if delivery.is_wicket {
            self.wickets = self.wickets.saturating_add(1);
        }
        if delivery.is_legal {
            self.balls = self.balls.saturating_add(1);
            roll_over(&mut self.overs, &mut self.balls);
        }
    }

    pub(crate) fn revert(&mut self, event: BallEvent, runs: u8, is_wicket: bool) {
        if event.charged_to_bowler() {
            self.runs = self.runs.saturating_sub(u32::from(runs));
        }
        if is_wicket {
            self.wickets = self.wickets.saturating_sub(1);
        }
        if event.is_legal() {
            rewind_ball(&mut self.overs, &mut self.balls);
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Completes the over when `balls` reached six. Returns whether it did.
pub(crate) fn roll_over(overs: &mut u16, balls: &mut u8) -> bool {
    if *balls >= ScoringConfig::BALLS_PER_OVER {
        *overs = overs.saturating_add(1);
        *balls = 0;
        true
    } else {
        false
    }
}

/// Steps the cursor back by one legal ball, borrowing from `overs` at 0.
pub(crate) fn rewind_ball(overs: &mut u16, balls: &mut u8) {
    if *balls == 0 {
        *overs = overs.saturating_sub(1);
        *balls = ScoringConfig::BALLS_PER_OVER - 1;
    } else {
        *balls -= 1;
    }
}
