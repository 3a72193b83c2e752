//! Read-only presentation values derived from a [`Match`].
//!
//! [`DisplayModel::project`] is recomputed on every read and never cached.
//! It holds no references into the match, so any number of viewers can
//! project the same state concurrently. Every text form is a `Display` impl;
//! renderers decide layout and colour.

use core::fmt;

use crate::config::ScoringConfig;
use crate::event::BallEvent;
use crate::roster::TeamLookup;
use crate::state::{BowlerStats, Innings, InningsIndex, Match, MatchStatus, PlayerId, TeamId};

/// Shown wherever a player reference is unset or unknown.
pub const MISSING_NAME: &str = "...";

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayModel {
    pub team_a: String,
    pub team_b: String,
    pub batting_team: String,
    pub bowling_team: String,
    pub status: MatchStatus,
    pub innings: InningsIndex,
    pub score: ScoreLine,
    pub run_rate: String,
    pub framing: InningsFraming,
    pub striker: BatterLine,
    pub non_striker: BatterLine,
    pub bowler: BowlerLine,
    pub over: OverSlots,
    /// Last ball of the over on display, when it was a boundary or a wicket.
    pub highlight: Option<BallEvent>,
}

impl DisplayModel {
    /// Projects the match for display.
    ///
    /// Returns `None` while the innings in play or any of its teams cannot be
    /// resolved; viewers render nothing until they can.
    pub fn project(state: &Match, teams: &impl TeamLookup) -> Option<Self> {
        let innings = state.current()?;
        let team_a = teams.team(&state.team_a)?;
        let team_b = teams.team(&state.team_b)?;
        let batting = teams.team(&innings.batting_team)?;
        let bowling = teams.team(&innings.bowling_team)?;

        let run_rate = run_rate(innings);
        let framing = match innings.target {
            Some(target) => InningsFraming::Second {
                target,
                recap: recap(&state.innings1, teams),
            },
            None => InningsFraming::First {
                run_rate: run_rate.clone(),
            },
        };

        let bowler = BowlerLine {
            name: player_name(teams, &bowling.id, state.bowler.as_ref()),
            figures: state
                .bowler
                .as_ref()
                .and_then(|id| innings.bowler(id))
                .copied(),
        };

        Some(Self {
            team_a: team_a.name.clone(),
            team_b: team_b.name.clone(),
            batting_team: batting.name.clone(),
            bowling_team: bowling.name.clone(),
            status: state.status,
            innings: state.current_innings,
            score: ScoreLine::from_innings(innings),
            run_rate,
            framing,
            striker: BatterLine::resolve(teams, innings, state.striker.as_ref(), true),
            non_striker: BatterLine::resolve(teams, innings, state.non_striker.as_ref(), false),
            bowler,
            over: OverSlots::from_match(state),
            highlight: state
                .current_over
                .last()
                .map(|ball| ball.event)
                .filter(|event| event.is_highlight()),
        })
    }
}

/// `score / (overs + balls / 6)` to two decimals, `"0.00"` before the first
/// legal ball.
pub fn run_rate(innings: &Innings) -> String {
    let overs = f64::from(innings.overs)
        + f64::from(innings.balls) / f64::from(ScoringConfig::BALLS_PER_OVER);
    if overs > 0.0 {
        format!("{:.2}", f64::from(innings.score) / overs)
    } else {
        "0.00".to_string()
    }
}

fn recap(first: &Innings, teams: &impl TeamLookup) -> String {
    let name = teams
        .team(&first.batting_team)
        .map_or(first.batting_team.as_str(), |team| team.name.as_str());
    format!("{name} {}-{}", first.score, first.wickets)
}

fn player_name(teams: &impl TeamLookup, team: &TeamId, player: Option<&PlayerId>) -> String {
    player
        .and_then(|id| teams.player(team, id))
        .map_or_else(|| MISSING_NAME.to_string(), |player| player.name.clone())
}

/// `score-wickets (overs.balls)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreLine {
    pub score: u32,
    pub wickets: u8,
    pub overs: u16,
    pub balls: u8,
}

impl ScoreLine {
    pub fn from_innings(innings: &Innings) -> Self {
        Self {
            score: innings.score,
            wickets: innings.wickets,
            overs: innings.overs,
            balls: innings.balls,
        }
    }
}

impl fmt::Display for ScoreLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} ({}.{})",
            self.score, self.wickets, self.overs, self.balls
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InningsFraming {
    First { run_rate: String },
    /// Chasing: the target and the first innings recap (`"<team> <score>-<wickets>"`).
    Second { target: u32, recap: String },
}

impl fmt::Display for InningsFraming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First { run_rate } => write!(f, "First Innings | CRR {run_rate}"),
            Self::Second { target, recap } => write!(f, "Target: {target} | {recap}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatterLine {
    pub name: String,
    pub runs: u32,
    pub balls: u32,
    pub on_strike: bool,
}

impl BatterLine {
    fn resolve(
        teams: &impl TeamLookup,
        innings: &Innings,
        player: Option<&PlayerId>,
        on_strike: bool,
    ) -> Self {
        let stats = player
            .and_then(|id| innings.batsman(id))
            .copied()
            .unwrap_or_default();
        Self {
            name: player_name(teams, &innings.batting_team, player),
            runs: stats.runs,
            balls: stats.balls,
            on_strike,
        }
    }
}

impl fmt::Display for BatterLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.on_strike { "*" } else { "" };
        write!(f, "{}{marker} {} ({})", self.name, self.runs, self.balls)
    }
}

/// Bowler name plus `wickets-runs (overs.balls)` once figures exist.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BowlerLine {
    pub name: String,
    pub figures: Option<BowlerStats>,
}

impl fmt::Display for BowlerLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(stats) = &self.figures {
            write!(
                f,
                " {}-{} ({}.{})",
                stats.wickets, stats.runs, stats.overs, stats.balls
            )?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BallSlot {
    Ball(BallEvent),
    Upcoming,
}

impl fmt::Display for BallSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ball(event) => write!(f, "{event}"),
            Self::Upcoming => f.write_str("-"),
        }
    }
}

/// The over on display, always six slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverSlots(pub [BallSlot; ScoringConfig::OVER_SLOTS]);

impl OverSlots {
    pub fn from_match(state: &Match) -> Self {
        let mut slots = [BallSlot::Upcoming; ScoringConfig::OVER_SLOTS];
        for (slot, ball) in slots.iter_mut().zip(&state.current_over) {
            *slot = BallSlot::Ball(ball.event);
        }
        Self(slots)
    }

    pub fn bowled(&self) -> usize {
        self.0
            .iter()
            .filter(|slot| matches!(slot, BallSlot::Ball(_)))
            .count()
    }
}

impl fmt::Display for OverSlots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{slot}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchFormat;
    use crate::engine::ScoringEngine;
    use crate::roster::{Player, PlayerRole, Team};
    use crate::state::{MatchId, Toss, TossDecision, TournamentId};

    fn teams() -> Vec<Team> {
        vec![
            Team::new("a", "Alpha").with_players([
                Player::new("a1", "Ann", PlayerRole::Batsman),
                Player::new("a2", "Abe", PlayerRole::AllRounder),
                Player::new("a9", "Ada", PlayerRole::Bowler),
            ]),
            Team::new("b", "Bravo").with_players([
                Player::new("b1", "Bob", PlayerRole::Bowler),
                Player::new("b2", "Bea", PlayerRole::Batsman),
            ]),
        ]
    }

    fn live_match() -> Match {
        let mut m = Match::fixture(
            MatchId::new("m1"),
            TournamentId::new("t1"),
            TeamId::new("a"),
            TeamId::new("b"),
            Toss::new(TeamId::new("a"), TossDecision::Bat),
        );
        m.status = MatchStatus::Live;
        m.striker = Some(PlayerId::new("a1"));
        m.non_striker = Some(PlayerId::new("a2"));
        m.bowler = Some(PlayerId::new("b1"));
        m
    }

    fn play(m: &mut Match, events: &[BallEvent]) {
        let mut engine = ScoringEngine::new(m);
        for event in events {
            engine.apply_ball(MatchFormat::T20, *event);
        }
    }

    #[test]
    fn fresh_innings_shows_zero_rate_and_empty_over() {
        let view = DisplayModel::project(&live_match(), &teams()).unwrap();
        assert_eq!(view.run_rate, "0.00");
        assert_eq!(view.score.to_string(), "0-0 (0.0)");
        assert_eq!(view.over.to_string(), "- - - - - -");
        assert_eq!(view.bowler.to_string(), "Bob");
        assert_eq!(
            view.framing,
            InningsFraming::First {
                run_rate: "0.00".into()
            }
        );
        assert!(view.highlight.is_none());
    }

    #[test]
    fn run_rate_uses_partial_overs() {
        let mut m = live_match();
        play(&mut m, &[BallEvent::Two; 6]);
        play(&mut m, &[BallEvent::Dot, BallEvent::Dot, BallEvent::Wide]);

        let view = DisplayModel::project(&m, &teams()).unwrap();
        // 13 runs off 1.2 overs.
        assert_eq!(view.run_rate, "9.75");
        assert_eq!(view.over.bowled(), 2);
        assert_eq!(view.over.to_string(), "0 0 - - - -");
    }

    #[test]
    fn batter_and_bowler_lines() {
        let mut m = live_match();
        play(&mut m, &[BallEvent::Four, BallEvent::One, BallEvent::Wicket]);
        m.striker = None;

        let view = DisplayModel::project(&m, &teams()).unwrap();
        assert_eq!(view.striker.to_string(), "...* 0 (0)");
        assert_eq!(view.non_striker.to_string(), "Ann 5 (2)");
        assert_eq!(view.bowler.to_string(), "Bob 1-5 (0.3)");
        assert_eq!(view.highlight, Some(BallEvent::Wicket));
    }

    #[test]
    fn highlight_only_for_boundaries_and_wickets() {
        let mut m = live_match();
        play(&mut m, &[BallEvent::Six]);
        let view = DisplayModel::project(&m, &teams()).unwrap();
        assert_eq!(view.highlight, Some(BallEvent::Six));

        play(&mut m, &[BallEvent::Wide]);
        let view = DisplayModel::project(&m, &teams()).unwrap();
        assert_eq!(view.highlight, Some(BallEvent::Six));

        play(&mut m, &[BallEvent::Three]);
        let view = DisplayModel::project(&m, &teams()).unwrap();
        assert!(view.highlight.is_none());
    }

    #[test]
    fn second_innings_shows_target_and_recap() {
        let mut m = live_match();
        play(&mut m, &[BallEvent::Four, BallEvent::Wicket]);
        ScoringEngine::new(&mut m).change_innings().unwrap();

        let view = DisplayModel::project(&m, &teams()).unwrap();
        assert_eq!(view.batting_team, "Bravo");
        assert_eq!(view.bowling_team, "Alpha");
        assert_eq!(
            view.framing,
            InningsFraming::Second {
                target: 5,
                recap: "Alpha 4-1".into()
            }
        );
        assert_eq!(view.framing.to_string(), "Target: 5 | Alpha 4-1");
        assert_eq!(view.striker.name, MISSING_NAME);
    }

    #[test]
    fn unknown_team_projects_nothing() {
        let mut m = live_match();
        m.team_b = TeamId::new("zz");
        assert!(DisplayModel::project(&m, &teams()).is_none());
    }
}
