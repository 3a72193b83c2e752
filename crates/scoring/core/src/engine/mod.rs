//! Ball-by-ball scoring pipeline.
//!
//! The [`ScoringEngine`] is the authoritative reducer for [`Match`]. It
//! applies one ball event at a time, inverts the most recent one on undo,
//! and hosts the operator's lifecycle controls. It performs no I/O: callers
//! load the match, run the engine, and persist the result.

mod errors;
mod lifecycle;
mod transition;
mod undo;

pub use errors::{IgnoreReason, LifecycleError};
pub use lifecycle::{BatsmanCorrection, BowlerCorrection};

use crate::config::MatchFormat;
use crate::event::BallEvent;
use crate::state::{Ball, Match, MatchDelta, MatchSnapshot, PlayerId};

/// Complete outcome of a recorded ball (or an undone one).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// The timeline entry appended (or removed, for undo).
    pub ball: Ball,
    /// What changed on the match.
    pub delta: MatchDelta,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BallResult {
    Recorded(ExecutionOutcome),
    /// The event was accepted but the match is unchanged.
    Ignored(IgnoreReason),
}

impl BallResult {
    pub fn outcome(&self) -> Option<&ExecutionOutcome> {
        match self {
            Self::Recorded(outcome) => Some(outcome),
            Self::Ignored(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UndoResult {
    Reverted(ExecutionOutcome),
    /// Nothing to undo in the innings in play.
    EmptyTimeline,
}

/// Scoring engine over a caller-owned match.
///
/// Each call either applies its whole transition or leaves the match
/// untouched.
pub struct ScoringEngine<'a> {
    state: &'a mut Match,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(state: &'a mut Match) -> Self {
        Self { state }
    }

    /// Applies one ball event. The format supplies the overs cap.
    pub fn apply_ball(&mut self, format: MatchFormat, event: BallEvent) -> BallResult {
        let before = MatchSnapshot::of(self.state);

        match transition::record_ball(self.state, format.overs_cap(), event) {
            Ok(ball) => {
                let delta = MatchDelta::since(&before, self.state);
                tracing::debug!(
                    match_id = %self.state.id,
                    %event,
                    over = ball.over_number,
                    ball = ball.ball_number,
                    ?delta,
                    "ball recorded"
                );
                BallResult::Recorded(ExecutionOutcome { ball, delta })
            }
            Err(reason) => {
                tracing::debug!(match_id = %self.state.id, %event, %reason, "ball ignored");
                BallResult::Ignored(reason)
            }
        }
    }

    /// Removes the most recent ball of the innings in play.
    pub fn undo_last_ball(&mut self) -> UndoResult {
        let before = MatchSnapshot::of(self.state);

        match undo::revert_last_ball(self.state) {
            Some(ball) => {
                let delta = MatchDelta::since(&before, self.state);
                tracing::debug!(
                    match_id = %self.state.id,
                    event = %ball.event,
                    over = ball.over_number,
                    ball = ball.ball_number,
                    "ball undone"
                );
                UndoResult::Reverted(ExecutionOutcome { ball, delta })
            }
            None => UndoResult::EmptyTimeline,
        }
    }

    /// `upcoming`/`paused` → `live`. Starting a live match is a no-op.
    pub fn start(&mut self) -> Result<(), LifecycleError> {
        lifecycle::start(self.state)
    }

    /// `live` → `paused`.
    pub fn pause(&mut self) -> Result<(), LifecycleError> {
        lifecycle::pause(self.state)
    }

    /// Marks the match finished from any status.
    pub fn end(&mut self) {
        lifecycle::end(self.state);
    }

    /// Closes the first innings early and opens the chase.
    pub fn change_innings(&mut self) -> Result<(), LifecycleError> {
        lifecycle::change_innings(self.state)
    }

    pub fn assign_players(
        &mut self,
        striker: Option<PlayerId>,
        non_striker: Option<PlayerId>,
        bowler: Option<PlayerId>,
    ) {
        lifecycle::assign_players(self.state, striker, non_striker, bowler);
    }

    pub fn correct_batsman(
        &mut self,
        player: PlayerId,
        correction: BatsmanCorrection,
    ) -> Result<(), LifecycleError> {
        lifecycle::correct_batsman(self.state, player, correction)
    }

    pub fn correct_bowler(
        &mut self,
        player: PlayerId,
        correction: BowlerCorrection,
    ) -> Result<(), LifecycleError> {
        lifecycle::correct_bowler(self.state, player, correction)
    }
}

/// Value-in, value-out form of [`ScoringEngine::apply_ball`].
pub fn apply_ball(mut state: Match, format: MatchFormat, event: BallEvent) -> Match {
    ScoringEngine::new(&mut state).apply_ball(format, event);
    state
}

/// Value-in, value-out form of [`ScoringEngine::undo_last_ball`].
pub fn undo_last_ball(mut state: Match) -> Match {
    ScoringEngine::new(&mut state).undo_last_ball();
    state
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::error::ScoringError;
    use crate::state::{
        InningsIndex, InningsTotals, MatchId, MatchStatus, TeamId, Toss, TossDecision,
        TournamentId,
    };

    fn pid(id: &str) -> Option<PlayerId> {
        Some(PlayerId::new(id))
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
        m.striker = pid("a1");
        m.non_striker = pid("a2");
        m.bowler = pid("b1");
        m
    }

    fn play(m: &mut Match, format: MatchFormat, events: &[BallEvent]) {
        let mut engine = ScoringEngine::new(m);
        for event in events {
            engine.apply_ball(format, *event);
        }
    }

    fn assert_folds(m: &Match) {
        let innings = m.current().unwrap();
        assert_eq!(innings.totals(), InningsTotals::fold(&innings.timeline));
    }

    #[test]
    fn undo_inverts_every_event_at_every_cursor() {
        use BallEvent::*;
        let prefixes: [&[BallEvent]; 4] = [
            &[],
            &[One, Wide, Four],
            &[Dot, Dot, Dot, Dot, Dot],
            &[Six, Six, Six, Six, Six, Six],
        ];

        for prefix in prefixes {
            for event in BallEvent::iter() {
                let mut m = live_match();
                play(&mut m, MatchFormat::T20, prefix);
                let before = m.current().unwrap().totals();

                let after = undo_last_ball(apply_ball(m, MatchFormat::T20, event));
                assert_eq!(
                    after.current().unwrap().totals(),
                    before,
                    "undo of {event} after {prefix:?}"
                );
                assert_folds(&after);
            }
        }
    }

    #[test]
    fn six_legal_balls_complete_an_over() {
        use BallEvent::*;
        let mut m = live_match();
        play(&mut m, MatchFormat::T20, &[Dot, Wide, Two, LegBye, NoBall, Wicket, Four]);
        assert_eq!((m.innings1.overs, m.innings1.balls), (0, 5));
        assert_eq!(m.current_over.len(), 5);

        play(&mut m, MatchFormat::T20, &[Dot]);
        assert_eq!((m.innings1.overs, m.innings1.balls), (1, 0));
        assert!(m.current_over.is_empty());
        assert_folds(&m);
    }

    #[test]
    fn wide_and_no_ball_add_one_run_without_advancing() {
        for event in [BallEvent::Wide, BallEvent::NoBall] {
            let mut m = live_match();
            play(&mut m, MatchFormat::T20, &[BallEvent::Two]);
            let result = ScoringEngine::new(&mut m).apply_ball(MatchFormat::T20, event);

            assert_eq!(m.innings1.score, 3);
            assert_eq!(m.innings1.balls, 1);
            let outcome = result.outcome().unwrap();
            assert!(outcome.delta.contains(MatchDelta::RUNS));
            assert!(!outcome.delta.contains(MatchDelta::STRIKE_ROTATED));
        }
    }

    #[test]
    fn leg_bye_counts_for_team_and_batter_balls_only() {
        let mut m = live_match();
        play(&mut m, MatchFormat::T20, &[BallEvent::LegBye]);

        assert_eq!(m.innings1.score, 1);
        let batter = m.innings1.batsman(&PlayerId::new("a1")).unwrap();
        assert_eq!((batter.runs, batter.balls), (0, 1));
        let bowler = m.innings1.bowler(&PlayerId::new("b1")).unwrap();
        assert_eq!(bowler.runs, 0);
    }

    #[test]
    fn odd_run_on_last_ball_of_over_keeps_strike() {
        let mut m = live_match();
        play(&mut m, MatchFormat::T20, &[BallEvent::Dot; 5]);
        assert_eq!((m.striker.clone(), m.non_striker.clone()), (pid("a1"), pid("a2")));

        let result = ScoringEngine::new(&mut m).apply_ball(MatchFormat::T20, BallEvent::One);
        assert_eq!((m.striker.clone(), m.non_striker.clone()), (pid("a1"), pid("a2")));

        let delta = result.outcome().unwrap().delta;
        assert!(delta.contains(MatchDelta::OVER_COMPLETED));
        assert!(!delta.contains(MatchDelta::STRIKE_ROTATED));
    }

    #[test]
    fn odd_runs_mid_over_swap_strike() {
        for event in [BallEvent::One, BallEvent::Three, BallEvent::Five] {
            let mut m = live_match();
            play(&mut m, MatchFormat::T20, &[event]);
            assert_eq!(m.striker, pid("a2"));
            assert_eq!(m.non_striker, pid("a1"));
        }
    }

    #[test]
    fn overs_cap_hands_over_to_second_innings() {
        let mut m = live_match();
        play(&mut m, MatchFormat::T20, &[BallEvent::One; 119]);
        assert_eq!(m.current_innings, InningsIndex::First);

        let result = ScoringEngine::new(&mut m).apply_ball(MatchFormat::T20, BallEvent::Two);
        assert!(result.outcome().unwrap().delta.contains(MatchDelta::INNINGS_CLOSED));

        assert_eq!(m.innings1.overs, 20);
        assert_eq!(m.current_innings, InningsIndex::Second);
        let second = m.innings2.as_ref().unwrap();
        assert_eq!(second.target, Some(122));
        assert_eq!(second.batting_team.as_str(), "b");
        assert!(m.striker.is_none() && m.non_striker.is_none() && m.bowler.is_none());
        assert!(m.current_over.is_empty());
        assert_eq!(m.status, MatchStatus::Live);
    }

    #[test]
    fn tenth_wicket_hands_over_early() {
        let mut m = live_match();
        play(&mut m, MatchFormat::Odi, &[BallEvent::Four, BallEvent::Wicket]);
        play(&mut m, MatchFormat::Odi, &[BallEvent::Wicket; 8]);
        assert_eq!(m.current_innings, InningsIndex::First);

        play(&mut m, MatchFormat::Odi, &[BallEvent::Wicket]);
        assert_eq!(m.innings1.wickets, 10);
        assert_eq!(m.current_innings, InningsIndex::Second);
        assert_eq!(m.innings2.as_ref().unwrap().target, Some(5));
    }

    #[test]
    fn chase_ends_mid_over_when_target_reached() {
        let mut m = live_match();
        ScoringEngine::new(&mut m).change_innings().unwrap();
        m.striker = pid("b1");
        m.non_striker = pid("b2");
        m.bowler = pid("a9");
        m.innings2.as_mut().unwrap().target = Some(6);

        play(&mut m, MatchFormat::T20, &[BallEvent::Two]);
        assert_eq!(m.status, MatchStatus::Live);

        let result = ScoringEngine::new(&mut m).apply_ball(MatchFormat::T20, BallEvent::Four);
        assert_eq!(m.status, MatchStatus::Finished);
        assert!(result.outcome().unwrap().delta.contains(MatchDelta::MATCH_FINISHED));
        assert_eq!(m.innings2.as_ref().unwrap().balls, 2);

        let ignored = ScoringEngine::new(&mut m).apply_ball(MatchFormat::T20, BallEvent::Six);
        assert!(matches!(ignored, BallResult::Ignored(IgnoreReason::NotLive { .. })));
    }

    #[test]
    fn second_innings_all_out_finishes_match() {
        let mut m = live_match();
        ScoringEngine::new(&mut m).change_innings().unwrap();
        m.innings2.as_mut().unwrap().target = Some(300);
        play(&mut m, MatchFormat::T10, &[BallEvent::Wicket; 10]);
        assert_eq!(m.status, MatchStatus::Finished);
    }

    #[test]
    fn undo_on_empty_timeline_is_noop() {
        let m = live_match();
        let mut copy = m.clone();
        assert_eq!(
            ScoringEngine::new(&mut copy).undo_last_ball(),
            UndoResult::EmptyTimeline
        );
        assert_eq!(copy, m);
    }

    #[test]
    fn undo_across_over_boundary_shows_completed_over() {
        let mut m = live_match();
        play(&mut m, MatchFormat::T20, &[BallEvent::Dot; 6]);
        play(&mut m, MatchFormat::T20, &[BallEvent::Four]);
        assert_eq!(m.current_over.len(), 1);

        let mut engine = ScoringEngine::new(&mut m);
        engine.undo_last_ball();
        assert_eq!((m.innings1.overs, m.innings1.balls), (1, 0));
        assert_eq!(m.current_over.len(), 6);
        assert!(m.current_over.iter().all(|ball| ball.over_number == 0));

        ScoringEngine::new(&mut m).undo_last_ball();
        assert_eq!((m.innings1.overs, m.innings1.balls), (0, 5));
        assert_eq!(m.current_over.len(), 5);
        let bowler = m.innings1.bowler(&PlayerId::new("b1")).unwrap();
        assert_eq!((bowler.overs, bowler.balls), (0, 5));
    }

    #[test]
    fn next_ball_after_boundary_undo_starts_a_fresh_over() {
        let mut m = live_match();
        play(&mut m, MatchFormat::T20, &[BallEvent::Dot; 6]);
        play(&mut m, MatchFormat::T20, &[BallEvent::Four]);
        ScoringEngine::new(&mut m).undo_last_ball();
        assert_eq!(m.current_over.len(), 6);

        play(&mut m, MatchFormat::T20, &[BallEvent::Six]);
        assert_eq!((m.innings1.overs, m.innings1.balls), (1, 1));
        assert_eq!(m.current_over.len(), 1);
        assert_eq!(m.current_over[0].event, BallEvent::Six);
        assert_eq!(m.current_over[0].over_number, 1);

        // A wide first keeps the completed over on show until a legal ball.
        ScoringEngine::new(&mut m).undo_last_ball();
        play(&mut m, MatchFormat::T20, &[BallEvent::Wide, BallEvent::Two]);
        let shown: Vec<_> = m.current_over.iter().map(|ball| ball.event).collect();
        assert_eq!(shown, vec![BallEvent::Two]);
    }

    #[test]
    fn undo_restores_striker_but_not_non_striker() {
        let mut m = live_match();
        play(&mut m, MatchFormat::T20, &[BallEvent::One]);
        assert_eq!(m.striker, pid("a2"));

        m.non_striker = pid("a3");
        ScoringEngine::new(&mut m).undo_last_ball();
        assert_eq!(m.striker, pid("a1"));
        assert_eq!(m.non_striker, pid("a3"));
    }

    #[test]
    fn undo_keeps_innings_transition() {
        let mut m = live_match();
        play(&mut m, MatchFormat::T10, &[BallEvent::Dot; 60]);
        assert_eq!(m.current_innings, InningsIndex::Second);

        let result = ScoringEngine::new(&mut m).undo_last_ball();
        assert_eq!(result, UndoResult::EmptyTimeline);
        assert_eq!(m.current_innings, InningsIndex::Second);
        assert_eq!(m.innings1.overs, 10);
    }

    #[test]
    fn lifecycle_transitions() {
        let mut m = live_match();
        m.status = MatchStatus::Upcoming;
        let mut engine = ScoringEngine::new(&mut m);

        assert!(matches!(
            engine.change_innings(),
            Err(LifecycleError::UnexpectedStatus { .. })
        ));
        engine.start().unwrap();
        engine.pause().unwrap();
        assert!(engine.pause().is_err());
        engine.start().unwrap();
        engine.change_innings().unwrap();
        assert!(matches!(
            engine.change_innings(),
            Err(LifecycleError::SecondInningsStarted { .. })
        ));
        engine.end();
        assert!(matches!(engine.start(), Err(LifecycleError::Finished { .. })));
        assert_eq!(m.status, MatchStatus::Finished);
    }

    #[test]
    fn corrections_create_missing_entries_and_keep_unset_fields() {
        let mut m = live_match();
        play(&mut m, MatchFormat::T20, &[BallEvent::Four, BallEvent::Two]);

        let mut engine = ScoringEngine::new(&mut m);
        engine
            .correct_batsman(
                PlayerId::new("a1"),
                BatsmanCorrection {
                    runs: Some(10),
                    balls: None,
                },
            )
            .unwrap();
        engine
            .correct_bowler(
                PlayerId::new("b7"),
                BowlerCorrection {
                    wickets: Some(2),
                    ..Default::default()
                },
            )
            .unwrap();

        let batter = m.innings1.batsman(&PlayerId::new("a1")).unwrap();
        assert_eq!((batter.runs, batter.balls), (10, 2));
        let bowler = m.innings1.bowler(&PlayerId::new("b7")).unwrap();
        assert_eq!((bowler.overs, bowler.balls, bowler.runs, bowler.wickets), (0, 0, 0, 2));
    }

    #[test]
    fn bowler_corrections_reject_out_of_range_figures() {
        let mut m = live_match();
        let mut engine = ScoringEngine::new(&mut m);

        let err = engine
            .correct_bowler(
                PlayerId::new("b1"),
                BowlerCorrection {
                    balls: Some(9),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.error_code(), "correction_out_of_range");
        assert!(matches!(
            err,
            LifecycleError::CorrectionOutOfRange {
                field: "balls",
                value: 9,
                max: 5,
                ..
            }
        ));

        let err = engine
            .correct_bowler(
                PlayerId::new("b1"),
                BowlerCorrection {
                    overs: Some(2),
                    wickets: Some(255),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(
            err,
            LifecycleError::CorrectionOutOfRange { field: "wickets", .. }
        ));
        assert!(m.innings1.bowler(&PlayerId::new("b1")).is_none());

        let mut engine = ScoringEngine::new(&mut m);
        engine
            .correct_bowler(
                PlayerId::new("b1"),
                BowlerCorrection {
                    balls: Some(5),
                    wickets: Some(10),
                    ..Default::default()
                },
            )
            .unwrap();
        engine.apply_ball(MatchFormat::T20, BallEvent::Wicket);
        let bowler = m.innings1.bowler(&PlayerId::new("b1")).unwrap();
        assert_eq!((bowler.overs, bowler.balls, bowler.wickets), (1, 0, 11));
    }
}
