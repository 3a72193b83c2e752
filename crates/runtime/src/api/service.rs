//! Single-writer service driving the scoring engine over a stored scorebook.
//!
//! Every operation follows the same cycle: load the scorebook, run one engine
//! operation on one match, save the whole document, then publish an event.
//! Failed operations save nothing. The service does no locking; callers
//! issue operations one at a time.

use std::sync::Arc;

use scoring_core::{
    BallEvent, BallResult, BatsmanCorrection, BowlerCorrection, DisplayModel, LifecycleError, Match,
    MatchFormat, MatchId, PlayerId, ScoringEngine, TeamId, Toss, TournamentId, UndoResult,
};

use crate::api::{Result, RuntimeError};
use crate::events::{EventBus, LifecycleAction, LifecycleEvent, ScoringEvent};
use crate::repository::ScorebookRepository;
use crate::scorebook::Scorebook;

pub struct ScoringService<R> {
    repo: Arc<R>,
    scorebook_id: String,
    events: EventBus,
}

impl<R: ScorebookRepository> ScoringService<R> {
    pub fn new(repo: Arc<R>, scorebook_id: impl Into<String>, events: EventBus) -> Self {
        Self {
            repo,
            scorebook_id: scorebook_id.into(),
            events,
        }
    }

    pub fn scorebook_id(&self) -> &str {
        &self.scorebook_id
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Creates an empty scorebook unless one is already stored.
    pub fn ensure_scorebook(&self) -> Result<()> {
        if !self.repo.exists(&self.scorebook_id) {
            self.repo.save(&self.scorebook_id, &Scorebook::new())?;
            tracing::info!(scorebook = %self.scorebook_id, "created empty scorebook");
        }
        Ok(())
    }

    pub fn scorebook(&self) -> Result<Scorebook> {
        self.repo
            .load(&self.scorebook_id)?
            .ok_or_else(|| RuntimeError::ScorebookNotFound(self.scorebook_id.clone()))
    }

    /// Applies an arbitrary edit to the scorebook (tournaments, teams,
    /// players) and saves it when the edit succeeds.
    pub fn update_scorebook<T>(&self, edit: impl FnOnce(&mut Scorebook) -> Result<T>) -> Result<T> {
        let mut book = self.scorebook()?;
        let value = edit(&mut book)?;
        self.repo.save(&self.scorebook_id, &book)?;
        Ok(value)
    }

    pub fn match_state(&self, match_id: &MatchId) -> Result<Match> {
        self.scorebook()?
            .match_by_id(match_id)
            .cloned()
            .ok_or_else(|| RuntimeError::MatchNotFound(match_id.clone()))
    }

    /// Projects the match for display, `None` while its teams are unresolved.
    pub fn display(&self, match_id: &MatchId) -> Result<Option<DisplayModel>> {
        let book = self.scorebook()?;
        let state = book
            .match_by_id(match_id)
            .ok_or_else(|| RuntimeError::MatchNotFound(match_id.clone()))?;
        Ok(DisplayModel::project(state, &book))
    }

    pub fn create_fixture(
        &self,
        tournament: &TournamentId,
        team_a: TeamId,
        team_b: TeamId,
        toss: Toss,
    ) -> Result<MatchId> {
        let mut book = self.scorebook()?;
        let id = book.create_fixture(tournament, team_a, team_b, toss)?;
        self.repo.save(&self.scorebook_id, &book)?;

        tracing::info!(match_id = %id, %tournament, "fixture created");
        if let Some(state) = book.match_by_id(&id) {
            self.publish_lifecycle(state, LifecycleAction::Created);
        }
        Ok(id)
    }

    pub fn score_ball(&self, match_id: &MatchId, event: BallEvent) -> Result<BallResult> {
        let (result, _) = self.modify_match(match_id, |engine, format| {
            Ok(engine.apply_ball(format, event))
        })?;

        match &result {
            BallResult::Recorded(outcome) => self.events.publish(ScoringEvent::BallRecorded {
                match_id: match_id.clone(),
                ball: outcome.ball.clone(),
                delta: outcome.delta,
            }),
            BallResult::Ignored(reason) => {
                tracing::warn!(%match_id, %event, %reason, "ball event ignored");
                self.events.publish(ScoringEvent::BallIgnored {
                    match_id: match_id.clone(),
                    event,
                    reason: *reason,
                });
            }
        }
        Ok(result)
    }

    pub fn undo_last_ball(&self, match_id: &MatchId) -> Result<UndoResult> {
        let (result, _) =
            self.modify_match(match_id, |engine, _| Ok(engine.undo_last_ball()))?;

        match &result {
            UndoResult::Reverted(outcome) => self.events.publish(ScoringEvent::BallUndone {
                match_id: match_id.clone(),
                ball: outcome.ball.clone(),
                delta: outcome.delta,
            }),
            UndoResult::EmptyTimeline => {
                tracing::debug!(%match_id, "nothing to undo");
            }
        }
        Ok(result)
    }

    pub fn start_match(&self, match_id: &MatchId) -> Result<()> {
        self.lifecycle(match_id, LifecycleAction::Started, |engine| engine.start())
    }

    pub fn pause_match(&self, match_id: &MatchId) -> Result<()> {
        self.lifecycle(match_id, LifecycleAction::Paused, |engine| engine.pause())
    }

    pub fn end_match(&self, match_id: &MatchId) -> Result<()> {
        self.lifecycle(match_id, LifecycleAction::Ended, |engine| {
            engine.end();
            Ok(())
        })
    }

    pub fn change_innings(&self, match_id: &MatchId) -> Result<()> {
        self.lifecycle(match_id, LifecycleAction::InningsChanged, |engine| {
            engine.change_innings()
        })
    }

    pub fn assign_players(
        &self,
        match_id: &MatchId,
        striker: Option<PlayerId>,
        non_striker: Option<PlayerId>,
        bowler: Option<PlayerId>,
    ) -> Result<()> {
        self.lifecycle(match_id, LifecycleAction::PlayersAssigned, |engine| {
            engine.assign_players(striker, non_striker, bowler);
            Ok(())
        })
    }

    pub fn override_batsman_stats(
        &self,
        match_id: &MatchId,
        player: PlayerId,
        correction: BatsmanCorrection,
    ) -> Result<()> {
        self.lifecycle(match_id, LifecycleAction::StatsCorrected, |engine| {
            engine.correct_batsman(player, correction)
        })
    }

    pub fn override_bowler_stats(
        &self,
        match_id: &MatchId,
        player: PlayerId,
        correction: BowlerCorrection,
    ) -> Result<()> {
        self.lifecycle(match_id, LifecycleAction::StatsCorrected, |engine| {
            engine.correct_bowler(player, correction)
        })
    }

    /// Load, run `op` against one match, save on success.
    fn modify_match<T>(
        &self,
        match_id: &MatchId,
        op: impl FnOnce(&mut ScoringEngine<'_>, MatchFormat) -> Result<T>,
    ) -> Result<(T, Match)> {
        let mut book = self.scorebook()?;
        let format = book
            .match_by_id(match_id)
            .map(|state| book.format_of(state))
            .ok_or_else(|| RuntimeError::MatchNotFound(match_id.clone()))?;
        let state = book
            .match_mut(match_id)
            .ok_or_else(|| RuntimeError::MatchNotFound(match_id.clone()))?;

        let value = op(&mut ScoringEngine::new(&mut *state), format)?;
        let snapshot = state.clone();

        self.repo.save(&self.scorebook_id, &book)?;
        Ok((value, snapshot))
    }

    fn lifecycle(
        &self,
        match_id: &MatchId,
        action: LifecycleAction,
        op: impl FnOnce(&mut ScoringEngine<'_>) -> std::result::Result<(), LifecycleError>,
    ) -> Result<()> {
        let ((), state) = self.modify_match(match_id, |engine, _| op(engine).map_err(RuntimeError::from))?;

        tracing::info!(%match_id, %action, status = %state.status, "match updated");
        self.publish_lifecycle(&state, action);
        Ok(())
    }

    fn publish_lifecycle(&self, state: &Match, action: LifecycleAction) {
        self.events.publish(LifecycleEvent {
            match_id: state.id.clone(),
            action,
            status: state.status,
            innings: state.current_innings,
        });
    }
}
