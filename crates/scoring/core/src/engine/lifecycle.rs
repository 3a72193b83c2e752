//! Operator lifecycle controls: status changes, crease assignment, and
//! manual corrections of player figures.

use crate::config::ScoringConfig;
use crate::state::{InningsIndex, Match, MatchStatus, PlayerId};

use super::errors::LifecycleError;

/// Partial correction of a batter's figures; `None` keeps the current value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatsmanCorrection {
    pub runs: Option<u32>,
    pub balls: Option<u32>,
}

/// Partial correction of a bowler's figures; `None` keeps the current value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BowlerCorrection {
    pub overs: Option<u16>,
    pub balls: Option<u8>,
    pub runs: Option<u32>,
    pub wickets: Option<u8>,
}

pub(super) fn start(state: &mut Match) -> Result<(), LifecycleError> {
    match state.status {
        MatchStatus::Finished => Err(LifecycleError::Finished {
            match_id: state.id.clone(),
        }),
        MatchStatus::Live => Ok(()),
        MatchStatus::Upcoming | MatchStatus::Paused => {
            state.status = MatchStatus::Live;
            Ok(())
        }
    }
}

pub(super) fn pause(state: &mut Match) -> Result<(), LifecycleError> {
    if state.status != MatchStatus::Live {
        return Err(LifecycleError::UnexpectedStatus {
            match_id: state.id.clone(),
            status: state.status,
            expected: MatchStatus::Live,
        });
    }
    state.status = MatchStatus::Paused;
    Ok(())
}

pub(super) fn end(state: &mut Match) {
    state.status = MatchStatus::Finished;
}

/// Manual innings change, equivalent to the automatic hand-over.
pub(super) fn change_innings(state: &mut Match) -> Result<(), LifecycleError> {
    if state.status != MatchStatus::Live {
        return Err(LifecycleError::UnexpectedStatus {
            match_id: state.id.clone(),
            status: state.status,
            expected: MatchStatus::Live,
        });
    }
    if state.current_innings == InningsIndex::Second {
        return Err(LifecycleError::SecondInningsStarted {
            match_id: state.id.clone(),
        });
    }
    state.open_second_innings();
    Ok(())
}

pub(super) fn assign_players(
    state: &mut Match,
    striker: Option<PlayerId>,
    non_striker: Option<PlayerId>,
    bowler: Option<PlayerId>,
) {
    state.striker = striker;
    state.non_striker = non_striker;
    state.bowler = bowler;
}

pub(super) fn correct_batsman(
    state: &mut Match,
    player: PlayerId,
    correction: BatsmanCorrection,
) -> Result<(), LifecycleError> {
    let match_id = state.id.clone();
    let index = state.current_innings;
    let innings = state
        .current_mut()
        .ok_or(LifecycleError::MissingInnings {
            match_id,
            innings: index,
        })?;

    let stats = innings.batsman_stats.entry(player).or_default();
    if let Some(runs) = correction.runs {
        stats.runs = runs;
    }
    if let Some(balls) = correction.balls {
        stats.balls = balls;
    }
    Ok(())
}

pub(super) fn correct_bowler(
    state: &mut Match,
    player: PlayerId,
    correction: BowlerCorrection,
) -> Result<(), LifecycleError> {
    let match_id = state.id.clone();
    let out_of_range = |field, value, max| LifecycleError::CorrectionOutOfRange {
        match_id: match_id.clone(),
        field,
        value,
        max,
    };
    // `balls` is the bowler's current-over cursor, so a full over is `overs + 1`.
    let max_balls = ScoringConfig::BALLS_PER_OVER - 1;
    if let Some(balls) = correction.balls
        && balls > max_balls
    {
        return Err(out_of_range("balls", balls, max_balls));
    }
    if let Some(wickets) = correction.wickets
        && wickets > ScoringConfig::MAX_WICKETS
    {
        return Err(out_of_range("wickets", wickets, ScoringConfig::MAX_WICKETS));
    }

    let index = state.current_innings;
    let innings = state
        .current_mut()
        .ok_or(LifecycleError::MissingInnings {
            match_id,
            innings: index,
        })?;

    let stats = innings.bowler_stats.entry(player).or_default();
    if let Some(overs) = correction.overs {
        stats.overs = overs;
    }
    if let Some(balls) = correction.balls {
        stats.balls = balls;
    }
    if let Some(runs) = correction.runs {
        stats.runs = runs;
    }
    if let Some(wickets) = correction.wickets {
        stats.wickets = wickets;
    }
    Ok(())
}
