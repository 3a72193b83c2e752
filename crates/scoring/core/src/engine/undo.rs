//! Inverse transition: removes the most recent ball of the innings in play.

use crate::config::ScoringConfig;
use crate::state::stats::rewind_ball;
use crate::state::{Ball, Innings, Match, over_buffer};

/// Pops the last timeline entry and reverses its bookkeeping.
///
/// Returns `None` (and touches nothing) when the timeline is empty. Innings
/// transitions and match completion are not reverted, and the non-striker is
/// left as it is; only the striker is restored from the popped ball.
pub(super) fn revert_last_ball(state: &mut Match) -> Option<Ball> {
    let innings = state.current_mut()?;
    let ball = innings.timeline.pop()?;

    innings.score = innings.score.saturating_sub(u32::from(ball.runs));
    if ball.is_wicket {
        innings.wickets = innings.wickets.saturating_sub(1);
    }

    if let Some(id) = &ball.batsman
        && let Some(stats) = innings.batsman_stats.get_mut(id)
    {
        stats.revert(ball.event);
    }
    if let Some(id) = &ball.bowler
        && let Some(stats) = innings.bowler_stats.get_mut(id)
    {
        stats.revert(ball.event, ball.runs, ball.is_wicket);
    }

    if ball.is_legal() {
        rewind_ball(&mut innings.overs, &mut innings.balls);
    }

    prune_unreferenced(innings, &ball);

    // At an over boundary the over just completed stays on display.
    let display_over = if innings.balls == 0 && innings.overs > 0 {
        innings.overs - 1
    } else {
        innings.overs
    };
    let current_over = over_buffer(&innings.timeline, display_over);

    debug_assert!(current_over.len() <= ScoringConfig::OVER_SLOTS);
    state.current_over = current_over;
    state.striker = ball.batsman.clone();

    Some(ball)
}

/// Drops stat entries the popped ball created, so the maps match what a fold
/// of the remaining timeline would produce. Entries still referenced by the
/// timeline, or carrying operator-entered figures, are kept.
fn prune_unreferenced(innings: &mut Innings, ball: &Ball) {
    if let Some(id) = &ball.batsman
        && innings.batsman(id).is_some_and(|stats| stats.is_zero())
        && !innings
            .timeline
            .iter()
            .any(|other| other.batsman.as_ref() == Some(id))
    {
        innings.batsman_stats.remove(id);
    }

    if let Some(id) = &ball.bowler
        && innings.bowler(id).is_some_and(|stats| stats.is_zero())
        && !innings
            .timeline
            .iter()
            .any(|other| other.bowler.as_ref() == Some(id))
    {
        innings.bowler_stats.remove(id);
    }
}
