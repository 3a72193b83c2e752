//! Forward transition: one ball event applied to a live match.

use crate::event::BallEvent;
use crate::state::stats::roll_over;
use crate::state::{Ball, InningsIndex, Match, MatchStatus};

use super::IgnoreReason;

/// Applies `event` to the innings in play and returns the recorded ball.
///
/// Preconditions are checked before anything is touched, so an ignored event
/// leaves the match exactly as it was.
pub(super) fn record_ball(
    state: &mut Match,
    overs_cap: u16,
    event: BallEvent,
) -> Result<Ball, IgnoreReason> {
    if !state.is_live() {
        return Err(IgnoreReason::NotLive {
            status: state.status,
        });
    }

    let index = state.current_innings;
    let striker = state.striker.clone();
    let bowler = state.bowler.clone();
    let delivery = event.classify();

    let Some(innings) = state.current_mut() else {
        return Err(IgnoreReason::MissingInnings { innings: index });
    };

    innings.score += u32::from(delivery.runs);
    if delivery.is_wicket {
        innings.wickets += 1;
    }
    if delivery.is_legal {
        innings.balls += 1;
    }

    let ball = Ball {
        ball_number: innings.balls,
        over_number: innings.overs,
        event,
        runs: delivery.runs,
        is_wicket: delivery.is_wicket,
        is_extra: delivery.is_extra,
        batsman: striker,
        bowler,
    };
    innings.timeline.push(ball.clone());

    if let Some(id) = &ball.batsman {
        innings
            .batsman_stats
            .entry(id.clone())
            .or_default()
            .record(event);
    }
    if let Some(id) = &ball.bowler {
        innings
            .bowler_stats
            .entry(id.clone())
            .or_default()
            .record(event);
    }

    let over_completed = roll_over(&mut innings.overs, &mut innings.balls);
    let innings_closed = innings.is_all_out() || innings.overs >= overs_cap;

    if delivery.is_legal {
        show_in_current_over(state, &ball);
        if delivery.runs % 2 == 1 {
            state.swap_strike();
        }
    }

    if over_completed {
        state.current_over.clear();
        state.swap_strike();
    }

    if innings_closed {
        close_innings(state, index);
    }

    if state
        .innings2
        .as_ref()
        .is_some_and(|second| second.target_reached())
        && state.status != MatchStatus::Finished
    {
        tracing::info!(match_id = %state.id, "target reached, match finished");
        state.status = MatchStatus::Finished;
    }

    Ok(ball)
}

/// Pushes a legal ball onto the over buffer.
///
/// After an undo at an over boundary the buffer still shows the completed
/// over; the first ball of the next over replaces it.
fn show_in_current_over(state: &mut Match, ball: &Ball) {
    if state
        .current_over
        .first()
        .is_some_and(|shown| shown.over_number != ball.over_number)
    {
        state.current_over.clear();
    }
    if let Err(err) = state.current_over.try_push(ball.clone()) {
        // Only reachable with a hand-edited buffer; keep the newest ball visible.
        tracing::warn!(match_id = %state.id, over = ball.over_number, "over buffer full");
        state.current_over.clear();
        state.current_over.push(err.element());
    }
}

/// All out or overs exhausted: first innings hands over, second ends the match.
fn close_innings(state: &mut Match, index: InningsIndex) {
    match index {
        InningsIndex::First => {
            state.open_second_innings();
            tracing::info!(
                match_id = %state.id,
                chase_target = ?state.innings2.as_ref().and_then(|second| second.target),
                "first innings closed"
            );
        }
        InningsIndex::Second => {
            state.status = MatchStatus::Finished;
            tracing::info!(match_id = %state.id, "second innings closed, match finished");
        }
    }
}
