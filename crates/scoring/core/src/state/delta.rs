use bitflags::bitflags;

use super::{InningsIndex, Match, MatchStatus, PlayerId};

bitflags! {
    /// Tracks what a single engine transition changed on a [`Match`].
    ///
    /// Computed by comparing a [`MatchSnapshot`] taken before the transition
    /// with the match after it, so it never disagrees with the state it
    /// describes.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct MatchDelta: u8 {
        const RUNS            = 1 << 0;
        const WICKET          = 1 << 1;
        const OVER_COMPLETED  = 1 << 2;
        const STRIKE_ROTATED  = 1 << 3;
        const INNINGS_CLOSED  = 1 << 4;
        const MATCH_FINISHED  = 1 << 5;
    }
}

/// The counters a [`MatchDelta`] is derived from, without the timeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchSnapshot {
    innings: InningsIndex,
    score: Option<u32>,
    wickets: Option<u8>,
    overs: Option<u16>,
    striker: Option<PlayerId>,
    status: MatchStatus,
}

impl MatchSnapshot {
    pub fn of(state: &Match) -> Self {
        let current = state.current();
        Self {
            innings: state.current_innings,
            score: current.map(|innings| innings.score),
            wickets: current.map(|innings| innings.wickets),
            overs: current.map(|innings| innings.overs),
            striker: state.striker.clone(),
            status: state.status,
        }
    }
}

impl MatchDelta {
    /// Compares `after` against the innings that was in play at `before`.
    pub fn since(before: &MatchSnapshot, after: &Match) -> Self {
        let mut delta = Self::empty();

        if let (Some(score), Some(wickets), Some(overs), Some(next)) = (
            before.score,
            before.wickets,
            before.overs,
            after.innings(before.innings),
        ) {
            delta.set(Self::RUNS, score != next.score);
            delta.set(Self::WICKET, wickets != next.wickets);
            delta.set(Self::OVER_COMPLETED, next.overs > overs);
        }

        let innings_closed = before.innings != after.current_innings;
        delta.set(Self::INNINGS_CLOSED, innings_closed);
        // A closed innings clears the crease, which is not a rotation.
        delta.set(
            Self::STRIKE_ROTATED,
            !innings_closed && before.striker != after.striker,
        );
        delta.set(
            Self::MATCH_FINISHED,
            before.status != MatchStatus::Finished && after.status == MatchStatus::Finished,
        );

        delta
    }
}
