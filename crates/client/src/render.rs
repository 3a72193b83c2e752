//! Plain-text scoreboard for the operator console.

use std::fmt;

use scoring_core::{BallEvent, DisplayModel};

/// Overlay sticker text for a highlighted ball.
pub fn sticker(event: BallEvent) -> String {
    match event {
        BallEvent::Wicket => "OUT!".to_string(),
        other => format!("{other}!"),
    }
}

/// Five-line console rendering of a projected match.
pub struct Scoreboard<'a>(pub &'a DisplayModel);

impl fmt::Display for Scoreboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        writeln!(
            f,
            "{} vs {}  [{}]  innings {}",
            view.team_a,
            view.team_b,
            view.status,
            view.innings.number()
        )?;
        writeln!(f, "{} {}   {}", view.batting_team, view.score, view.framing)?;
        writeln!(f, "  {}    {}", view.striker, view.non_striker)?;
        writeln!(f, "  bowling ({}): {}", view.bowling_team, view.bowler)?;
        write!(f, "  this over: {}", view.over)?;
        if let Some(event) = view.highlight {
            write!(f, "   {}", sticker(event))?;
        }
        Ok(())
    }
}

pub fn scoreboard(view: &DisplayModel) -> String {
    Scoreboard(view).to_string()
}

#[cfg(test)]
mod tests {
    use scoring_core::{
        Match, MatchFormat, MatchId, MatchStatus, Player, PlayerId, PlayerRole, ScoringEngine,
        Team, TeamId, Toss, TossDecision, TournamentId,
    };

    use super::*;

    #[test]
    fn scoreboard_lists_every_line() {
        let teams = vec![
            Team::new("a", "Alpha").with_players([Player::new("a1", "Ann", PlayerRole::Batsman)]),
            Team::new("b", "Bravo").with_players([Player::new("b1", "Bob", PlayerRole::Bowler)]),
        ];
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
        ScoringEngine::new(&mut m).apply_ball(MatchFormat::T20, BallEvent::Wicket);

        let view = DisplayModel::project(&m, &teams).unwrap();
        let text = scoreboard(&view);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Alpha vs Bravo  [live]  innings 1");
        assert_eq!(lines[1], "Alpha 0-1 (0.1)   First Innings | CRR 0.00");
        assert_eq!(lines[2], "  Ann* 0 (1)    ... 0 (0)");
        assert_eq!(lines[3], "  bowling (Bravo): Bob 1-0 (0.1)");
        assert_eq!(lines[4], "  this over: W - - - - -   OUT!");
    }

    #[test]
    fn boundary_sticker_shows_the_code() {
        assert_eq!(sticker(BallEvent::Six), "6!");
    }
}
