//! The persisted scorebook document: tournaments, teams and their matches.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use scoring_core::{
    Match, MatchFormat, MatchId, Player, Team, TeamId, TeamLookup, Toss, TournamentId,
};

use crate::api::{Result, RuntimeError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    #[serde(default)]
    pub organizer: String,
    pub format: MatchFormat,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub teams: Vec<TeamId>,
    #[serde(default)]
    pub matches: Vec<MatchId>,
    /// Unix timestamp in milliseconds.
    pub created_at: i64,
}

impl Tournament {
    pub fn new(id: impl Into<TournamentId>, name: impl Into<String>, format: MatchFormat) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            organizer: String::new(),
            format,
            start_date: String::new(),
            end_date: String::new(),
            location: String::new(),
            logo_url: None,
            teams: Vec::new(),
            matches: Vec::new(),
            created_at: Utc::now().timestamp_millis(),
        }
    }
}

/// Everything one operator account scores, persisted as a single document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorebook {
    #[serde(default)]
    pub tournaments: Vec<Tournament>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub matches: Vec<Match>,
}

impl Scorebook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tournament(&self, id: &TournamentId) -> Option<&Tournament> {
        self.tournaments.iter().find(|t| &t.id == id)
    }

    pub fn match_by_id(&self, id: &MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| &m.id == id)
    }

    pub fn match_mut(&mut self, id: &MatchId) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| &m.id == id)
    }

    /// Format of the match's tournament, ODI when the tournament is gone.
    pub fn format_of(&self, state: &Match) -> MatchFormat {
        self.tournament(&state.tournament)
            .map(|t| t.format)
            .unwrap_or_default()
    }

    pub fn add_tournament(&mut self, tournament: Tournament) -> TournamentId {
        let id = tournament.id.clone();
        self.tournaments.push(tournament);
        id
    }

    /// Adds a team and enters it in the tournament.
    pub fn add_team(&mut self, tournament: &TournamentId, team: Team) -> Result<TeamId> {
        let entry = self
            .tournaments
            .iter_mut()
            .find(|t| &t.id == tournament)
            .ok_or_else(|| RuntimeError::TournamentNotFound(tournament.clone()))?;

        let id = team.id.clone();
        entry.teams.push(id.clone());
        self.teams.push(team);
        Ok(id)
    }

    pub fn add_player(&mut self, team: &TeamId, player: Player) -> Result<()> {
        let entry = self
            .teams
            .iter_mut()
            .find(|t| &t.id == team)
            .ok_or_else(|| RuntimeError::TeamNotFound(team.clone()))?;
        entry.players.push(player);
        Ok(())
    }

    /// Creates an upcoming match and registers it on its tournament.
    pub fn create_fixture(
        &mut self,
        tournament: &TournamentId,
        team_a: TeamId,
        team_b: TeamId,
        toss: Toss,
    ) -> Result<MatchId> {
        for team in [&team_a, &team_b] {
            if self.team(team).is_none() {
                return Err(RuntimeError::TeamNotFound(team.clone()));
            }
        }
        if toss.winner != team_a && toss.winner != team_b {
            return Err(RuntimeError::InvalidToss {
                winner: toss.winner,
            });
        }

        let id = MatchId::new(self.next_match_id());
        let entry = self
            .tournaments
            .iter_mut()
            .find(|t| &t.id == tournament)
            .ok_or_else(|| RuntimeError::TournamentNotFound(tournament.clone()))?;
        entry.matches.push(id.clone());

        self.matches.push(Match::fixture(
            id.clone(),
            tournament.clone(),
            team_a,
            team_b,
            toss,
        ));
        Ok(id)
    }

    fn next_match_id(&self) -> String {
        let base = format!("match_{}", Utc::now().timestamp_millis());
        let taken = |candidate: &str| self.matches.iter().any(|m| m.id.as_str() == candidate);

        if !taken(&base) {
            return base;
        }
        (1..)
            .map(|n| format!("{base}_{n}"))
            .find(|candidate| !taken(candidate))
            .unwrap_or(base)
    }
}

impl TeamLookup for Scorebook {
    fn team(&self, id: &TeamId) -> Option<&Team> {
        self.teams.team(id)
    }
}

#[cfg(test)]
mod tests {
    use scoring_core::{MatchStatus, PlayerRole, TossDecision};

    use super::*;

    fn scorebook() -> (Scorebook, TournamentId) {
        let mut book = Scorebook::new();
        let tid = book.add_tournament(Tournament::new("t1", "Summer Cup", MatchFormat::T20));
        book.add_team(&tid, Team::new("a", "Alpha")).unwrap();
        book.add_team(&tid, Team::new("b", "Bravo")).unwrap();
        (book, tid)
    }

    #[test]
    fn fixture_is_registered_on_its_tournament() {
        let (mut book, tid) = scorebook();
        let toss = Toss::new(TeamId::new("b"), TossDecision::Bat);
        let id = book
            .create_fixture(&tid, TeamId::new("a"), TeamId::new("b"), toss)
            .unwrap();

        let created = book.match_by_id(&id).unwrap();
        assert_eq!(created.status, MatchStatus::Upcoming);
        assert_eq!(created.innings1.batting_team.as_str(), "b");
        assert_eq!(book.tournament(&tid).unwrap().matches, vec![id]);
        assert_eq!(book.format_of(created), MatchFormat::T20);
    }

    #[test]
    fn match_ids_stay_unique_within_a_millisecond() {
        let (mut book, tid) = scorebook();
        let toss = Toss::new(TeamId::new("a"), TossDecision::Bowl);
        let first = book
            .create_fixture(&tid, TeamId::new("a"), TeamId::new("b"), toss.clone())
            .unwrap();
        let second = book
            .create_fixture(&tid, TeamId::new("a"), TeamId::new("b"), toss)
            .unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn fixture_rejects_unknown_teams_and_foreign_toss_winner() {
        let (mut book, tid) = scorebook();
        let err = book
            .create_fixture(
                &tid,
                TeamId::new("a"),
                TeamId::new("zz"),
                Toss::new(TeamId::new("a"), TossDecision::Bat),
            )
            .unwrap_err();
        assert!(matches!(err, RuntimeError::TeamNotFound(_)));

        let err = book
            .create_fixture(
                &tid,
                TeamId::new("a"),
                TeamId::new("b"),
                Toss::new(TeamId::new("c"), TossDecision::Bat),
            )
            .unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidToss { .. }));
        assert!(book.matches.is_empty());
    }

    #[test]
    fn missing_tournament_falls_back_to_odi() {
        let (mut book, tid) = scorebook();
        let id = book
            .create_fixture(
                &tid,
                TeamId::new("a"),
                TeamId::new("b"),
                Toss::new(TeamId::new("a"), TossDecision::Bat),
            )
            .unwrap();
        book.tournaments.clear();
        let state = book.match_by_id(&id).unwrap();
        assert_eq!(book.format_of(state).overs_cap(), 50);
    }

    #[test]
    fn players_join_existing_teams_only() {
        let (mut book, _) = scorebook();
        book.add_player(&TeamId::new("a"), Player::new("p1", "Ann", PlayerRole::Batsman))
            .unwrap();
        assert!(book.player(&TeamId::new("a"), &"p1".into()).is_some());
        assert!(
            book.add_player(&TeamId::new("x"), Player::new("p2", "Bo", PlayerRole::Bowler))
                .is_err()
        );
    }
}
