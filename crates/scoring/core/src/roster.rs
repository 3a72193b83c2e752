//! Teams and players as the projector sees them.
//!
//! Rosters are owned by the surrounding scorebook; the scoring core only
//! reads them through [`TeamLookup`] to resolve display names.

use std::collections::HashMap;

use crate::state::{PlayerId, TeamId};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum PlayerRole {
    #[strum(to_string = "Batsman")]
    Batsman,
    #[strum(to_string = "Bowler")]
    Bowler,
    #[strum(to_string = "All-Rounder")]
    #[cfg_attr(feature = "serde", serde(rename = "All-Rounder"))]
    AllRounder,
    #[strum(to_string = "Wicket-Keeper")]
    #[cfg_attr(feature = "serde", serde(rename = "Wicket-Keeper"))]
    WicketKeeper,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub role: PlayerRole,
    #[cfg_attr(feature = "serde", serde(default))]
    pub jersey_number: Option<u16>,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, role: PlayerRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            jersey_number: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub logo_url: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub players: Vec<Player>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub captain: Option<PlayerId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub wicket_keeper: Option<PlayerId>,
}

impl Team {
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            logo_url: None,
            players: Vec::new(),
            captain: None,
            wicket_keeper: None,
        }
    }

    pub fn with_players(mut self, players: impl IntoIterator<Item = Player>) -> Self {
        self.players.extend(players);
        self
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| &player.id == id)
    }
}

/// Read-only oracle resolving team and player references.
pub trait TeamLookup {
    fn team(&self, id: &TeamId) -> Option<&Team>;

    fn player(&self, team: &TeamId, player: &PlayerId) -> Option<&Player> {
        self.team(team)?.player(player)
    }
}

impl TeamLookup for [Team] {
    fn team(&self, id: &TeamId) -> Option<&Team> {
        self.iter().find(|team| &team.id == id)
    }
}

impl TeamLookup for Vec<Team> {
    fn team(&self, id: &TeamId) -> Option<&Team> {
        self.as_slice().team(id)
    }
}

impl TeamLookup for HashMap<TeamId, Team> {
    fn team(&self, id: &TeamId) -> Option<&Team> {
        self.get(id)
    }
}

impl<T: TeamLookup + ?Sized> TeamLookup for &T {
    fn team(&self, id: &TeamId) -> Option<&Team> {
        (**self).team(id)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn lookup_resolves_players_within_their_team() {
        let teams = vec![
            Team::new("a", "Alpha").with_players([Player::new("p1", "Ann", PlayerRole::Batsman)]),
            Team::new("b", "Bravo"),
        ];

        let player = teams.player(&TeamId::new("a"), &PlayerId::new("p1")).unwrap();
        assert_eq!(player.name, "Ann");
        assert!(teams.player(&TeamId::new("b"), &PlayerId::new("p1")).is_none());
        assert!(teams.team(&TeamId::new("c")).is_none());
    }

    #[test]
    fn role_names_match_roster_vocabulary() {
        assert_eq!(PlayerRole::AllRounder.to_string(), "All-Rounder");
        assert_eq!(
            PlayerRole::from_str("wicket-keeper").unwrap(),
            PlayerRole::WicketKeeper
        );
    }
}
