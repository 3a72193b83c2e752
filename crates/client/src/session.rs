//! Executes parsed console commands against the scoring service.

use thiserror::Error;

use scoring_core::{
    BallResult, ErrorSeverity, MatchId, MatchStatus, Player, ScoringError, Team, UndoResult,
};
use scoring_runtime::{RuntimeError, ScorebookRepository, ScoringService, Tournament};

use crate::console::{Command, HELP};
use crate::render;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no match selected; create a fixture or `use <match>`")]
    NoMatchSelected,

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl ScoringError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoMatchSelected => ErrorSeverity::Recoverable,
            Self::Runtime(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoMatchSelected => "no_match_selected",
            Self::Runtime(err) => err.error_code(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// What the console should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Print(String),
    Quit,
}

/// Console state: the service and the match being scored.
pub struct Session<R> {
    service: ScoringService<R>,
    current: Option<MatchId>,
}

impl<R: ScorebookRepository> Session<R> {
    /// Opens the session on `preferred`, or the first live or upcoming match.
    pub fn open(service: ScoringService<R>, preferred: Option<MatchId>) -> Result<Self> {
        service.ensure_scorebook()?;
        let current = match preferred {
            Some(id) => Some(id),
            None => service
                .scorebook()?
                .matches
                .iter()
                .find(|m| matches!(m.status, MatchStatus::Live | MatchStatus::Upcoming))
                .map(|m| m.id.clone()),
        };
        if let Some(id) = &current {
            tracing::info!(match_id = %id, "scoring match");
        }
        Ok(Self { service, current })
    }

    pub fn current(&self) -> Option<&MatchId> {
        self.current.as_ref()
    }

    pub fn service(&self) -> &ScoringService<R> {
        &self.service
    }

    pub fn execute(&mut self, command: Command) -> Result<Reply> {
        match command {
            Command::Quit => return Ok(Reply::Quit),
            Command::Help => return Ok(Reply::Print(HELP.to_string())),
            Command::Matches => return self.list_matches().map(Reply::Print),
            Command::Tournament { id, format, name } => {
                let id = self.service.update_scorebook(|book| {
                    Ok(book.add_tournament(Tournament::new(id, name, format)))
                })?;
                return Ok(Reply::Print(format!("tournament {id} created")));
            }
            Command::Team {
                tournament,
                id,
                name,
            } => {
                let id = self
                    .service
                    .update_scorebook(|book| book.add_team(&tournament, Team::new(id, name)))?;
                return Ok(Reply::Print(format!("team {id} added")));
            }
            Command::Player {
                team,
                id,
                role,
                name,
            } => {
                self.service
                    .update_scorebook(|book| book.add_player(&team, Player::new(id, name, role)))?;
                return Ok(Reply::Print(format!("player added to {team}")));
            }
            Command::Fixture {
                tournament,
                team_a,
                team_b,
                toss,
            } => {
                let id = self
                    .service
                    .create_fixture(&tournament, team_a, team_b, toss)?;
                self.current = Some(id);
            }
            Command::Use(id) => {
                self.service.match_state(&id)?;
                self.current = Some(id);
            }
            other => {
                if let Some(note) = self.score(other)? {
                    return Ok(Reply::Print(format!("{note}\n{}", self.scoreboard()?)));
                }
            }
        }

        self.scoreboard().map(Reply::Print)
    }

    /// Match-level commands. Returns a note when the command changed nothing.
    fn score(&self, command: Command) -> Result<Option<String>> {
        let id = self.current.as_ref().ok_or(SessionError::NoMatchSelected)?;
        let service = &self.service;

        match command {
            Command::Ball(event) => {
                if let BallResult::Ignored(reason) = service.score_ball(id, event)? {
                    return Ok(Some(format!("ignored: {reason}")));
                }
            }
            Command::Undo => {
                if service.undo_last_ball(id)? == UndoResult::EmptyTimeline {
                    return Ok(Some("nothing to undo".to_string()));
                }
            }
            Command::Start => service.start_match(id)?,
            Command::Pause => service.pause_match(id)?,
            Command::End => service.end_match(id)?,
            Command::Innings => service.change_innings(id)?,
            Command::Players {
                striker,
                non_striker,
                bowler,
            } => service.assign_players(id, striker, non_striker, bowler)?,
            Command::FixBat { player, correction } => {
                service.override_batsman_stats(id, player, correction)?
            }
            Command::FixBowl { player, correction } => {
                service.override_bowler_stats(id, player, correction)?
            }
            _ => {}
        }
        Ok(None)
    }

    pub fn scoreboard(&self) -> Result<String> {
        let id = self.current.as_ref().ok_or(SessionError::NoMatchSelected)?;
        Ok(match self.service.display(id)? {
            Some(view) => render::scoreboard(&view),
            None => format!("match {id}: teams not resolved yet"),
        })
    }

    fn list_matches(&self) -> Result<String> {
        let book = self.service.scorebook()?;
        if book.matches.is_empty() {
            return Ok("no matches".to_string());
        }
        let lines: Vec<String> = book
            .matches
            .iter()
            .map(|m| {
                let marker = if self.current.as_ref() == Some(&m.id) { "*" } else { " " };
                format!("{marker} {} {} vs {} [{}]", m.id, m.team_a, m.team_b, m.status)
            })
            .collect();
        Ok(lines.join("\n"))
    }
}
