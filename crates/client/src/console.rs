//! Operator command parsing.
//!
//! One line of input is one command. Ball codes are validated here; anything
//! outside the eleven-code vocabulary is rejected before it reaches the
//! engine.

use std::str::FromStr;

use thiserror::Error;

use scoring_core::{
    BallEvent, BatsmanCorrection, BowlerCorrection, MatchFormat, MatchId, PlayerId, PlayerRole,
    TeamId, Toss, TossDecision, TournamentId,
};

/// Leading word of every non-ball command.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    strum::EnumString,
    strum::AsRefStr,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Keyword {
    Undo,
    Start,
    Pause,
    End,
    Innings,
    Players,
    FixBat,
    FixBowl,
    Tournament,
    Team,
    Player,
    Fixture,
    Use,
    Matches,
    Show,
    Help,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Ball(BallEvent),
    Undo,
    Start,
    Pause,
    End,
    Innings,
    /// `-` leaves a position empty.
    Players {
        striker: Option<PlayerId>,
        non_striker: Option<PlayerId>,
        bowler: Option<PlayerId>,
    },
    FixBat {
        player: PlayerId,
        correction: BatsmanCorrection,
    },
    FixBowl {
        player: PlayerId,
        correction: BowlerCorrection,
    },
    Tournament {
        id: TournamentId,
        format: MatchFormat,
        name: String,
    },
    Team {
        tournament: TournamentId,
        id: TeamId,
        name: String,
    },
    Player {
        team: TeamId,
        id: PlayerId,
        role: PlayerRole,
        name: String,
    },
    Fixture {
        tournament: TournamentId,
        team_a: TeamId,
        team_b: TeamId,
        toss: Toss,
    },
    Use(MatchId),
    Matches,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command or ball code {0:?}")]
    Unknown(String),

    #[error("{command}: missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("{command}: invalid {argument} {value:?}")]
    InvalidArgument {
        command: &'static str,
        argument: &'static str,
        value: String,
    },
}

pub const HELP: &str = "\
ball codes   0 1 2 3 4 5 6 W WD NB LB
undo         remove the last ball
start        start or resume the match
pause        pause a live match
end          finish the match
innings      close the first innings now
players <striker> <non-striker> <bowler>   (use - for none)
fix-bat <player> [runs=N] [balls=N]
fix-bowl <player> [overs=N] [balls=N] [runs=N] [wickets=N]
tournament <id> <T10|T20|ODI> <name...>
team <tournament> <id> <name...>
player <team> <id> <role> <name...>
fixture <tournament> <team-a> <team-b> <toss-winner> <bat|bowl>
use <match>  score another match
matches      list matches
show         print the scoreboard
quit";

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or(ParseError::Empty)?;

        let Ok(keyword) = Keyword::from_str(head) else {
            return BallEvent::parse(line)
                .map(Command::Ball)
                .map_err(|_| ParseError::Unknown(line.trim().to_string()));
        };

        let mut args = Args {
            command: keyword.into(),
            words,
        };
        let command = match keyword {
            Keyword::Undo => Command::Undo,
            Keyword::Start => Command::Start,
            Keyword::Pause => Command::Pause,
            Keyword::End => Command::End,
            Keyword::Innings => Command::Innings,
            Keyword::Players => Command::Players {
                striker: args.optional_player("striker")?,
                non_striker: args.optional_player("non-striker")?,
                bowler: args.optional_player("bowler")?,
            },
            Keyword::FixBat => {
                let player = PlayerId::new(args.word("player")?);
                let mut correction = BatsmanCorrection::default();
                for (key, value) in args.assignments()? {
                    match key {
                        "runs" => correction.runs = Some(args.number(key, value)?),
                        "balls" => correction.balls = Some(args.number(key, value)?),
                        _ => return Err(args.invalid("field", key)),
                    }
                }
                Command::FixBat { player, correction }
            }
            Keyword::FixBowl => {
                let player = PlayerId::new(args.word("player")?);
                let mut correction = BowlerCorrection::default();
                for (key, value) in args.assignments()? {
                    match key {
                        "overs" => correction.overs = Some(args.number(key, value)?),
                        "balls" => correction.balls = Some(args.number(key, value)?),
                        "runs" => correction.runs = Some(args.number(key, value)?),
                        "wickets" => correction.wickets = Some(args.number(key, value)?),
                        _ => return Err(args.invalid("field", key)),
                    }
                }
                Command::FixBowl { player, correction }
            }
            Keyword::Tournament => Command::Tournament {
                id: TournamentId::new(args.word("id")?),
                format: args.parsed("format")?,
                name: args.rest("name")?,
            },
            Keyword::Team => Command::Team {
                tournament: TournamentId::new(args.word("tournament")?),
                id: TeamId::new(args.word("id")?),
                name: args.rest("name")?,
            },
            Keyword::Player => Command::Player {
                team: TeamId::new(args.word("team")?),
                id: PlayerId::new(args.word("id")?),
                role: args.parsed("role")?,
                name: args.rest("name")?,
            },
            Keyword::Fixture => {
                let tournament = TournamentId::new(args.word("tournament")?);
                let team_a = TeamId::new(args.word("team-a")?);
                let team_b = TeamId::new(args.word("team-b")?);
                let winner = TeamId::new(args.word("toss-winner")?);
                let decision: TossDecision = args.parsed("decision")?;
                Command::Fixture {
                    tournament,
                    team_a,
                    team_b,
                    toss: Toss::new(winner, decision),
                }
            }
            Keyword::Use => Command::Use(MatchId::new(args.word("match")?)),
            Keyword::Matches => Command::Matches,
            Keyword::Show => Command::Show,
            Keyword::Help => Command::Help,
            Keyword::Quit => Command::Quit,
        };
        Ok(command)
    }
}

struct Args<'a> {
    command: &'static str,
    words: std::str::SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn word(&mut self, argument: &'static str) -> Result<&'a str, ParseError> {
        self.words.next().ok_or(ParseError::MissingArgument {
            command: self.command,
            argument,
        })
    }

    fn optional_player(&mut self, argument: &'static str) -> Result<Option<PlayerId>, ParseError> {
        let word = self.word(argument)?;
        Ok((word != "-").then(|| PlayerId::new(word)))
    }

    fn parsed<T: FromStr>(&mut self, argument: &'static str) -> Result<T, ParseError> {
        let word = self.word(argument)?;
        word.parse().map_err(|_| self.invalid(argument, word))
    }

    fn rest(&mut self, argument: &'static str) -> Result<String, ParseError> {
        let rest = self.words.by_ref().collect::<Vec<_>>().join(" ");
        if rest.is_empty() {
            return Err(ParseError::MissingArgument {
                command: self.command,
                argument,
            });
        }
        Ok(rest)
    }

    fn assignments(&mut self) -> Result<Vec<(&'a str, &'a str)>, ParseError> {
        self.words
            .by_ref()
            .map(|word| word.split_once('=').ok_or(word))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|word| self.invalid("assignment", word))
    }

    fn number<T: FromStr>(&self, key: &str, value: &str) -> Result<T, ParseError> {
        value
            .parse()
            .map_err(|_| self.invalid("number", &format!("{key}={value}")))
    }

    fn invalid(&self, argument: &'static str, value: &str) -> ParseError {
        ParseError::InvalidArgument {
            command: self.command,
            argument,
            value: value.to_string(),
        }
    }
}
