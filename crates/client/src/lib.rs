//! Operator console for the scorebook.
//!
//! The binary reads one command per line, runs it through a [`Session`], and
//! prints the re-projected scoreboard. Everything but stdin/stdout handling
//! lives here so it can be exercised without a terminal.
//!
//! - [`config`] loads settings from the environment
//! - [`console`] parses and validates operator input
//! - [`session`] executes commands against the scoring service
//! - [`render`] formats the display model as text

pub mod config;
pub mod console;
pub mod render;
pub mod session;

pub use config::CliConfig;
pub use console::{Command, ParseError};
pub use session::{Reply, Session, SessionError};
