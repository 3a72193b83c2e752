//! Scorebook operator console.
//!
//! Composition root: loads configuration, installs logging, opens the file
//! repository and event bus, then reads commands from stdin until `quit` or
//! end of input.
//!
//! ```bash
//! SCOREBOOK_ID=club SCOREBOOK_DATA_DIR=./data cargo run -p scorebook-cli
//! ```

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use scoring_core::{MatchId, ScoringError};
use scoring_runtime::{EventBus, FileScorebookRepository, MatchEvent, ScoringService};
use scorebook_cli::{CliConfig, Command, Reply, Session};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = CliConfig::from_env();
    setup_logging(&config)?;

    tracing::info!(scorebook = %config.scorebook_id, "starting scorebook console");

    let data_dir = config.data_dir();
    let repo = Arc::new(FileScorebookRepository::new(&data_dir)?);
    tracing::info!(data_dir = %data_dir.display(), "scorebook repository opened");

    let events = EventBus::with_capacity(config.event_buffer);
    for (topic, rx) in events.subscribe_all() {
        tracing::debug!(?topic, "event logger attached");
        tokio::spawn(log_events(rx));
    }

    let service = ScoringService::new(repo, config.scorebook_id.clone(), events);
    let mut session = Session::open(service, config.match_id.clone().map(MatchId::new))?;

    match session.scoreboard() {
        Ok(board) => println!("{board}"),
        Err(err) => println!("{err}"),
    }
    println!("type `help` for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                tracing::warn!(input = %line.trim(), %err, "rejected input");
                println!("{err}");
                continue;
            }
        };

        match session.execute(command) {
            Ok(Reply::Print(text)) => println!("{text}"),
            Ok(Reply::Quit) => break,
            Err(err) => {
                let severity = err.severity();
                tracing::warn!(
                    severity = severity.as_str(),
                    code = err.error_code(),
                    %err,
                    "command failed"
                );
                if severity.is_recoverable() {
                    println!("{err}");
                } else {
                    println!("error: {err}");
                }
            }
        }
    }

    tracing::info!("scorebook console closed");
    Ok(())
}

/// Logs every published match event until the bus is dropped.
async fn log_events(mut rx: broadcast::Receiver<MatchEvent>) {
    loop {
        match rx.recv().await {
            Ok(event) => tracing::info!(match_id = %event.match_id(), ?event, "match event"),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event logger lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// Setup logging to a per-session file; stdout belongs to the console.
fn setup_logging(config: &CliConfig) -> Result<()> {
    use std::time::{SystemTime, UNIX_EPOCH};

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    let session_log_dir = config.log_dir().join(format!("session_{timestamp}"));
    std::fs::create_dir_all(&session_log_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "scorebook.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Keep the file writer alive for the whole process.
    std::mem::forget(guard);

    Ok(())
}
