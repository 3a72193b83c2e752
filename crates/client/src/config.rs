//! Console configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use scoring_runtime::events::DEFAULT_CAPACITY;

/// Configuration required to bootstrap the scoring console.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub data_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub scorebook_id: String,
    pub match_id: Option<String>,
    pub event_buffer: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_dir: None,
            scorebook_id: "default".to_string(),
            match_id: None,
            event_buffer: DEFAULT_CAPACITY,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SCOREBOOK_DATA_DIR` - Directory for scorebook files (default: platform-specific)
    /// - `SCOREBOOK_LOG_DIR` - Directory for session logs (default: platform-specific)
    /// - `SCOREBOOK_ID` - Scorebook to open (default: `default`)
    /// - `SCOREBOOK_MATCH_ID` - Match to score (default: first live or upcoming match)
    /// - `SCOREBOOK_EVENT_BUFFER` - Event channel capacity per topic (default: 100)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var("SCOREBOOK_DATA_DIR").ok().map(PathBuf::from);
        config.log_dir = env::var("SCOREBOOK_LOG_DIR").ok().map(PathBuf::from);

        if let Ok(id) = env::var("SCOREBOOK_ID")
            && !id.trim().is_empty()
        {
            config.scorebook_id = id.trim().to_string();
        }

        config.match_id = env::var("SCOREBOOK_MATCH_ID")
            .ok()
            .filter(|id| !id.trim().is_empty());

        if let Some(capacity) = read_env::<usize>("SCOREBOOK_EVENT_BUFFER") {
            config.event_buffer = capacity.max(1);
        }

        config
    }

    /// Scorebook directory, falling back to the platform data directory.
    ///
    /// - Linux: `~/.local/share/scorebook`
    /// - macOS: `~/Library/Application Support/scorebook`
    /// - Fallback: `./scorebook_data`
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            directories::ProjectDirs::from("", "", "scorebook")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("./scorebook_data"))
        })
    }

    /// Log directory, falling back to the platform cache directory.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            directories::ProjectDirs::from("", "", "scorebook")
                .map(|dirs| dirs.cache_dir().join("logs"))
                .unwrap_or_else(|| PathBuf::from("/tmp/scorebook/logs"))
        })
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
