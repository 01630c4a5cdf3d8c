use std::{path::PathBuf, time::Duration};

pub const CHESS_COM_API: &str = "https://api.chess.com/pub";
pub const DEFAULT_USERNAME: &str = "sayali9141";
pub const DEFAULT_OUTPUT_DIR: &str = "chess_data";

/// Everything a single extraction run depends on.
#[derive(Debug, Clone)]
pub struct Config {
    pub username: String,
    pub output_dir: PathBuf,
    /// Pause between two archive fetches.
    pub archive_delay: Duration,
    pub user_agent: String,
    pub api_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            archive_delay: Duration::from_secs(2),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            api_base: CHESS_COM_API.to_string(),
        }
    }
}

impl Config {
    pub fn games_file(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}_chess_games.json", self.username))
    }

    pub fn summary_file(&self) -> PathBuf {
        self.output_dir.join(format!("{}_summary.json", self.username))
    }
}
