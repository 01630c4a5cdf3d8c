use std::time::Duration;

use async_trait::async_trait;
use metrics::increment_counter;
use tracing::{info, warn};

use crate::{
    chess_com::ArchiveSource,
    config::Config,
    data::NormalizedGame,
    error::GameError,
    normalize::normalize_game,
    util::archive_name,
};

/// Wait between two archive fetches.
#[async_trait]
pub trait Pause: Send + Sync {
    async fn pause(&self, delay: Duration);
}

pub struct TokioPause;

#[async_trait]
impl Pause for TokioPause {
    async fn pause(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

pub struct NoPause;

#[async_trait]
impl Pause for NoPause {
    async fn pause(&self, _delay: Duration) {}
}

#[derive(Debug)]
pub struct SkippedGame {
    pub game_url: Option<String>,
    pub archive: String,
    pub error: GameError,
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub archives_listed: usize,
    pub archives_failed: usize,
    pub games: Vec<NormalizedGame>,
    pub skipped: Vec<SkippedGame>,
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn process_archive_games(
    subject: &str,
    archive: &str,
    raw_games: Vec<serde_json::Value>,
    report: &mut RunReport,
) {
    for raw in raw_games {
        increment_counter!("games_processed");
        let game_url = raw
            .get("url")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);
        match normalize_game(raw, subject) {
            Ok(game) => report.games.push(game),
            Err(error) => {
                increment_counter!("games_skipped", "reason" => error.reason());
                warn!(
                    game_url = game_url.as_deref().unwrap_or("?"),
                    %archive,
                    error = %error_chain(&error),
                    "Error processing game"
                );
                report.skipped.push(SkippedGame {
                    game_url,
                    archive: archive.to_string(),
                    error,
                });
            }
        }
    }
}

/// Fetches every monthly archive of `config.username` and normalizes its games,
/// one archive at a time.
pub async fn run(
    config: &Config,
    source: &dyn ArchiveSource,
    pause: &dyn Pause,
) -> RunReport {
    let mut report = RunReport::default();
    let username = &config.username;

    info!(%username, "Fetching game archives");
    let archives = match source.list_archives(username).await {
        Ok(archives) => archives,
        Err(err) => {
            warn!(%username, error = %error_chain(&err), "Error getting archives");
            return report;
        }
    };
    report.archives_listed = archives.len();
    if archives.is_empty() {
        return report;
    }
    info!("Found {} monthly archives", archives.len());

    for (i, archive) in archives.iter().enumerate() {
        let name = archive_name(archive);
        info!(archive = %name, "Processing archive {}/{}", i + 1, archives.len());
        let raw_games = match source.archive_games(archive).await {
            Ok(games) => games,
            Err(err) => {
                increment_counter!("archives_failed");
                warn!(archive = %name, error = %error_chain(&err), "Error getting games from archive");
                report.archives_failed += 1;
                vec![]
            }
        };
        info!(archive = %name, "Found {} games in this archive", raw_games.len());
        process_archive_games(username, &name, raw_games, &mut report);

        if i + 1 < archives.len() {
            pause.pause(config.archive_delay).await;
        }
    }
    report
}
