use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use chess_archive::{
    chess_com::ChessComClient,
    config::{Config, CHESS_COM_API, DEFAULT_OUTPUT_DIR, DEFAULT_USERNAME},
    output::{write_outputs, Summary},
    process_archive::{run, NoPause, Pause, TokioPause},
};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "chess-archive")]
#[command(about = "Extract a chess.com player's games with FEN positions", long_about = None)]
struct Args {
    /// Player whose games are extracted
    #[arg(short, long, env = "CHESS_ARCHIVE_USERNAME", default_value = DEFAULT_USERNAME)]
    username: String,

    #[arg(short, long, env = "CHESS_ARCHIVE_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Seconds to wait between archive requests
    #[arg(long, env = "CHESS_ARCHIVE_DELAY_SECS", default_value_t = 2)]
    delay_secs: u64,

    /// Sent as User-Agent, chess.com asks clients to identify themselves
    #[arg(long, env = "CHESS_ARCHIVE_USER_AGENT")]
    user_agent: Option<String>,

    #[arg(long, env = "CHESS_ARCHIVE_API", default_value = CHESS_COM_API)]
    api_base: String,
}

impl Args {
    fn into_config(self) -> Config {
        let default = Config::default();
        Config {
            username: self.username,
            output_dir: self.output_dir,
            archive_delay: Duration::from_secs(self.delay_secs),
            user_agent: self.user_agent.unwrap_or(default.user_agent),
            api_base: self.api_base,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Args::parse().into_config();
    let client = ChessComClient::new(&config)?;
    let pause: &dyn Pause = if config.archive_delay.is_zero() {
        &NoPause
    } else {
        &TokioPause
    };

    let report = run(&config, &client, pause).await;
    if report.archives_listed == 0 {
        info!("No archives found or error occurred");
        return Ok(());
    }

    let summary = Summary::from_games(&config.username, &report.games, report.skipped.len());
    let files = write_outputs(&config, &report.games, &summary)?;
    info!(
        skipped = report.skipped.len(),
        archives_failed = report.archives_failed,
        "Extracted {} games",
        report.games.len()
    );
    info!(path = %files.games.display(), "Data saved");
    info!(path = %files.summary.display(), "Summary saved");
    Ok(())
}
