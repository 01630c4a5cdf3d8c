use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    data::{Color, NormalizedGame, Outcome},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub username: String,
    pub total_games: usize,
    pub date_range: String,
    pub white_games: usize,
    pub black_games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub skipped_games: usize,
}

impl Summary {
    pub fn from_games(username: &str, games: &[NormalizedGame], skipped_games: usize) -> Self {
        let count_color = |color| games.iter().filter(|g| g.user_color == color).count();
        let count_outcome = |outcome| {
            games
                .iter()
                .filter(|g| Outcome::from_result_code(&g.user_result) == Some(outcome))
                .count()
        };
        // ISO dates order lexicographically.
        let first = games.iter().map(|g| g.date.as_str()).min();
        let last = games.iter().map(|g| g.date.as_str()).max();
        let date_range = match (first, last) {
            (Some(first), Some(last)) => format!("{first} to {last}"),
            _ => "N/A".to_string(),
        };
        Summary {
            username: username.to_string(),
            total_games: games.len(),
            date_range,
            white_games: count_color(Color::White),
            black_games: count_color(Color::Black),
            wins: count_outcome(Outcome::Win),
            losses: count_outcome(Outcome::Loss),
            draws: count_outcome(Outcome::Draw),
            skipped_games,
        }
    }
}

pub struct OutputFiles {
    pub games: PathBuf,
    pub summary: PathBuf,
}

fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Cannot write {}", path.display()))?;
    writer.flush()?;
    Ok(())
}

pub fn write_outputs(
    config: &Config,
    games: &[NormalizedGame],
    summary: &Summary,
) -> Result<OutputFiles> {
    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Cannot create {}", config.output_dir.display()))?;
    let files = OutputFiles {
        games: config.games_file(),
        summary: config.summary_file(),
    };
    write_pretty(&files.games, games)?;
    write_pretty(&files.summary, summary)?;
    Ok(files)
}
