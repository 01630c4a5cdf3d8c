mod case_insensitive_string;

pub use case_insensitive_string::CaseInsensitiveString;

use serde::{Deserialize, Serialize};

/// Game record as served by the archive endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGame {
    pub url: String,
    pub end_time: i64,
    pub time_control: String,
    pub white: RawPlayer,
    pub black: RawPlayer,
    pub pgn: String,
    pub rated: Option<bool>,
    pub opening: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPlayer {
    pub username: String,
    pub rating: Option<u32>,
    /// Only the subject's side has to carry one.
    pub result: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedGame {
    pub game_url: String,
    pub timestamp: i64,
    pub time_control: String,
    pub date: String,
    pub white_player: String,
    pub black_player: String,
    pub white_rating: u32,
    pub black_rating: u32,
    pub user_color: Color,
    pub user_result: String,
    pub opponent: String,
    pub pgn: String,
    pub fen_positions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening: Option<serde_json::Value>,
}

/// How a chess.com result code counts for the player it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    pub fn from_result_code(code: &str) -> Option<Self> {
        match code {
            "win" => Some(Outcome::Win),
            "draw" | "agreed" | "repetition" | "stalemate" | "insufficient" | "50move"
            | "timevsinsufficient" => Some(Outcome::Draw),
            "lose" | "checkmated" | "resigned" | "timeout" | "abandoned" | "kingofthehill"
            | "threecheck" | "bughousepartnerlose" => Some(Outcome::Loss),
            _ => None,
        }
    }
}
