use thiserror::Error;

#[derive(Error, Debug)]
pub enum PgnError {
    #[error("PGN read failed")]
    Read(#[from] std::io::Error),
    #[error("Invalid FEN header: {0}")]
    InvalidFen(String),
    #[error("Illegal move {san} at ply {ply}")]
    IllegalMove { ply: usize, san: String },
}

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Malformed game record")]
    Malformed(#[from] serde_json::Error),
    #[error("Timestamp out of range: {0}")]
    InvalidTimestamp(i64),
    #[error("No result for {subject}")]
    MissingResult { subject: String },
    #[error("{subject} played neither side of the game")]
    SubjectNotInGame { subject: String },
    #[error("Move replay failed")]
    Pgn(#[from] PgnError),
}

impl GameError {
    /// Short label used as the `reason` of the skip counter.
    pub fn reason(&self) -> &'static str {
        match self {
            GameError::Malformed(_) => "malformed",
            GameError::InvalidTimestamp(_) => "timestamp",
            GameError::MissingResult { .. } => "malformed",
            GameError::SubjectNotInGame { .. } => "subject missing",
            GameError::Pgn(PgnError::IllegalMove { .. }) => "illegal move",
            GameError::Pgn(_) => "pgn",
        }
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Unexpected status {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("Request failed")]
    Http(#[from] reqwest::Error),
}
