use crate::{
    data::{CaseInsensitiveString, Color, NormalizedGame, RawGame},
    error::GameError,
    pgn::extract_fen_positions,
    util::timestamp_to_date,
};

/// Turns one archive entry into a game seen from `subject`'s side of the board.
pub fn normalize_game(raw: serde_json::Value, subject: &str) -> Result<NormalizedGame, GameError> {
    let game: RawGame = serde_json::from_value(raw)?;
    let date =
        timestamp_to_date(game.end_time).ok_or(GameError::InvalidTimestamp(game.end_time))?;

    let subject_id = CaseInsensitiveString::from(subject);
    let (user_color, user, opponent) = if subject_id == game.white.username {
        (Color::White, &game.white, &game.black)
    } else if subject_id == game.black.username {
        (Color::Black, &game.black, &game.white)
    } else {
        return Err(GameError::SubjectNotInGame {
            subject: subject.to_string(),
        });
    };
    let user_result = user
        .result
        .clone()
        .ok_or_else(|| GameError::MissingResult {
            subject: subject.to_string(),
        })?;
    let opponent = opponent.username.clone();

    let fen_positions = extract_fen_positions(&game.pgn)?;

    Ok(NormalizedGame {
        game_url: game.url,
        timestamp: game.end_time,
        time_control: game.time_control,
        date,
        white_player: game.white.username,
        black_player: game.black.username,
        white_rating: game.white.rating.unwrap_or(0),
        black_rating: game.black.rating.unwrap_or(0),
        user_color,
        user_result,
        opponent,
        pgn: game.pgn,
        fen_positions,
        rated: game.rated,
        opening: game.opening,
    })
}
