use pgn_reader::{BufferedReader, RawHeader, SanPlus, Skip, Visitor};
use shakmaty::{fen::Fen, san::San, CastlingMode, Chess, EnPassantMode, Position};

use crate::error::PgnError;

/// Mainline of a single game: where it starts and the moves played from there.
#[derive(Debug, Clone)]
pub struct ParsedGame {
    pub start: Chess,
    pub moves: Vec<San>,
}

#[derive(Default)]
struct GameParser {
    start: Option<Chess>,
    moves: Vec<San>,
    error: Option<PgnError>,
}

impl Visitor for GameParser {
    type Result = Result<ParsedGame, PgnError>;

    fn begin_game(&mut self) {
        self.start = None;
        self.moves.clear();
        self.error = None;
    }

    fn header(&mut self, key: &[u8], value: RawHeader<'_>) {
        if key != b"FEN" || self.error.is_some() {
            return;
        }
        let parsed = Fen::from_ascii(value.as_bytes())
            .map_err(|err| err.to_string())
            .and_then(|fen| {
                fen.into_position(CastlingMode::Chess960)
                    .map_err(|err| err.to_string())
            });
        match parsed {
            Ok(pos) => self.start = Some(pos),
            Err(err) => self.error = Some(PgnError::InvalidFen(err)),
        }
    }

    fn end_headers(&mut self) -> Skip {
        Skip(self.error.is_some())
    }

    fn san(&mut self, san_plus: SanPlus) {
        self.moves.push(san_plus.san);
    }

    fn begin_variation(&mut self) -> Skip {
        Skip(true)
    }

    fn end_game(&mut self) -> Self::Result {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        Ok(ParsedGame {
            start: self.start.take().unwrap_or_default(),
            moves: std::mem::take(&mut self.moves),
        })
    }
}

/// Parses the first game of `pgn`. `Ok(None)` means the text holds no game.
pub fn parse_game(pgn: &str) -> Result<Option<ParsedGame>, PgnError> {
    let mut reader = BufferedReader::new_cursor(pgn.as_bytes());
    let mut parser = GameParser::default();
    match reader.read_game(&mut parser)? {
        None => Ok(None),
        Some(game) => game.map(Some),
    }
}

pub fn fen_of(pos: &Chess) -> String {
    Fen::from_position(pos.clone(), EnPassantMode::Legal).to_string()
}

/// Plays the mainline on one board and returns the FEN before the first move
/// and after every move.
pub fn replay(game: &ParsedGame) -> Result<Vec<String>, PgnError> {
    let mut pos = game.start.clone();
    let mut fens = Vec::with_capacity(game.moves.len() + 1);
    fens.push(fen_of(&pos));
    for (i, san) in game.moves.iter().enumerate() {
        let m = san.to_move(&pos).map_err(|_| PgnError::IllegalMove {
            ply: i + 1,
            san: san.to_string(),
        })?;
        pos.play_unchecked(&m);
        fens.push(fen_of(&pos));
    }
    Ok(fens)
}

pub fn extract_fen_positions(pgn: &str) -> Result<Vec<String>, PgnError> {
    match parse_game(pgn)? {
        Some(game) => replay(&game),
        None => Ok(vec![]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    const CHESS_COM_PGN: &str = r#"[Event "Live Chess"]
[Site "Chess.com"]
[Date "2023.11.14"]
[White "A"]
[Black "B"]
[Result "1-0"]
[TimeControl "600"]

1. e4 {[%clk 0:09:58]} 1... e5 {[%clk 0:09:57]} 2. Qh5 Nc6 3. Bc4 Nf6 4. Qxf7# 1-0
"#;

    #[test]
    fn test_positions_count_and_start() {
        let fens = extract_fen_positions(CHESS_COM_PGN).unwrap();
        assert_eq!(fens.len(), 8);
        assert_eq!(fens[0], START);
        assert_eq!(
            fens[7],
            "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4"
        );
    }

    #[test]
    fn test_en_passant_square_only_when_capturable() {
        let fens = extract_fen_positions("1. e4 d5 2. e5 f5 *").unwrap();
        assert_eq!(
            fens[1],
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );
        assert_eq!(
            fens[4],
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3"
        );
    }

    #[test]
    fn test_replay_is_deterministic() {
        assert_eq!(
            extract_fen_positions(CHESS_COM_PGN).unwrap(),
            extract_fen_positions(CHESS_COM_PGN).unwrap()
        );
    }

    #[test]
    fn test_variations_are_ignored() {
        let fens = extract_fen_positions("1. e4 (1. d4 d5) 1... e5 2. Nf3 (2. f4) 2... Nc6 *")
            .unwrap();
        assert_eq!(fens.len(), 5);
        assert_eq!(
            fens[4],
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3"
        );
    }

    #[test]
    fn test_game_without_moves() {
        let fens = extract_fen_positions("[Event \"?\"]\n\n*\n").unwrap();
        assert_eq!(fens, vec![START.to_string()]);
    }

    #[test]
    fn test_no_game() {
        assert!(parse_game("").unwrap().is_none());
        assert!(extract_fen_positions("   \n").unwrap().is_empty());
    }

    #[test]
    fn test_fen_header_sets_start() {
        let pgn = r#"[SetUp "1"]
[FEN "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"]

1. e4 Kd7 *
"#;
        let fens = extract_fen_positions(pgn).unwrap();
        assert_eq!(fens[0], "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
        assert_eq!(fens[2], "8/3k4/8/8/4P3/8/8/4K3 w - - 1 2");
    }

    #[test]
    fn test_invalid_fen_header() {
        let pgn = "[FEN \"not a fen\"]\n\n1. e4 *\n";
        assert!(matches!(
            extract_fen_positions(pgn),
            Err(PgnError::InvalidFen(_))
        ));
    }

    #[test]
    fn test_illegal_move() {
        let err = extract_fen_positions("1. e4 e5 2. Ke3 *").unwrap_err();
        match err {
            PgnError::IllegalMove { ply, san } => {
                assert_eq!(ply, 3);
                assert_eq!(san, "Ke3");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
