use super::{Board, ChessError, ChessField, Color, GameState, Piece, Square};

pub const INITIAL_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

/// Parses a FEN string into a game with an empty move log.
///
/// The piece placement, the active color and the full-move number are interpreted.
/// Castling rights, en passant square and the halfmove clock may be present but are
/// ignored.
pub fn from_fen(fen: &str) -> Result<GameState, ChessError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() < 2 || parts.len() > 6 {
        return Err(ChessError::InvalidFen(format!(
            "expected 2 to 6 fields, found {}",
            parts.len()
        )));
    }

    let board = parse_placement(parts[0])?;

    let active_color = match parts[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(ChessError::InvalidFen(format!("invalid active color: {}", other))),
    };

    let move_number = match parts.get(5) {
        Some(text) => match text.parse::<u32>() {
            Ok(n) if n >= 1 => n,
            _ => return Err(ChessError::InvalidFen(format!("invalid full-move number: {}", text))),
        },
        None => 1,
    };

    Ok(GameState::with_position(board, active_color).with_move_number(move_number))
}

fn parse_placement(placement: &str) -> Result<Board, ChessError> {
    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 8 {
        return Err(ChessError::InvalidFen(format!("expected 8 rows, found {}", rows.len())));
    }

    let mut board = Board::empty();
    for (row_index, row) in rows.iter().enumerate() {
        let mut col_index = 0usize;

        for c in row.chars() {
            if let Some(skip) = c.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(ChessError::InvalidFen(format!("invalid empty count {} in row {}", c, row_index)));
                }
                col_index += skip as usize;
            } else {
                let piece = Piece::from_char(c)
                    .ok_or_else(|| ChessError::InvalidFen(format!("invalid piece character: {}", c)))?;
                if col_index > 7 {
                    return Err(ChessError::InvalidFen(format!("too many squares in row {}", row_index)));
                }
                board.set(ChessField::new(row_index as u8, col_index as u8), Square::Occupied(piece));
                col_index += 1;
            }
            if col_index > 8 {
                return Err(ChessError::InvalidFen(format!("too many squares in row {}", row_index)));
            }
        }
        if col_index != 8 {
            return Err(ChessError::InvalidFen(format!("too few squares in row {}", row_index)));
        }
    }
    Ok(board)
}

pub fn to_fen(state: &GameState) -> String {
    let mut board_representation = String::new();

    for (row, cells) in state.board().rows().iter().enumerate() {
        let mut empty_count = 0;

        for square in cells {
            match square {
                Square::Occupied(piece) => {
                    if empty_count > 0 {
                        board_representation.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    board_representation.push(piece.to_char());
                }
                Square::Empty => empty_count += 1,
            }
        }

        if empty_count > 0 {
            board_representation.push_str(&empty_count.to_string());
        }
        if row < 7 {
            board_representation.push('/');
        }
    }

    let active_color = match state.active_color() {
        Color::White => "w",
        Color::Black => "b",
    };
    format!("{} {} - - 0 {}", board_representation, active_color, state.fullmove_number())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::PieceType;

    #[test]
    fn test_initial_position_matches_new_game() {
        let parsed = from_fen(INITIAL_POSITION).unwrap();
        assert_eq!(parsed, GameState::new());
        assert_eq!(to_fen(&parsed), INITIAL_POSITION);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let state = from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
        assert_eq!(state.active_color(), Color::Black);
        assert_eq!(
            state.board().get(ChessField::from_algebraic("e4").unwrap()),
            Square::Occupied(Piece::new(Color::White, PieceType::Pawn))
        );
        assert_eq!(to_fen(&state), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b - - 0 1");
    }

    #[test]
    fn test_to_fen_counts_full_moves() {
        let mut state = GameState::new();
        state.make_algebraic_move("e2e4").unwrap();
        state.make_algebraic_move("e7e5").unwrap();
        state.make_algebraic_move("g1f3").unwrap();
        assert_eq!(to_fen(&state), "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b - - 0 2");
    }

    #[test]
    fn test_keeps_full_move_number() {
        let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w - - 0 25";
        let state = from_fen(fen).unwrap();
        assert_eq!(state.fullmove_number(), 25);
        assert_eq!(to_fen(&state), fen);
    }

    #[test]
    fn test_black_to_move_counts_full_moves() {
        let mut state = from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b - - 0 1").unwrap();
        state.make_algebraic_move("e7e5").unwrap();
        assert_eq!(to_fen(&state), "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w - - 0 2");
        state.undo_move();
        assert_eq!(to_fen(&state), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b - - 0 1");
    }

    #[test]
    fn test_invalid_fen() {
        assert!(matches!(from_fen("8/8/8/8/8/8/8/8 w - - 0 0"), Err(ChessError::InvalidFen(_))));
        assert!(matches!(from_fen("8/8/8/8/8/8/8/8 w - - 0 x"), Err(ChessError::InvalidFen(_))));
        assert!(matches!(from_fen("8/8/8/8/8/8/8/8"), Err(ChessError::InvalidFen(_))));
        assert!(matches!(from_fen("8/8/8/8/8/8/8 w"), Err(ChessError::InvalidFen(_))));
        assert!(matches!(from_fen("8/8/8/8/8/8/8/8 x"), Err(ChessError::InvalidFen(_))));
        assert!(matches!(from_fen("9/8/8/8/8/8/8/8 w"), Err(ChessError::InvalidFen(_))));
        assert!(matches!(from_fen("8/8/8/8/8/8/8/7 w"), Err(ChessError::InvalidFen(_))));
        assert!(matches!(from_fen("8/8/8/8/8/8/8/ppppppppp w"), Err(ChessError::InvalidFen(_))));
        assert!(matches!(from_fen("8/8/8/8/8/8/8/7x w"), Err(ChessError::InvalidFen(_))));
        assert!(matches!(from_fen("8/8/8/8/8/8/8/80 w"), Err(ChessError::InvalidFen(_))));
    }
}
