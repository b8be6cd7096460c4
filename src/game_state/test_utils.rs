use super::{Board, ChessField, GameState, Move};

pub fn assert_moves<I: IntoIterator<Item = Move>>(generated: I, mut expected: Vec<&str>) {
    let mut generated_converted: Vec<_> = generated.into_iter().map(|m| m.as_algebraic()).collect();
    generated_converted.sort();
    expected.sort();

    assert_eq!(generated_converted, expected);
}

/// Board of a FEN position; panics on malformed input.
pub fn board_from_fen(fen: &str) -> Board {
    GameState::from_fen(fen).unwrap().board().clone()
}

pub fn moves_from(board: &Board, square: &str) -> Vec<Move> {
    board.generate_moves_from_field(ChessField::from_algebraic(square).unwrap())
}
