use crate::game_state::{ChessError, GameState};

/// Counts the leaf nodes of the pseudo-legal move tree below `state`.
///
/// Moves are made and taken back in place, so `state` is unchanged afterwards.
pub fn perft(state: &mut GameState, depth: u8) -> Result<u64, ChessError> {
    if depth == 0 {
        return Ok(1);
    }

    let mut node_count = 0u64;
    for mv in state.valid_moves() {
        state.make_move(mv)?;
        let nodes = perft(state, depth - 1);
        state.undo_move();
        node_count += nodes?;
    }
    Ok(node_count)
}

/// Node counts per root move, sorted by move text.
pub fn perft_divide(state: &mut GameState, depth: u8) -> Result<Vec<(String, u64)>, ChessError> {
    let mut result_moves = Vec::new();
    if depth == 0 {
        return Ok(result_moves);
    }

    for mv in state.valid_moves() {
        state.make_move(mv)?;
        let nodes = perft(state, depth - 1);
        state.undo_move();
        result_moves.push((mv.as_algebraic(), nodes?));
    }
    result_moves.sort();
    Ok(result_moves)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perft() {
        let mut state = GameState::new();
        assert_eq!(perft(&mut state, 0).unwrap(), 1);
        assert_eq!(perft(&mut state, 1).unwrap(), 20);
        assert_eq!(perft(&mut state, 2).unwrap(), 400);
        assert_eq!(perft(&mut state, 3).unwrap(), 8902);
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_perft_divide() {
        let mut state = GameState::new();
        let divide = perft_divide(&mut state, 2).unwrap();
        assert_eq!(divide.len(), 20);
        assert!(divide.iter().all(|(_, nodes)| *nodes == 20));
        assert_eq!(divide[0].0, "a2a3");
        assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), 400);
    }

    #[test]
    fn test_perft_kings_only() {
        // Each king has 3 moves from its corner, and they never interact within 2 plies
        let mut state = GameState::from_fen("k7/8/8/8/8/8/8/7K w").unwrap();
        assert_eq!(perft(&mut state, 1).unwrap(), 3);
        assert_eq!(perft(&mut state, 2).unwrap(), 9);
    }
}
