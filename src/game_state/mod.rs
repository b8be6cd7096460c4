pub mod error;
pub mod fen;
pub mod model;
pub use error::ChessError;
pub use model::{ChessField, Color, Move, Piece, PieceType, Square};

mod board;
mod game_state;
mod move_generation;
#[cfg(test)]
pub mod test_utils;
pub use board::Board;
pub use game_state::GameState;
