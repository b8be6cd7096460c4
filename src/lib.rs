//! Chess board model with pseudo-legal move generation, a move log with undo, and a
//! terminal driver loop.

pub mod driver;
pub mod game_state;
pub mod perft;

pub use driver::{Driver, PlayConfig};
pub use game_state::{Board, ChessError, ChessField, Color, GameState, Move, Piece, PieceType, Square};
