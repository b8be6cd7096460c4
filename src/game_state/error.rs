/// Errors raised by the board model and its text formats.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    #[error("invalid move {mv}: {reason}")]
    InvalidMove { mv: String, reason: String },

    #[error("invalid square notation: {0}")]
    InvalidSquare(String),

    #[error("invalid FEN string: {0}")]
    InvalidFen(String),

    #[error("no piece on {0}")]
    EmptySquare(String),
}

impl ChessError {
    pub(crate) fn invalid_move(mv: impl Into<String>, reason: impl Into<String>) -> Self {
        ChessError::InvalidMove {
            mv: mv.into(),
            reason: reason.into(),
        }
    }
}
