use super::{fen, Board, ChessError, ChessField, Color, Move, Square};
use tracing::debug;

/// The board, the side to move and the log of applied moves.
///
/// The board and the log are only changed through [`GameState::make_move`] and
/// [`GameState::undo_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    active_color: Color,
    move_log: Vec<Move>,
    /// Full-move number and side to move of the position the log starts from.
    start_move_number: u32,
    start_color: Color,
}

impl GameState {
    /// A new game from the standard starting position with white to move.
    pub fn new() -> Self {
        Self::with_position(Board::initial(), Color::White)
    }

    pub fn with_position(board: Board, active_color: Color) -> Self {
        Self {
            board,
            active_color,
            move_log: Vec::new(),
            start_move_number: 1,
            start_color: active_color,
        }
    }

    /// Numbers the first move of the position, as in the last FEN field.
    pub fn with_move_number(mut self, move_number: u32) -> Self {
        self.start_move_number = move_number;
        self
    }

    /// Delegates FEN parsing to the `fen` module.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        fen::from_fen(fen)
    }

    pub fn to_fen(&self) -> String {
        fen::to_fen(self)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_color(&self) -> Color {
        self.active_color
    }

    pub fn white_to_move(&self) -> bool {
        self.active_color == Color::White
    }

    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    /// Number of the current full move. It starts at the position's own number and
    /// goes up after each black move.
    pub fn fullmove_number(&self) -> u32 {
        let black_started = usize::from(self.start_color == Color::Black);
        self.start_move_number + ((self.move_log.len() + black_started) / 2) as u32
    }

    /// Applies `mv`, logs it and passes the turn.
    ///
    /// The move must describe the board as it is: `mv.from` holds `mv.piece_moved` and
    /// `mv.to` holds `mv.piece_captured`. Castling, en passant and promotion are not
    /// handled.
    pub fn make_move(&mut self, mv: Move) -> Result<(), ChessError> {
        if !mv.from.is_on_board() || !mv.to.is_on_board() {
            return Err(ChessError::invalid_move(format!("{:?}", mv), "field off the board"));
        }
        if self.board.get(mv.from) != Square::Occupied(mv.piece_moved) {
            return Err(ChessError::invalid_move(
                mv.as_algebraic(),
                format!("{} is not on {}", mv.piece_moved, mv.from),
            ));
        }
        if self.board.get(mv.to) != mv.piece_captured {
            return Err(ChessError::invalid_move(
                mv.as_algebraic(),
                format!("captured piece does not match {}", mv.to),
            ));
        }

        self.board.set(mv.from, Square::Empty);
        self.board.set(mv.to, Square::Occupied(mv.piece_moved));
        self.move_log.push(mv);
        self.active_color = self.active_color.opposite();

        debug!(mv = %mv, capture = mv.is_capture(), next = %self.active_color, "made move");
        Ok(())
    }

    /// Parses a move like `e2e4` against the current board and applies it.
    ///
    /// The move is taken as given; it is not checked against [`GameState::valid_moves`].
    pub fn make_algebraic_move(&mut self, algebraic: &str) -> Result<Move, ChessError> {
        let mv = Move::from_algebraic(algebraic, &self.board)?;
        self.make_move(mv)?;
        Ok(mv)
    }

    /// Takes back the last move. Returns `None` and does nothing when no move was made.
    pub fn undo_move(&mut self) -> Option<Move> {
        let mv = self.move_log.pop()?;
        self.board.set(mv.from, Square::Occupied(mv.piece_moved));
        self.board.set(mv.to, mv.piece_captured);
        self.active_color = self.active_color.opposite();

        debug!(mv = %mv, next = %self.active_color, "undid move");
        Some(mv)
    }

    /// Moves available to the side to move.
    ///
    /// Moves that leave the own king in check are not filtered out.
    pub fn valid_moves(&self) -> Vec<Move> {
        self.all_possible_moves()
    }

    /// Pseudo-legal moves of the side to move in row-major board order.
    pub fn all_possible_moves(&self) -> Vec<Move> {
        self.board.generate_moves(self.active_color)
    }

    /// Moves of the piece on `field` if it belongs to the side to move.
    ///
    /// Panics if `field` is off the board.
    pub fn moves_from_field(&self, field: ChessField) -> Vec<Move> {
        if self.board.get(field).has_color(self.active_color) {
            self.board.generate_moves_from_field(field)
        } else {
            Vec::new()
        }
    }

    /// Looks up the generated move between two fields.
    pub fn find_valid_move(&self, from: ChessField, to: ChessField) -> Option<Move> {
        self.moves_from_field(from).into_iter().find(|mv| mv.to == to)
    }

    /// Resolves text like `e2e4` to one of the generated moves of the side to move.
    pub fn find_algebraic_move(&self, algebraic: &str) -> Result<Move, ChessError> {
        if algebraic.len() != 4 || !algebraic.is_ascii() {
            return Err(ChessError::invalid_move(algebraic, "expected a move like e2e4"));
        }
        let from = ChessField::from_algebraic(&algebraic[0..2])?;
        let to = ChessField::from_algebraic(&algebraic[2..4])?;
        self.find_valid_move(from, to).ok_or_else(|| {
            ChessError::invalid_move(algebraic, format!("not available for {}", self.active_color))
        })
    }

    pub fn render_to_string(&self) -> String {
        self.board.render_to_string()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
