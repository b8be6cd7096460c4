use super::{Board, ChessField, Color, Move, Piece, PieceType, Square};

const KNIGHT_MOVES: [(isize, isize); 8] = [(-2, -1), (-1, -2), (1, -2), (2, -1), (2, 1), (1, 2), (-1, 2), (-2, 1)];
const KING_MOVES: [(isize, isize); 8] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];
const BISHOP_DIRECTIONS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ROOK_DIRECTIONS: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

impl Board {
    /// Pseudo-legal moves of every piece of `color`, scanning the board row by row.
    pub fn generate_moves(&self, color: Color) -> Vec<Move> {
        let mut all_moves: Vec<Move> = Vec::with_capacity(64);

        for (field, _) in self.pieces_with_coordinates(color) {
            all_moves.extend(self.generate_moves_from_field(field));
        }

        all_moves
    }

    /// Pseudo-legal moves of the piece on `field`; an empty field has none.
    ///
    /// Panics if `field` is off the board.
    pub fn generate_moves_from_field(&self, field: ChessField) -> Vec<Move> {
        assert!(field.is_on_board(), "field {:?} is off the board", field);

        match self.get(field) {
            Square::Occupied(piece) => match piece.kind {
                PieceType::Pawn => self.generate_pawn_moves(field, piece),
                PieceType::Knight => self.generate_knight_moves(field, piece),
                PieceType::Bishop => self.generate_bishop_moves(field, piece),
                PieceType::Rook => self.generate_rook_moves(field, piece),
                PieceType::Queen => self.generate_queen_moves(field, piece),
                PieceType::King => self.generate_king_moves(field, piece),
            },
            Square::Empty => Vec::new(),
        }
    }

    fn generate_pawn_moves(&self, field: ChessField, pawn: Piece) -> Vec<Move> {
        let mut moves = Vec::new();
        let forward = match pawn.color {
            Color::White => -1,
            Color::Black => 1,
        };

        let start_row = match pawn.color {
            Color::White => 6,
            Color::Black => 1,
        };

        // Regular forward move
        if let Some(one_forward) = field.offset(forward, 0) {
            if self.get(one_forward).is_empty() {
                moves.push(Move::new(field, one_forward, pawn, Square::Empty));

                // Double move from start position
                if field.row == start_row {
                    if let Some(two_forward) = field.offset(2 * forward, 0) {
                        if self.get(two_forward).is_empty() {
                            moves.push(Move::new(field, two_forward, pawn, Square::Empty));
                        }
                    }
                }
            }
        }

        // Capture diagonally
        for dc in [-1, 1] {
            if let Some(target) = field.offset(forward, dc) {
                let square = self.get(target);
                if square.has_color(pawn.color.opposite()) {
                    moves.push(Move::new(field, target, pawn, square));
                }
            }
        }

        moves
    }

    fn generate_knight_moves(&self, field: ChessField, knight: Piece) -> Vec<Move> {
        self.generate_moves_from_directions(field, knight, &KNIGHT_MOVES)
    }

    /// Generate sliding piece moves (bishop, rook, queen).
    fn generate_sliding_moves(&self, field: ChessField, piece: Piece, directions: &[(isize, isize)]) -> Vec<Move> {
        let mut moves = Vec::new();

        for &(dr, dc) in directions {
            let mut current = field;

            while let Some(target) = current.offset(dr, dc) {
                match self.get(target) {
                    Square::Empty => moves.push(Move::new(field, target, piece, Square::Empty)),
                    square @ Square::Occupied(p) => {
                        if p.color != piece.color {
                            moves.push(Move::new(field, target, piece, square));
                        }
                        break; // Block sliding
                    }
                }
                current = target;
            }
        }

        moves
    }

    fn generate_bishop_moves(&self, field: ChessField, bishop: Piece) -> Vec<Move> {
        self.generate_sliding_moves(field, bishop, &BISHOP_DIRECTIONS)
    }

    fn generate_rook_moves(&self, field: ChessField, rook: Piece) -> Vec<Move> {
        self.generate_sliding_moves(field, rook, &ROOK_DIRECTIONS)
    }

    fn generate_queen_moves(&self, field: ChessField, queen: Piece) -> Vec<Move> {
        let mut moves = self.generate_rook_moves(field, queen);
        moves.extend(self.generate_bishop_moves(field, queen));
        moves
    }

    /// Castling is not generated.
    fn generate_king_moves(&self, field: ChessField, king: Piece) -> Vec<Move> {
        self.generate_moves_from_directions(field, king, &KING_MOVES)
    }

    fn generate_moves_from_directions(&self, field: ChessField, piece: Piece, offsets: &[(isize, isize)]) -> Vec<Move> {
        offsets
            .iter()
            .filter_map(|&(dr, dc)| field.offset(dr, dc))
            .filter_map(|target| {
                let square = self.get(target);
                if square.has_color(piece.color) {
                    None
                } else {
                    Some(Move::new(field, target, piece, square))
                }
            })
            .collect()
    }
}
