use super::{ChessField, Color, Piece, PieceType, Square};

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// The 8x8 grid, indexed `[row][col]` with row 0 being rank 8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Square; 8]; 8],
}

impl Board {
    /// Creates an empty chess board
    pub fn empty() -> Self {
        Self {
            squares: [[Square::Empty; 8]; 8],
        }
    }

    /// Creates a board with the standard starting position.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            board.squares[0][col] = Square::Occupied(Piece::new(Color::Black, kind));
            board.squares[1][col] = Square::Occupied(Piece::new(Color::Black, PieceType::Pawn));
            board.squares[6][col] = Square::Occupied(Piece::new(Color::White, PieceType::Pawn));
            board.squares[7][col] = Square::Occupied(Piece::new(Color::White, kind));
        }
        board
    }

    /// Panics if `field` is off the board.
    pub fn get(&self, field: ChessField) -> Square {
        assert!(field.is_on_board(), "field {:?} is off the board", field);
        self.squares[field.row as usize][field.col as usize]
    }

    pub(crate) fn set(&mut self, field: ChessField, square: Square) {
        self.squares[field.row as usize][field.col as usize] = square;
    }

    /// Read-only view of the grid for renderers.
    pub fn rows(&self) -> &[[Square; 8]; 8] {
        &self.squares
    }

    /// Iterates the pieces of `color` in row-major order.
    pub fn pieces_with_coordinates(&self, color: Color) -> impl Iterator<Item = (ChessField, Piece)> + '_ {
        self.squares.iter().enumerate().flat_map(move |(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, square)| match square {
                Square::Occupied(piece) if piece.color == color => {
                    Some((ChessField::new(row as u8, col as u8), *piece))
                }
                _ => None,
            })
        })
    }

    pub fn render_to_string(&self) -> String {
        let mut board_representation = String::new();
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");
        board_representation.push_str("  ┌───┬───┬───┬───┬───┬───┬───┬───┐\n");

        for (row, cells) in self.squares.iter().enumerate() {
            let rank = 8 - row;
            board_representation.push_str(&format!("{} │", rank));
            for square in cells {
                let c = match square {
                    Square::Empty => ' ',
                    Square::Occupied(piece) => piece.to_char(),
                };
                board_representation.push_str(&format!(" {} │", c));
            }
            board_representation.push_str(&format!(" {}\n", rank));

            if row < 7 {
                board_representation.push_str("  ├───┼───┼───┼───┼───┼───┼───┼───┤\n");
            }
        }

        board_representation.push_str("  └───┴───┴───┴───┴───┴───┴───┴───┘\n");
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");

        board_representation
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}
