use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use shakmaty::fen::{Fen, ParseFenError};
use shakmaty::{Color, File, ParseSquareError, Rank, Role};

use crate::piece::Piece;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: u8 = 8;

/// A board coordinate: `row` 0 is Black's back rank, row 7 is White's.
///
/// Columns run 0-7 from the a-file to the h-file, so `(6, 4)` is `e2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Creates a Square if both coordinates are on the board.
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// The square displaced by `(d_row, d_col)`, if still on the board.
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = u8::try_from(i16::from(self.row) + i16::from(d_row)).ok()?;
        let col = u8::try_from(i16::from(self.col) + i16::from(d_col)).ok()?;
        Self::new(row, col)
    }

    /// All 64 squares in row-major order starting at `(0, 0)`.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Square { row, col }))
    }
}

impl From<Square> for shakmaty::Square {
    fn from(square: Square) -> Self {
        shakmaty::Square::from_coords(
            File::new(u32::from(square.col)),
            Rank::new(u32::from(BOARD_SIZE - 1 - square.row)),
        )
    }
}

impl From<shakmaty::Square> for Square {
    fn from(square: shakmaty::Square) -> Self {
        Square {
            row: BOARD_SIZE - 1 - square.rank() as u8,
            col: square.file() as u8,
        }
    }
}

/// Parse algebraic notation like "e2" into a Square.
///
/// # Examples
/// ```
/// # use king_capture_chess::board::Square;
/// let square: Square = "e2".parse().unwrap();
/// assert_eq!((square.row(), square.col()), (6, 4));
/// ```
impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<shakmaty::Square>().map(Square::from)
    }
}

/// Display square in algebraic notation (e.g., "e2").
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shakmaty::Square::from(*self))
    }
}

const BACK_RANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

/// The 8×8 grid of pieces. The only persistent record of piece positions.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Piece; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Board {
    /// A board with every cell empty.
    pub const fn empty() -> Self {
        Self {
            cells: [[Piece::Empty; BOARD_SIZE as usize]; BOARD_SIZE as usize],
        }
    }

    /// The standard starting position.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        board.reset();
        board
    }

    /// Restore the standard starting position in place.
    pub fn reset(&mut self) {
        for (col, role) in BACK_RANK.into_iter().enumerate() {
            self.cells[0][col] = Piece::new(role, Color::Black);
            self.cells[1][col] = Piece::Pawn(Color::Black);
            self.cells[6][col] = Piece::Pawn(Color::White);
            self.cells[7][col] = Piece::new(role, Color::White);
        }
        for row in &mut self.cells[2..6] {
            row.fill(Piece::Empty);
        }
    }

    /// Builds a board from the piece placement of a FEN string.
    ///
    /// Only placement is read; castling and en passant fields are ignored
    /// because those rules do not exist here.
    pub fn from_fen(fen: &str) -> Result<Self, ParseFenError> {
        Ok(Self::from(&fen.parse::<Fen>()?.into_setup().board))
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Piece {
        self[square]
    }

    #[inline]
    pub fn set(&mut self, square: Square, piece: Piece) {
        self.cells[square.row as usize][square.col as usize] = piece;
    }

    /// True if a king of `color` is still on the board.
    pub fn has_king(&self, color: Color) -> bool {
        self.cells
            .iter()
            .flatten()
            .any(|&piece| piece == Piece::King(color))
    }

    /// Occupied squares with their pieces, row-major.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all()
            .map(|square| (square, self.piece_at(square)))
            .filter(|(_, piece)| !piece.is_empty())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Index<Square> for Board {
    type Output = Piece;

    fn index(&self, square: Square) -> &Piece {
        &self.cells[square.row as usize][square.col as usize]
    }
}

impl From<&shakmaty::Board> for Board {
    fn from(board: &shakmaty::Board) -> Self {
        let mut out = Self::empty();
        for square in Square::all() {
            out.set(square, Piece::from(board.piece_at(square.into())));
        }
        out
    }
}

/// Rows from row 0 down, one FEN-style character per cell (`.` for empty).
impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self
            .cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&piece| {
                        Option::<shakmaty::Piece>::from(piece).map_or('.', |p| p.char())
                    })
                    .collect()
            })
            .collect();
        f.debug_struct("Board").field("rows", &rows).finish()
    }
}
