use shakmaty::{Color, Role};

use crate::board::{Board, Square};
use crate::rules;

/// Contents of one board cell.
///
/// Every occupied variant carries its color; `Empty` carries none, so a
/// colorless piece or a colored empty square cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Piece {
    #[default]
    Empty,
    Pawn(Color),
    Rook(Color),
    Knight(Color),
    Bishop(Color),
    Queen(Color),
    King(Color),
}

impl Piece {
    /// Build an occupied piece from a role and color.
    pub const fn new(role: Role, color: Color) -> Self {
        match role {
            Role::Pawn => Piece::Pawn(color),
            Role::Knight => Piece::Knight(color),
            Role::Bishop => Piece::Bishop(color),
            Role::Rook => Piece::Rook(color),
            Role::Queen => Piece::Queen(color),
            Role::King => Piece::King(color),
        }
    }

    /// Piece kind, or `None` for an empty square.
    pub const fn role(self) -> Option<Role> {
        match self {
            Piece::Empty => None,
            Piece::Pawn(_) => Some(Role::Pawn),
            Piece::Rook(_) => Some(Role::Rook),
            Piece::Knight(_) => Some(Role::Knight),
            Piece::Bishop(_) => Some(Role::Bishop),
            Piece::Queen(_) => Some(Role::Queen),
            Piece::King(_) => Some(Role::King),
        }
    }

    /// Owner of the piece, or `None` for an empty square.
    pub const fn color(self) -> Option<Color> {
        match self {
            Piece::Empty => None,
            Piece::Pawn(c)
            | Piece::Rook(c)
            | Piece::Knight(c)
            | Piece::Bishop(c)
            | Piece::Queen(c)
            | Piece::King(c) => Some(c),
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Piece::Empty)
    }

    /// True if this cell holds a piece owned by `color`.
    #[inline]
    pub fn is_color(self, color: Color) -> bool {
        self.color() == Some(color)
    }

    /// Material value awarded to whoever captures this piece.
    pub const fn point_value(self) -> u32 {
        match self {
            Piece::Empty | Piece::King(_) => 0,
            Piece::Pawn(_) => 1,
            Piece::Knight(_) | Piece::Bishop(_) => 3,
            Piece::Rook(_) => 5,
            Piece::Queen(_) => 9,
        }
    }

    /// Unicode glyph for rendering. Empty squares have no glyph.
    pub const fn icon(self) -> Option<char> {
        match self {
            Piece::Empty => None,
            Piece::Pawn(Color::Black) => Some('♟'),
            Piece::Rook(Color::Black) => Some('♜'),
            Piece::Knight(Color::Black) => Some('♞'),
            Piece::Bishop(Color::Black) => Some('♝'),
            Piece::Queen(Color::Black) => Some('♛'),
            Piece::King(Color::Black) => Some('♚'),
            Piece::Pawn(Color::White) => Some('♙'),
            Piece::Rook(Color::White) => Some('♖'),
            Piece::Knight(Color::White) => Some('♘'),
            Piece::Bishop(Color::White) => Some('♗'),
            Piece::Queen(Color::White) => Some('♕'),
            Piece::King(Color::White) => Some('♔'),
        }
    }

    /// Whether this piece may move from `start` to `end` on `board`.
    ///
    /// Pure: the board is only inspected for obstruction and capture checks.
    /// An empty square is never a mover.
    pub fn can_move(self, start: Square, end: Square, board: &Board) -> bool {
        match self {
            Piece::Empty => false,
            Piece::Pawn(color) => rules::pawn_can_move(color, start, end, board),
            Piece::Rook(color) => rules::rook_can_move(color, start, end, board),
            Piece::Knight(color) => rules::knight_can_move(color, start, end, board),
            Piece::Bishop(color) => rules::bishop_can_move(color, start, end, board),
            Piece::Queen(color) => rules::queen_can_move(color, start, end, board),
            Piece::King(color) => rules::king_can_move(color, start, end, board),
        }
    }
}

impl From<shakmaty::Piece> for Piece {
    fn from(piece: shakmaty::Piece) -> Self {
        Piece::new(piece.role, piece.color)
    }
}

impl From<Option<shakmaty::Piece>> for Piece {
    fn from(piece: Option<shakmaty::Piece>) -> Self {
        piece.map_or(Piece::Empty, Piece::from)
    }
}

impl From<Piece> for Option<shakmaty::Piece> {
    fn from(piece: Piece) -> Self {
        Some(shakmaty::Piece {
            role: piece.role()?,
            color: piece.color()?,
        })
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.color(), self.role()) {
            (Some(color), Some(role)) => write!(f, "{color:?} {role:?}"),
            _ => write!(f, "Empty"),
        }
    }
}
