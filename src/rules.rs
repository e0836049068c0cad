use shakmaty::Color;

use crate::board::{Board, Square};
use crate::piece::Piece;

/// Row and column delta from `start` to `end`.
#[inline]
fn delta(start: Square, end: Square) -> (i8, i8) {
    (
        end.row() as i8 - start.row() as i8,
        end.col() as i8 - start.col() as i8,
    )
}

/// Destination is empty or holds an opposing piece.
#[inline]
fn not_friendly(color: Color, end: Square, board: &Board) -> bool {
    !board.piece_at(end).is_color(color)
}

/// Every square strictly between `start` and `end` is empty.
///
/// Only meaningful for straight or diagonal lines.
fn path_clear(start: Square, end: Square, board: &Board) -> bool {
    let (d_row, d_col) = delta(start, end);
    let steps = d_row.abs().max(d_col.abs());
    let (step_row, step_col) = (d_row.signum(), d_col.signum());

    (1..steps).all(|i| {
        start
            .offset(i * step_row, i * step_col)
            .is_some_and(|square| board.piece_at(square).is_empty())
    })
}

/// Forward row direction for a pawn of `color`.
#[inline]
const fn pawn_direction(color: Color) -> i8 {
    match color {
        Color::Black => 1,
        Color::White => -1,
    }
}

#[inline]
const fn pawn_start_row(color: Color) -> u8 {
    match color {
        Color::Black => 1,
        Color::White => 6,
    }
}

pub fn pawn_can_move(color: Color, start: Square, end: Square, board: &Board) -> bool {
    let (d_row, d_col) = delta(start, end);
    let forward = pawn_direction(color);
    let target = board.piece_at(end);

    if d_col == 0 {
        // Pawns never capture straight ahead
        if !target.is_empty() {
            return false;
        }
        if d_row == forward {
            return true;
        }
        d_row == 2 * forward
            && start.row() == pawn_start_row(color)
            && start
                .offset(forward, 0)
                .is_some_and(|between| board.piece_at(between).is_empty())
    } else if d_col.abs() == 1 && d_row == forward {
        // No en passant: the diagonal needs an opposing piece on it
        !target.is_empty() && !target.is_color(color)
    } else {
        false
    }
}

pub fn rook_can_move(color: Color, start: Square, end: Square, board: &Board) -> bool {
    let (d_row, d_col) = delta(start, end);
    start != end
        && (d_row == 0 || d_col == 0)
        && path_clear(start, end, board)
        && not_friendly(color, end, board)
}

pub fn knight_can_move(color: Color, start: Square, end: Square, board: &Board) -> bool {
    let (d_row, d_col) = delta(start, end);
    matches!((d_row.abs(), d_col.abs()), (2, 1) | (1, 2)) && not_friendly(color, end, board)
}

pub fn bishop_can_move(color: Color, start: Square, end: Square, board: &Board) -> bool {
    let (d_row, d_col) = delta(start, end);
    start != end
        && d_row.abs() == d_col.abs()
        && path_clear(start, end, board)
        && not_friendly(color, end, board)
}

pub fn queen_can_move(color: Color, start: Square, end: Square, board: &Board) -> bool {
    rook_can_move(color, start, end, board) || bishop_can_move(color, start, end, board)
}

/// One step in any direction. Stepping onto an attacked square is allowed;
/// there is no check.
pub fn king_can_move(color: Color, start: Square, end: Square, board: &Board) -> bool {
    let (d_row, d_col) = delta(start, end);
    d_row.abs().max(d_col.abs()) == 1 && not_friendly(color, end, board)
}

/// A legal relocation of `piece`, with whatever it lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub capture: Option<Piece>,
}

impl Move {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }
}

/// Every legal move of the piece on `from`, in row-major destination order.
pub fn legal_moves(board: &Board, from: Square) -> Vec<Move> {
    let piece = board.piece_at(from);
    if piece.is_empty() {
        return Vec::new();
    }
    Square::all()
        .filter(|&to| piece.can_move(from, to, board))
        .map(|to| {
            let target = board.piece_at(to);
            Move {
                piece,
                from,
                to,
                capture: (!target.is_empty()).then_some(target),
            }
        })
        .collect()
}

/// All squares the piece on `from` may move to.
pub fn legal_destinations(board: &Board, from: Square) -> Vec<Square> {
    legal_moves(board, from).into_iter().map(|mv| mv.to).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn sq(name: &str) -> Square {
        name.parse().expect("test square is invalid")
    }

    fn position(fen: &str) -> Board {
        Board::from_fen(fen).expect("invalid FEN")
    }

    fn can_move(board: &Board, from: &str, to: &str) -> bool {
        let (from, to) = (sq(from), sq(to));
        board.piece_at(from).can_move(from, to, board)
    }

    fn destinations(board: &Board, from: &str) -> Vec<String> {
        let mut names: Vec<String> = legal_destinations(board, sq(from))
            .into_iter()
            .map(|s| s.to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn no_piece_may_stay_in_place() {
        let board = position("4k3/8/2n5/3Q4/8/5B2/1P6/R3K2R w - - 0 1");
        for (square, piece) in board.pieces() {
            assert!(
                !piece.can_move(square, square, &board),
                "{piece} on {square} moved onto itself"
            );
        }
    }

    // Pawns

    #[test_case("e2", "e3", true; "white single step")]
    #[test_case("e2", "e4", true; "white double step from start")]
    #[test_case("e2", "e5", false; "white triple step")]
    #[test_case("e2", "e1", false; "white backwards")]
    #[test_case("e2", "d3", false; "white diagonal onto empty")]
    #[test_case("e2", "f2", false; "white sideways")]
    #[test_case("d7", "d6", true; "black single step")]
    #[test_case("d7", "d5", true; "black double step from start")]
    #[test_case("d7", "d8", false; "black backwards")]
    fn pawn_from_start(from: &str, to: &str, legal: bool) {
        assert_eq!(can_move(&position(START), from, to), legal);
    }

    #[test]
    fn pawn_double_step_only_from_start_rank() {
        let board = position("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1");
        assert!(can_move(&board, "e3", "e4"));
        assert!(!can_move(&board, "e3", "e5"));
    }

    #[test]
    fn pawn_double_step_needs_clear_intermediate() {
        let board = position("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
        assert!(!can_move(&board, "e2", "e3"));
        assert!(!can_move(&board, "e2", "e4"));
    }

    #[test]
    fn pawn_never_captures_straight_ahead() {
        let board = position("4k3/8/8/8/4p3/8/4P3/4K3 w - - 0 1");
        assert!(can_move(&board, "e2", "e3"));
        assert!(!can_move(&board, "e2", "e4"));
        let board = position("4k3/8/8/8/8/4p3/4P3/4K3 w - - 0 1");
        assert!(!can_move(&board, "e2", "e3"));
    }

    #[test]
    fn pawn_captures_diagonally_forward() {
        let board = position("4k3/8/8/3p1P2/4P3/8/8/4K3 w - - 0 1");
        assert!(can_move(&board, "e4", "d5"));
        // Friendly piece on the other diagonal
        assert!(!can_move(&board, "e4", "f5"));
        // Black captures downward
        assert!(can_move(&board, "d5", "e4"));
        assert!(!can_move(&board, "d5", "c4"));
    }

    #[test]
    fn pawn_has_no_en_passant() {
        // White pawn e5 next to a black pawn that just double-stepped to d5
        let board = position("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        assert!(!can_move(&board, "e5", "d6"));
        assert!(can_move(&board, "e5", "e6"));
    }

    #[test]
    fn pawn_backwards_capture_is_illegal() {
        let board = position("4k3/8/8/8/4P3/3p4/8/4K3 w - - 0 1");
        assert!(!can_move(&board, "e4", "d3"));
    }

    // Rooks

    #[test]
    fn rook_blocked_at_start() {
        assert_eq!(destinations(&position(START), "a1"), Vec::<String>::new());
    }

    #[test]
    fn rook_lines_until_obstruction() {
        let board = position("4k3/8/8/8/R2p4/8/P7/4K3 w - - 0 1");
        assert_eq!(
            destinations(&board, "a4"),
            vec!["a3", "a5", "a6", "a7", "a8", "b4", "c4", "d4"]
        );
    }

    #[test_case("5k2/8/8/8/R1n1p3/8/8/4K3 w - - 0 1"; "opposing blocker")]
    #[test_case("5k2/8/8/8/R1N1p3/8/8/4K3 w - - 0 1"; "friendly blocker")]
    fn rook_cannot_jump_any_color(fen: &str) {
        let board = position(fen);
        assert!(!can_move(&board, "a4", "e4"));
        assert!(!can_move(&board, "a4", "d4"));
    }

    #[test]
    fn rook_rejects_diagonal() {
        let board = position("4k3/8/8/8/R7/8/8/4K3 w - - 0 1");
        assert!(!can_move(&board, "a4", "b5"));
        assert!(!can_move(&board, "a4", "c5"));
    }

    // Knights

    #[test]
    fn knight_jumps_over_pieces() {
        let board = position(START);
        assert!(can_move(&board, "b1", "c3"));
        assert!(can_move(&board, "b1", "a3"));
        assert!(!can_move(&board, "b1", "d2"));
        assert!(!can_move(&board, "b1", "b3"));
    }

    #[test]
    fn knight_all_jumps_from_center() {
        let board = position("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1");
        assert_eq!(
            destinations(&board, "d4"),
            vec!["b3", "b5", "c2", "c6", "e2", "e6", "f3", "f5"]
        );
    }

    #[test]
    fn knight_captures_but_not_friendly() {
        let board = position("4k3/8/2p1P3/8/3N4/8/8/4K3 w - - 0 1");
        assert!(can_move(&board, "d4", "c6"));
        assert!(!can_move(&board, "d4", "e6"));
    }

    // Bishops

    #[test]
    fn bishop_diagonals_until_obstruction() {
        let board = position("4k3/8/8/8/8/8/1P1p4/2B1K3 w - - 0 1");
        assert_eq!(destinations(&board, "c1"), vec!["d2"]);
    }

    #[test]
    fn bishop_rejects_non_diagonal() {
        let board = position("4k3/8/8/8/3B4/8/8/4K3 w - - 0 1");
        assert!(!can_move(&board, "d4", "d6"));
        assert!(!can_move(&board, "d4", "e6"));
        assert!(can_move(&board, "d4", "h8"));
        assert!(can_move(&board, "d4", "a1"));
    }

    #[test]
    fn bishop_cannot_pass_through() {
        let board = position("4k3/8/8/5n2/8/3B4/8/4K3 w - - 0 1");
        assert!(can_move(&board, "d3", "f5"));
        assert!(!can_move(&board, "d3", "g6"));
    }

    // Queens

    #[test]
    fn queen_is_union_of_rook_and_bishop() {
        let board = position("4k3/8/8/8/3Q4/8/8/4K3 w - - 0 1");
        for to in Square::all() {
            let from = sq("d4");
            let queen = Piece::Queen(Color::White);
            let as_rook = rook_can_move(Color::White, from, to, &board);
            let as_bishop = bishop_can_move(Color::White, from, to, &board);
            assert_eq!(queen.can_move(from, to, &board), as_rook || as_bishop);
        }
        assert_eq!(legal_destinations(&board, sq("d4")).len(), 27);
    }

    #[test]
    fn queen_blocked_and_knight_pattern_illegal() {
        let board = position("4k3/8/8/8/8/8/4P3/3QK3 w - - 0 1");
        assert!(!can_move(&board, "d1", "f3"));
        assert!(!can_move(&board, "d1", "e3"));
        assert!(can_move(&board, "d1", "d8"));
        assert!(can_move(&board, "d1", "a4"));
    }

    // Kings

    #[test]
    fn king_one_step_any_direction() {
        let board = position("4k3/8/8/8/3K4/8/8/8 w - - 0 1");
        assert_eq!(
            destinations(&board, "d4"),
            vec!["c3", "c4", "c5", "d3", "d5", "e3", "e4", "e5"]
        );
    }

    #[test]
    fn king_does_not_jump_two() {
        let board = position("4k3/8/8/8/3K4/8/8/8 w - - 0 1");
        assert!(!can_move(&board, "d4", "d6"));
        assert!(!can_move(&board, "d4", "f4"));
    }

    #[test]
    fn king_may_step_into_attacked_square() {
        // e2 is attacked by the black rook on e8
        let board = position("4r2k/8/8/8/8/8/8/3K4 w - - 0 1");
        assert!(can_move(&board, "d1", "e2"));
    }

    #[test]
    fn king_captures_adjacent_king() {
        let board = position("8/8/8/3k4/3K4/8/8/8 w - - 0 1");
        assert!(can_move(&board, "d4", "d5"));
    }

    #[test]
    fn starting_position_mobility() {
        let board = position(START);
        let total: usize = board
            .pieces()
            .filter(|(_, piece)| piece.is_color(Color::White))
            .map(|(square, _)| legal_destinations(&board, square).len())
            .sum();
        assert_eq!(total, 20);
    }

    #[test]
    fn legal_moves_mark_captures() {
        let board = position("4k3/8/2p1P3/8/3N4/8/8/4K3 w - - 0 1");
        let moves = legal_moves(&board, sq("d4"));

        let capture = moves
            .iter()
            .find(|mv| mv.to == sq("c6"))
            .expect("c6 capture should be legal");
        assert_eq!(capture.capture, Some(Piece::Pawn(Color::Black)));
        assert_eq!(capture.piece, Piece::Knight(Color::White));
        assert!(moves.iter().filter(|mv| mv.to != sq("c6")).all(|mv| !mv.is_capture()));
    }

    #[test]
    fn empty_square_has_no_destinations() {
        assert!(legal_destinations(&position(START), sq("e4")).is_empty());
    }
}
