use std::io::{self, Write};

use crate::BoardDisplay;
use crate::board::{BOARD_SIZE, Board, Square};
use crate::feedback::{BoardFeedback, SquareFeedback};

/// Terminal-based board display for development and testing.
///
/// Renders the board as an 8×8 grid of piece glyphs, with ANSI
/// background colors matching the feedback type (origin, destinations,
/// captures). Row 0 (Black's back rank) is printed first.
#[derive(Debug, Default)]
pub struct TerminalDisplay;

impl TerminalDisplay {
    /// Create a new terminal display.
    pub fn new() -> Self {
        Self
    }
}

/// Error type for terminal display operations.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("failed to write to terminal: {0}")]
    Io(#[from] io::Error),
}

impl BoardDisplay for TerminalDisplay {
    type Error = DisplayError;

    fn show(&mut self, board: &Board, feedback: &BoardFeedback) -> Result<(), Self::Error> {
        render_board(&mut io::stdout(), board, feedback)
    }
}

/// Render board and feedback to any writer. Extracted for testability.
pub(crate) fn render_board(
    w: &mut impl Write,
    board: &Board,
    feedback: &BoardFeedback,
) -> Result<(), DisplayError> {
    for row in 0..BOARD_SIZE {
        write!(w, " {} ", BOARD_SIZE - row)?;
        for col in 0..BOARD_SIZE {
            let square = Square::new(row, col).expect("row and col are below BOARD_SIZE");
            let glyph = board.piece_at(square).icon().unwrap_or('·');
            write!(w, "{}", format_square(glyph, feedback.get(square)))?;
        }
        writeln!(w)?;
    }
    writeln!(w, "    a  b  c  d  e  f  g  h")?;
    w.flush()?;
    Ok(())
}

/// Wrap a glyph in the ANSI background for its feedback variant.
fn format_square(glyph: char, feedback: Option<SquareFeedback>) -> String {
    match feedback {
        Some(SquareFeedback::Destination) => format!("\x1b[44m {glyph} \x1b[0m"),
        Some(SquareFeedback::Capture) => format!("\x1b[41m {glyph} \x1b[0m"),
        Some(SquareFeedback::Origin) => format!("\x1b[42m {glyph} \x1b[0m"),
        None => format!(" {glyph} "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(board: &Board, feedback: &BoardFeedback) -> String {
        let mut buf = Vec::new();
        render_board(&mut buf, board, feedback).expect("rendering to buffer should succeed");
        String::from_utf8(buf).expect("output should be valid UTF-8")
    }

    fn sq(name: &str) -> Square {
        name.parse().expect("invalid square")
    }

    #[test]
    fn show_contains_all_ranks_and_files() {
        let output = render_to_string(&Board::standard(), &BoardFeedback::new());

        for rank in '1'..='8' {
            assert!(
                output.contains(rank),
                "output should contain rank label '{rank}'"
            );
        }
        assert!(
            output.contains("a  b  c  d  e  f  g  h"),
            "output should contain file labels"
        );
    }

    #[test]
    fn black_back_rank_printed_first() {
        let output = render_to_string(&Board::standard(), &BoardFeedback::new());
        let first = output.lines().next().expect("output should not be empty");

        assert!(first.starts_with(" 8 "));
        assert!(first.contains('♚'));
        assert!(!first.contains('♔'));
    }

    #[test]
    fn empty_board_shows_dots() {
        let output = render_to_string(&Board::empty(), &BoardFeedback::new());
        assert_eq!(output.matches('·').count(), 64);
    }

    #[test]
    fn show_destination_uses_blue_background() {
        let mut feedback = BoardFeedback::new();
        feedback.set(sq("e4"), SquareFeedback::Destination);

        let output = render_to_string(&Board::standard(), &feedback);

        assert!(
            output.contains("\x1b[44m"),
            "destination should use blue ANSI background"
        );
    }

    #[test]
    fn show_capture_uses_red_background() {
        let mut feedback = BoardFeedback::new();
        feedback.set(sq("d7"), SquareFeedback::Capture);

        let output = render_to_string(&Board::standard(), &feedback);

        assert!(
            output.contains("\x1b[41m ♟ \x1b[0m"),
            "capture should use red ANSI background around the captured piece"
        );
    }

    #[test]
    fn show_origin_uses_green_background() {
        let mut feedback = BoardFeedback::new();
        feedback.set(sq("e2"), SquareFeedback::Origin);

        let output = render_to_string(&Board::standard(), &feedback);

        assert!(
            output.contains("\x1b[42m ♙ \x1b[0m"),
            "origin should use green ANSI background"
        );
    }

    #[test]
    fn empty_feedback_has_no_ansi_codes() {
        let output = render_to_string(&Board::standard(), &BoardFeedback::new());

        assert!(
            !output.contains("\x1b[4"),
            "empty feedback should have no ANSI background codes"
        );
    }
}
