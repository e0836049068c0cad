use crate::board::Square;
use crate::rules::Move;

/// Type of visual feedback for an individual square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareFeedback {
    /// The selected piece stands here
    Origin,
    /// The selected piece may move here
    Destination,
    /// Moving here captures an opponent piece
    Capture,
}

/// Contains the set of squares and their associated feedback types for the current board state.
///
/// `BoardFeedback` is computed by `compute_feedback()` and consumed by renderers to show the
/// player where the selected piece stands and where it may go. It is the primary interface
/// between the game logic and the display layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardFeedback {
    squares: Vec<(Square, SquareFeedback)>,
}

impl BoardFeedback {
    /// Create empty feedback (no highlights)
    #[inline]
    pub const fn new() -> Self {
        Self {
            squares: Vec::new(),
        }
    }

    /// Get all square feedback entries
    #[inline]
    pub fn squares(&self) -> &[(Square, SquareFeedback)] {
        &self.squares
    }

    /// Get feedback for a specific square, if any
    #[inline]
    pub fn get(&self, square: Square) -> Option<SquareFeedback> {
        self.squares
            .iter()
            .find(|(sq, _)| *sq == square)
            .map(|(_, feedback)| *feedback)
    }

    /// Set feedback for a square, replacing any previous entry
    pub fn set(&mut self, square: Square, feedback: SquareFeedback) {
        match self.squares.iter_mut().find(|(sq, _)| *sq == square) {
            Some(entry) => entry.1 = feedback,
            None => self.squares.push((square, feedback)),
        }
    }

    /// Returns true if there are no feedback squares to display.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }
}

/// Game state information needed to compute feedback
///
/// This trait defines what the feedback system needs from the game engine.
pub trait FeedbackSource {
    /// Legal moves of the selected piece, empty when nothing is selected
    fn legal_moves(&self) -> &[Move];

    /// The square picked on the first click, if any
    fn selected(&self) -> Option<Square>;
}

/// Compute visual feedback based on current game state.
///
/// With a piece selected, marks its square as the origin and every legal
/// destination as either a plain destination or a capture. Otherwise shows
/// nothing.
pub fn compute_feedback(source: &impl FeedbackSource) -> BoardFeedback {
    let Some(from) = source.selected() else {
        return BoardFeedback::default();
    };

    let mut feedback = BoardFeedback::new();
    feedback.set(from, SquareFeedback::Origin);
    for (square, kind) in source
        .legal_moves()
        .iter()
        .filter(|mv| mv.from == from)
        .map(classify_move)
    {
        feedback.set(square, kind);
    }
    feedback
}

/// Classify a move as either a capture or regular destination
fn classify_move(mv: &Move) -> (Square, SquareFeedback) {
    if mv.is_capture() {
        (mv.to, SquareFeedback::Capture)
    } else {
        (mv.to, SquareFeedback::Destination)
    }
}
