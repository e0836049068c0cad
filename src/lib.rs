pub mod board;
pub mod clock;
pub mod config;
pub mod feedback;
pub mod game_logic;
pub mod mock;
pub mod piece;
pub mod rules;

/// Trait for receiving player input as game events.
///
/// Abstracts over scripted inputs and interactive front ends, providing a
/// uniform interface for feeding `GameEngine`.
pub trait InputSource {
    /// Error type for input read failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Next available event, or `None` if nothing is pending.
    fn poll_event(&mut self) -> Result<Option<game_logic::GameEvent>, Self::Error>;
}

/// Trait for displaying the board and feedback to the player.
///
/// Abstracts over rendering targets, providing a uniform interface for the
/// output side of the game loop. Mirrors [`InputSource`] on the input side.
pub trait BoardDisplay {
    /// Error type for display update failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Show the board with the given feedback highlighted.
    ///
    /// Implementations map [`feedback::SquareFeedback`] variants
    /// to target-specific output (terminal colors, etc.).
    fn show(
        &mut self,
        board: &board::Board,
        feedback: &feedback::BoardFeedback,
    ) -> Result<(), Self::Error>;
}

/// Feed every pending event from `input` into `engine`, in order.
///
/// Rejected selections are logged and skipped; they never stop the run.
/// Returns the number of events applied.
pub fn run_events<I: InputSource>(
    engine: &mut game_logic::GameEngine,
    input: &mut I,
) -> Result<usize, I::Error> {
    let mut count = 0;
    while let Some(event) = input.poll_event()? {
        if let Err(e) = engine.handle(event) {
            log::debug!("{event:?} rejected: {e}");
        }
        count += 1;
    }
    Ok(count)
}
