use shakmaty::fen::{Fen, ParseFenError};
use shakmaty::{ByColor, Color};
use thiserror::Error;

use crate::board::{Board, Square};
use crate::clock::ChessClock;
use crate::config::{ClockStart, EngineConfig};
use crate::feedback::FeedbackSource;
use crate::piece::Piece;
use crate::rules::{self, Move};

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VictoryReason {
    /// The loser's king was taken off the board.
    KingCaptured,
    /// The loser's clock ran out.
    Timeout,
}

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Victory {
    pub winner: Color,
    pub reason: VictoryReason,
}

impl std::fmt::Display for Victory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let how = match self.reason {
            VictoryReason::KingCaptured => "king capture",
            VictoryReason::Timeout => "timeout",
        };
        write!(f, "{:?} wins by {how}", self.winner)
    }
}

/// Rejected input. None of these leave the game in a broken state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("{square} does not hold a {turn:?} piece")]
    InvalidSelection { square: Square, turn: Color },

    #[error("{piece} cannot move from {from} to {to}")]
    InvalidMove {
        piece: Piece,
        from: Square,
        to: Square,
    },

    #[error("({row}, {col}) is off the board")]
    OutOfBounds { row: u8, col: u8 },

    #[error("game is over: {0}")]
    GameOver(Victory),
}

/// Where the controller is in the two-click selection cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    AwaitingFirstSelection,
    AwaitingDestination(Square),
}

/// Input to the controller, applied strictly in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The player picked a square.
    Select(Square),
    /// One second elapsed on the active player's clock.
    Tick,
    /// Start a new game.
    Reset,
}

/// What an accepted event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// An own piece was picked up; these are its legal destinations.
    Selected {
        square: Square,
        destinations: Vec<Square>,
    },
    /// A move was played, possibly ending the game.
    Moved {
        mv: Move,
        victory: Option<Victory>,
    },
    /// A clock tick, possibly flagging the active player.
    Ticked { victory: Option<Victory> },
    Reset,
}

/// Current game state snapshot for feedback and display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    turn: Color,
    selected: Option<Square>,
    legal_moves: Vec<Move>,
    winner: Option<Victory>,
}

impl GameState {
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn winner(&self) -> Option<Victory> {
        self.winner
    }
}

impl FeedbackSource for GameState {
    fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    fn selected(&self) -> Option<Square> {
        self.selected
    }
}

/// Owns the board and every piece of game state, and is the only thing that
/// mutates them.
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: EngineConfig,
    board: Board,
    turn: Color,
    phase: Phase,
    scores: ByColor<u32>,
    /// Opposing pieces taken by each color, in capture order.
    captured: ByColor<Vec<Piece>>,
    clock: ChessClock,
    winner: Option<Victory>,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    #[inline]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::from_board(Board::standard(), Color::White, config)
    }

    /// Creates a GameEngine from an arbitrary position with `turn` to move.
    pub fn from_board(board: Board, turn: Color, config: EngineConfig) -> Self {
        let mut engine = Self {
            config,
            board,
            turn,
            phase: Phase::default(),
            scores: ByColor { white: 0, black: 0 },
            captured: ByColor {
                white: Vec::new(),
                black: Vec::new(),
            },
            clock: ChessClock::new(config.clock_seconds),
            winner: None,
        };
        if config.clock_start == ClockStart::Immediately {
            engine.clock.start();
        }
        engine
    }

    /// Creates a GameEngine from a FEN string (placement and side to move).
    pub fn from_fen(fen: &str, config: EngineConfig) -> Result<Self, ParseFenError> {
        let setup = fen.parse::<Fen>()?.into_setup();
        Ok(Self::from_board(
            Board::from(&setup.board),
            setup.turn,
            config,
        ))
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get the piece at a given square
    #[inline]
    pub fn piece_at(&self, square: Square) -> Piece {
        self.board.piece_at(square)
    }

    /// Get the piece at `(row, col)`, or `None` off the board.
    pub fn piece_at_coords(&self, row: u8, col: u8) -> Option<Piece> {
        Square::new(row, col).map(|square| self.piece_at(square))
    }

    /// Squares the piece on `square` could move to right now.
    pub fn legal_destinations(&self, square: Square) -> Vec<Square> {
        rules::legal_destinations(&self.board, square)
    }

    /// Legal destinations of the piece on `(row, col)`.
    pub fn legal_destinations_at(&self, row: u8, col: u8) -> Result<Vec<Square>, GameError> {
        let square = Square::new(row, col).ok_or(GameError::OutOfBounds { row, col })?;
        Ok(self.legal_destinations(square))
    }

    #[inline]
    pub fn current_turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Square picked on the first click, if a destination is awaited.
    pub fn selected(&self) -> Option<Square> {
        match self.phase {
            Phase::AwaitingFirstSelection => None,
            Phase::AwaitingDestination(square) => Some(square),
        }
    }

    /// `(white_score, black_score)`.
    #[inline]
    pub fn scores(&self) -> (u32, u32) {
        (self.scores.white, self.scores.black)
    }

    #[inline]
    pub fn score(&self, color: Color) -> u32 {
        *self.scores.get(color)
    }

    /// Pieces `color` has captured from the opponent.
    #[inline]
    pub fn captured_by(&self, color: Color) -> &[Piece] {
        self.captured.get(color)
    }

    #[inline]
    pub fn winner(&self) -> Option<Victory> {
        self.winner
    }

    #[inline]
    pub fn remaining_time(&self, color: Color) -> u32 {
        self.clock.remaining(color)
    }

    #[inline]
    pub fn clock(&self) -> &ChessClock {
        &self.clock
    }

    #[inline]
    pub fn clock_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Snapshot of what the renderer needs to highlight.
    pub fn snapshot(&self) -> GameState {
        let legal_moves = self
            .selected()
            .map(|square| rules::legal_moves(&self.board, square))
            .unwrap_or_default();
        GameState {
            turn: self.turn,
            selected: self.selected(),
            legal_moves,
            winner: self.winner,
        }
    }

    /// Apply one event. The only entry point a front end needs.
    pub fn handle(&mut self, event: GameEvent) -> Result<Outcome, GameError> {
        match event {
            GameEvent::Select(square) => self.select(square),
            GameEvent::Tick => Ok(Outcome::Ticked {
                victory: self.tick(),
            }),
            GameEvent::Reset => {
                self.reset();
                Ok(Outcome::Reset)
            }
        }
    }

    /// Process a click on `(row, col)`.
    pub fn select_square(&mut self, row: u8, col: u8) -> Result<Outcome, GameError> {
        let square = Square::new(row, col).ok_or(GameError::OutOfBounds { row, col })?;
        self.select(square)
    }

    /// Process a click on `square`.
    ///
    /// The first click must pick up a piece of the side to move. The second
    /// click names the destination; the selection is dropped afterwards
    /// whether or not the move was legal.
    pub fn select(&mut self, square: Square) -> Result<Outcome, GameError> {
        if let Some(victory) = self.winner {
            return Err(GameError::GameOver(victory));
        }

        match self.phase {
            Phase::AwaitingFirstSelection => self.pick_up(square),
            Phase::AwaitingDestination(from) => {
                self.phase = Phase::AwaitingFirstSelection;
                self.play(from, square)
            }
        }
    }

    fn pick_up(&mut self, square: Square) -> Result<Outcome, GameError> {
        let piece = self.board.piece_at(square);
        if !piece.is_color(self.turn) {
            log::debug!("rejected selection of {square} ({piece}) on {:?}'s turn", self.turn);
            return Err(GameError::InvalidSelection {
                square,
                turn: self.turn,
            });
        }

        if self.config.clock_start == ClockStart::OnFirstSelection && !self.clock.is_running() {
            log::debug!("clock started");
            self.clock.start();
        }

        self.phase = Phase::AwaitingDestination(square);
        let destinations = self.legal_destinations(square);
        log::debug!(
            "selected {piece} on {square}, {} destinations",
            destinations.len()
        );
        Ok(Outcome::Selected {
            square,
            destinations,
        })
    }

    fn play(&mut self, from: Square, to: Square) -> Result<Outcome, GameError> {
        let piece = self.board.piece_at(from);
        if !piece.can_move(from, to, &self.board) {
            log::debug!("rejected move of {piece} from {from} to {to}");
            return Err(GameError::InvalidMove { piece, from, to });
        }

        let target = self.board.piece_at(to);
        let capture = (!target.is_empty()).then_some(target);
        if let Some(taken) = capture {
            *self.scores.get_mut(self.turn) += taken.point_value();
            self.captured.get_mut(self.turn).push(taken);
            log::info!(
                "{:?} captures {taken} on {to} (score {})",
                self.turn,
                self.score(self.turn)
            );
        }

        self.board.set(to, piece);
        self.board.set(from, Piece::Empty);
        log::debug!("moved {piece} from {from} to {to}");

        self.turn = self.turn.other();
        let victory = self.check_kings();

        Ok(Outcome::Moved {
            mv: Move {
                piece,
                from,
                to,
                capture,
            },
            victory,
        })
    }

    /// Record a win if either king is gone.
    fn check_kings(&mut self) -> Option<Victory> {
        let loser = Color::ALL
            .into_iter()
            .find(|&color| !self.board.has_king(color))?;
        Some(self.finish(Victory {
            winner: loser.other(),
            reason: VictoryReason::KingCaptured,
        }))
    }

    fn finish(&mut self, victory: Victory) -> Victory {
        log::info!("{victory}");
        self.winner = Some(victory);
        self.phase = Phase::AwaitingFirstSelection;
        self.clock.stop();
        victory
    }

    /// Take one second from the side to move.
    ///
    /// Returns the result if this tick flagged the player. Ticks after the
    /// game has ended, or before a stopped clock is started, do nothing.
    pub fn tick(&mut self) -> Option<Victory> {
        if self.winner.is_some() {
            return None;
        }
        if self.clock.tick(self.turn) {
            return Some(self.finish(Victory {
                winner: self.turn.other(),
                reason: VictoryReason::Timeout,
            }));
        }
        None
    }

    /// Start a new game in place: standard position, White to move, scores
    /// and captures cleared, clocks refilled.
    pub fn reset(&mut self) {
        self.board.reset();
        self.turn = Color::White;
        self.phase = Phase::AwaitingFirstSelection;
        self.scores = ByColor { white: 0, black: 0 };
        self.captured = ByColor {
            white: Vec::new(),
            black: Vec::new(),
        };
        self.winner = None;
        self.clock.reset();
        if self.config.clock_start == ClockStart::Immediately {
            self.clock.start();
        }
        log::info!("new game");
    }
}
