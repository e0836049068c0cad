use std::collections::VecDeque;

use thiserror::Error;

use crate::InputSource;
use crate::board::Square;
use crate::game_logic::GameEvent;

/// Error when parsing an input script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid script token: '{0}'")]
pub struct ParseError(String);

/// A scriptable input source that turns a compact script into game events.
///
/// New script can be appended at any time for interactive use.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    pending: VecDeque<GameEvent>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and queue additional script for execution.
    ///
    /// Format:
    /// - Squares are 2 characters (e.g., "e2", "a1") and select that square
    /// - `+` advances the clock by one second
    /// - `!` resets the game
    /// - Spaces and periods only separate tokens
    ///
    /// Examples:
    /// - `"e2e4"` - Pick up e2, put it on e4
    /// - `"e2. e4."` - Same
    /// - `"+++ e2 e4"` - Three seconds pass for White, then e2-e4
    ///
    /// A script with an invalid token queues nothing.
    pub fn push_script(&mut self, script: &str) -> Result<(), ParseError> {
        let events = parse_script(script)?;
        self.pending.extend(events);
        Ok(())
    }

    /// Queue a single event.
    pub fn push(&mut self, event: GameEvent) {
        self.pending.push_back(event);
    }

    /// Next pending event, if any.
    pub fn next_event(&mut self) -> Option<GameEvent> {
        self.pending.pop_front()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Execute all pending events, calling the provided callback for each.
    pub fn drain<F>(&mut self, mut on_event: F)
    where
        F: FnMut(GameEvent),
    {
        while let Some(event) = self.next_event() {
            on_event(event);
        }
    }
}

impl InputSource for ScriptedInput {
    type Error = std::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<GameEvent>, Self::Error> {
        Ok(self.next_event())
    }
}

/// Parse a script string into events.
fn parse_script(script: &str) -> Result<Vec<GameEvent>, ParseError> {
    let mut events = Vec::new();
    let mut current_token = String::new();

    for ch in script.chars() {
        match ch {
            '.' => flush_token(&mut current_token, &mut events)?,
            c if c.is_whitespace() => flush_token(&mut current_token, &mut events)?,
            '+' => {
                flush_token(&mut current_token, &mut events)?;
                events.push(GameEvent::Tick);
            }
            '!' => {
                flush_token(&mut current_token, &mut events)?;
                events.push(GameEvent::Reset);
            }
            _ => {
                current_token.push(ch);

                // Squares are exactly 2 characters (e.g., "e2", "a1")
                if current_token.chars().count() == 2 {
                    flush_token(&mut current_token, &mut events)?;
                }
            }
        }
    }

    // A dangling single character is never a square
    flush_token(&mut current_token, &mut events)?;

    Ok(events)
}

/// Turn the current token into a selection and clear it.
fn flush_token(token: &mut String, events: &mut Vec<GameEvent>) -> Result<(), ParseError> {
    if !token.is_empty() {
        let square: Square = token
            .trim()
            .parse()
            .map_err(|_| ParseError(token.clone()))?;
        events.push(GameEvent::Select(square));
        token.clear();
    }
    Ok(())
}
