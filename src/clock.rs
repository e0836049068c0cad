use shakmaty::{ByColor, Color};

/// Per-player countdown clock, advanced one second per [`ChessClock::tick`].
///
/// The clock never reads wall time itself; whoever owns it decides when a
/// second has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessClock {
    allotment: u32,
    remaining: ByColor<u32>,
    running: bool,
}

impl ChessClock {
    /// Create a stopped clock giving each player `allotment` seconds.
    pub fn new(allotment: u32) -> Self {
        Self {
            allotment,
            remaining: ByColor {
                white: allotment,
                black: allotment,
            },
            running: false,
        }
    }

    #[inline]
    pub fn remaining(&self, color: Color) -> u32 {
        *self.remaining.get(color)
    }

    #[inline]
    pub fn allotment(&self) -> u32 {
        self.allotment
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stop the clock and refill both players to the allotment.
    pub fn reset(&mut self) {
        self.remaining = ByColor {
            white: self.allotment,
            black: self.allotment,
        };
        self.running = false;
    }

    /// Take one second from `active`.
    ///
    /// Returns `true` when this tick ran the player out of time; the clock
    /// stops itself at that point. Ticks on a stopped clock do nothing.
    pub fn tick(&mut self, active: Color) -> bool {
        if !self.running {
            return false;
        }
        let left = self.remaining.get_mut(active);
        *left = left.saturating_sub(1);
        if *left == 0 {
            self.running = false;
            return true;
        }
        false
    }
}
