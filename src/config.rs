use std::env;

use thiserror::Error;

/// Seconds each player gets when nothing else is configured.
pub const DEFAULT_CLOCK_SECONDS: u32 = 60;

/// Environment variable overriding [`EngineConfig::clock_seconds`].
pub const CLOCK_SECONDS_VAR: &str = "CHESS_CLOCK_SECONDS";

/// Environment variable overriding [`EngineConfig::clock_start`].
pub const CLOCK_START_VAR: &str = "CHESS_CLOCK_START";

/// When the game clock begins counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockStart {
    /// Ticks count from the moment the game starts.
    #[default]
    Immediately,
    /// Ticks are ignored until the first valid piece selection of the game.
    OnFirstSelection,
}

impl std::str::FromStr for ClockStart {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "immediately" | "immediate" => Ok(ClockStart::Immediately),
            "first-selection" | "on-first-selection" => Ok(ClockStart::OnFirstSelection),
            _ => Err(ConfigError::InvalidValue {
                var: CLOCK_START_VAR,
                value: s.to_string(),
            }),
        }
    }
}

/// Error when reading configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
}

/// Game engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seconds on each player's clock at game start and after reset.
    pub clock_seconds: u32,
    pub clock_start: ClockStart,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            clock_seconds: DEFAULT_CLOCK_SECONDS,
            clock_start: ClockStart::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_clock_seconds(mut self, seconds: u32) -> Self {
        self.clock_seconds = seconds;
        self
    }

    pub fn with_clock_start(mut self, start: ClockStart) -> Self {
        self.clock_start = start;
        self
    }

    /// Defaults overridden by `CHESS_CLOCK_SECONDS` and `CHESS_CLOCK_START`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup. Unset variables keep defaults.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(CLOCK_SECONDS_VAR) {
            config.clock_seconds = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: CLOCK_SECONDS_VAR,
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(CLOCK_START_VAR) {
            config.clock_start = value.parse()?;
        }

        Ok(config)
    }
}
