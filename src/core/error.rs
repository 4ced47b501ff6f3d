//! Error taxonomy for the chase engine.
//!
//! Overshooting the finish line is not an error: it is reported through
//! [`MoveOutcome`](super::creature::MoveOutcome). `InvalidConfig` stops a
//! game before it starts. `SnackExhausted` is absorbed by the rule that
//! raised it. Everything else aborts the current game.

use thiserror::Error;

use super::creature::CreatureName;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("unsupported strategy '{0}'")]
    UnsupportedStrategy(String),

    #[error("invalid game config: {0}")]
    InvalidConfig(String),

    #[error("{remaining} animal moves left without an animal to take them")]
    UnhandledMoveSurplus { remaining: u32 },

    #[error("{0} has no snacks left")]
    SnackExhausted(CreatureName),

    #[error("game is already over")]
    GameOver,

    #[error("game did not finish within {turns} turns")]
    TurnLimitExceeded { turns: u32 },
}

impl GameError {
    /// Whether the error ends the game it was raised in.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, GameError::SnackExhausted(_))
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
