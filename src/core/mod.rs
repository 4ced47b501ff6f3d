//! Core game types: creatures, dice, configuration, state, RNG, errors.
//!
//! Nothing in here decides how a turn is played; `games::chase` composes
//! these pieces with the rules in `rules` and `strategy`.

pub mod config;
pub mod creature;
pub mod dice;
pub mod error;
pub mod record;
pub mod rng;
pub mod state;

pub use config::{
    GameConfig, ShortcutMode, ShortcutTable, SnackRule, ANIMALS_START, NUM_FIELDS, SHORTCUT_BONUS,
    SNACK_BUDGETS,
};
pub use creature::{Creature, CreatureName, MoveOutcome, Status};
pub use dice::{DiceColor, MovesPool};
pub use error::{GameError, Result};
pub use record::{render_board, CreatureRecord};
pub use rng::GameRng;
pub use state::GameState;
