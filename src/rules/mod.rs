//! Turn rules shared by every chase game.
//!
//! - `engine`: the `RulesEngine` trait, turn reports and game results
//! - `snack`: the cat spending snacks on nearby animals
//! - `chase`: catching animals and ending the game
//!
//! Movement and shortcuts live on `core::Creature`; animal selection lives
//! in `strategy`.

pub mod chase;
pub mod engine;
pub mod snack;

pub use chase::detect_chases;
pub use engine::{GameResult, RulesEngine, TurnReport};
pub use snack::{apply_snack_rule, SnackOutcome};
