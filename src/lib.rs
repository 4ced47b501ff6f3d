//! # cat-chase
//!
//! A simulation engine for a dice-driven chase board game: one cat hunts
//! three animals along a linear track of fields.
//!
//! ## Rules in Brief
//!
//! 1. Each turn two dice are thrown. A green face moves an animal one field,
//!    a black face moves the cat one field.
//!
//! 2. Which animal runs is decided by a `Strategy`, on the positions from
//!    before anyone moves.
//!
//! 3. An animal that shares a field with the cat is chased; an animal that
//!    reaches the last field escapes. The cat can spend snacks to spare an
//!    animal close by.
//!
//! ## Architecture
//!
//! - **Deterministic**: All randomness flows through one `GameRng` per game,
//!   so a seed fully determines a game.
//!
//! - **Persistent History**: The per-turn records live in an `im::Vector`, so
//!   cloning a state mid-game is cheap.
//!
//! ## Modules
//!
//! - `core`: Creatures, configuration, dice, RNG, state and errors
//! - `strategy`: Animal selection policies and move allocation
//! - `rules`: RulesEngine trait, snacks and chase detection
//! - `games`: The chase game itself
//! - `simulation`: Batch runs and parameter sweeps

pub mod core;
pub mod games;
pub mod rules;
pub mod simulation;
pub mod strategy;

// Re-export commonly used types
pub use crate::core::{
    Creature, CreatureName, CreatureRecord, DiceColor, GameConfig, GameError, GameRng,
    GameState, MoveOutcome, MovesPool, Result, ShortcutMode, ShortcutTable,
    SnackRule, Status,
};

pub use crate::strategy::{allocate_animal_moves, AnimalPolicy, Strategy};

pub use crate::rules::{GameResult, RulesEngine, SnackOutcome, TurnReport};

pub use crate::games::chase::{ChaseGame, ChaseGameBuilder};

pub use crate::simulation::{
    run_game, run_games, run_sweep, GameRecord, SimulationConfig, SweepConfig, SweepStats,
};
