//! Batch simulation and parameter sweeps.
//!
//! - `runner`: play independent games, optionally in parallel
//! - `sweep`: play every configuration in a grid and aggregate the results

pub mod runner;
pub mod sweep;

pub use runner::{run_game, run_games, GameRecord, GameRun, SimulationConfig};
pub use sweep::{run_sweep, run_sweep_with, Combination, SweepConfig, SweepStats};
