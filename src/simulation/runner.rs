//! Playing batches of independent games.
//!
//! Every game gets its own seed, derived from the batch seed and the game's
//! index, so a batch produces the same games whether it runs on one thread
//! or many.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{CreatureName, CreatureRecord, GameConfig, GameRng, Result};
use crate::games::chase::ChaseGameBuilder;
use crate::rules::{GameResult, RulesEngine};
use crate::strategy::Strategy;

/// Configuration for a batch of games.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of games to play.
    pub num_games: usize,

    /// Batch seed; game `i` plays with the `i`-th fork of it.
    pub seed: u64,

    /// Worker threads. 1 plays games on the calling thread.
    pub threads: usize,

    /// Configuration shared by every game in the batch.
    pub game: GameConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_games: 100,
            seed: 0,
            threads: 1,
            game: GameConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn new(game: GameConfig) -> Self {
        Self {
            game,
            ..Self::default()
        }
    }

    pub fn with_num_games(mut self, num_games: usize) -> Self {
        self.num_games = num_games;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// Seed of game `game_id` in this batch.
    #[must_use]
    pub fn game_seed(&self, game_id: u64) -> u64 {
        GameRng::new(self.seed).nth_fork_seed(game_id)
    }
}

/// A completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: u64,
    pub seed: u64,
    pub strategy: Strategy,
    /// Turns played.
    pub turns: u32,
    pub result: GameResult,
    pub snacks_spent: u32,
    /// Final state of every creature, cat first.
    pub final_creatures: Vec<CreatureRecord>,
    /// Every record of the game in epoch order.
    pub history: Vec<CreatureRecord>,
}

impl GameRecord {
    /// Final record of one creature.
    #[must_use]
    pub fn creature(&self, name: CreatureName) -> Option<&CreatureRecord> {
        self.final_creatures.iter().find(|r| r.name == name)
    }
}

/// One game of a batch, played or failed.
#[derive(Clone, Debug)]
pub struct GameRun {
    pub game_id: u64,
    pub seed: u64,
    pub outcome: Result<GameRecord>,
}

/// Play one game to the end.
pub fn run_game(config: &GameConfig, game_id: u64, seed: u64) -> Result<GameRecord> {
    let (game, mut state) = ChaseGameBuilder::from_config(config.clone())
        .game_id(game_id)
        .try_build(seed)?;

    let result = game.play_to_end(&mut state)?;
    let snacks_left = state.cat().snack_count().unwrap_or(0);
    debug!(game_id, turns = state.turn, ?result, "game over");

    let history: Vec<CreatureRecord> = state.history().iter().cloned().collect();
    let creature_count = state.creatures().len();
    let final_creatures = history[history.len() - creature_count..].to_vec();

    Ok(GameRecord {
        game_id,
        seed,
        strategy: config.strategy,
        turns: state.turn,
        result,
        snacks_spent: config.snack_budget.saturating_sub(snacks_left),
        final_creatures,
        history,
    })
}

fn run_indexed(config: &SimulationConfig, game_id: u64) -> GameRun {
    let seed = config.game_seed(game_id);
    let outcome = run_game(&config.game, game_id, seed);
    if let Err(err) = &outcome {
        warn!(game_id, seed, %err, "game aborted");
    }
    GameRun {
        game_id,
        seed,
        outcome,
    }
}

/// Play a batch of games, returned in game-id order.
///
/// With `threads > 1` games are played concurrently using rayon; the results
/// are identical to a sequential run.
pub fn run_games(config: &SimulationConfig) -> Vec<GameRun> {
    let ids = 0..config.num_games as u64;

    if config.threads <= 1 {
        return ids.map(|id| run_indexed(config, id)).collect();
    }

    match rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
    {
        Ok(pool) => pool.install(|| {
            ids.into_par_iter()
                .map(|id| run_indexed(config, id))
                .collect()
        }),
        Err(err) => {
            warn!(%err, "could not build thread pool, playing games sequentially");
            ids.map(|id| run_indexed(config, id)).collect()
        }
    }
}
