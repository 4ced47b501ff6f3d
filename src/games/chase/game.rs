//! Chase game implementation.

use tracing::{debug, trace};

use crate::core::{
    DiceColor, GameConfig, GameError, GameState, MovesPool, Result, ShortcutMode, ShortcutTable,
    SnackRule,
};
use crate::rules::{apply_snack_rule, detect_chases, RulesEngine, TurnReport};
use crate::strategy::{allocate_animal_moves, Snapshot, Strategy};

/// The chase game: a `GameConfig` plus the turn rules.
#[derive(Clone, Debug)]
pub struct ChaseGame {
    config: GameConfig,
}

/// Builder for creating a ChaseGame and its starting state.
#[derive(Clone, Debug, Default)]
pub struct ChaseGameBuilder {
    config: GameConfig,
    game_id: u64,
}

impl ChaseGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: GameConfig) -> Self {
        Self { config, game_id: 0 }
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    pub fn shortcuts(mut self, shortcuts: ShortcutTable) -> Self {
        self.config.shortcuts = shortcuts;
        self
    }

    pub fn shortcut_mode(mut self, mode: ShortcutMode) -> Self {
        self.config.shortcut_mode = mode;
        self
    }

    pub fn snacks(mut self, budget: u32, rule: SnackRule) -> Self {
        self.config.snack_budget = budget;
        self.config.snack_rule = rule;
        self
    }

    /// # Panics
    ///
    /// Panics if `start` is not before the finish field.
    pub fn animal_start(mut self, start: u32) -> Self {
        self.config = self.config.with_animal_start(start);
        self
    }

    pub fn max_turns(mut self, max_turns: u32) -> Self {
        self.config.max_turns = max_turns;
        self
    }

    pub fn game_id(mut self, game_id: u64) -> Self {
        self.game_id = game_id;
        self
    }

    /// Build the game and initial state.
    ///
    /// # Panics
    ///
    /// Panics if the config fails [`GameConfig::validate`]. Use
    /// [`try_build`](Self::try_build) for configs that did not come through
    /// the builder methods.
    pub fn build(self, seed: u64) -> (ChaseGame, GameState) {
        match self.try_build(seed) {
            Ok(built) => built,
            Err(err) => panic!("{err}"),
        }
    }

    /// Build the game and initial state, rejecting an invalid config.
    pub fn try_build(self, seed: u64) -> Result<(ChaseGame, GameState)> {
        self.config.validate()?;
        let state = GameState::new(&self.config, self.game_id, seed);
        Ok((ChaseGame::new(self.config), state))
    }
}

impl ChaseGame {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }
}

impl RulesEngine for ChaseGame {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn resolve_turn(&self, state: &mut GameState, dice: [DiceColor; 2]) -> Result<TurnReport> {
        if state.is_finished() {
            return Err(GameError::GameOver);
        }
        // `ChaseGame::new` takes any config; don't move on a broken board.
        self.config.validate()?;

        let config = &self.config;
        let pool = MovesPool::from_dice(dice);

        // Animals are chosen on the positions from before anyone moves.
        let snapshot = Snapshot::capture(state, config);
        let allocation = allocate_animal_moves(config.strategy, &snapshot, pool, &mut state.rng)?;

        // A cat running past the finish just uses fewer moves.
        let cat = state.cat_mut().advance(pool.cat_moves, config);
        if cat.overshot() {
            trace!(game_id = state.game_id, overshoot = cat.overshoot, "cat ran past the finish");
        }

        let mut animals = Vec::new();
        for (name, moves) in allocation.movers() {
            let creature = state.creature_mut(name).ok_or_else(|| {
                GameError::InvariantViolation(format!("{name} was granted moves but is not in the game"))
            })?;
            let outcome = creature.advance(moves, config);
            if outcome.overshot() {
                // Allocation already capped the move at the finish; only a
                // shortcut can carry an animal further.
                debug!(
                    game_id = state.game_id,
                    %name,
                    overshoot = outcome.overshoot,
                    "animal finished past the line via shortcut"
                );
            }
            animals.push((name, moves, outcome));
        }

        let snack = apply_snack_rule(state, config.snack_rule, config.animal_start)?;
        let chased = detect_chases(state, snack.spared());

        state.turn += 1;
        state.record_snapshot();

        debug!(
            game_id = state.game_id,
            epoch = state.epoch(),
            ?dice,
            ?chased,
            board = ?state.render_board(),
            "turn resolved"
        );

        Ok(TurnReport {
            epoch: state.epoch(),
            dice,
            pool,
            cat,
            animals,
            snack,
            chased: chased.into_vec(),
        })
    }
}
