//! Rules engine trait and the results of turns and games.
//!
//! A game implements `RulesEngine` to define:
//! - How one pair of dice turns into movement, snacks and chases
//! - When the game is over and how it ended
//!
//! Runners only talk to games through this trait.

use serde::{Deserialize, Serialize};

use crate::core::{
    CreatureName, DiceColor, GameConfig, GameError, GameState, MoveOutcome, MovesPool, Result,
    Status,
};

use super::snack::SnackOutcome;

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Every animal was chased.
    CatWins,
    /// Every animal reached the finish.
    AnimalsEscape,
    /// Some animals were chased and some finished, or the cat crossed the
    /// finish line with animals still running.
    Split { chased: u32, finished: u32 },
}

impl GameResult {
    /// Classify `state`. `None` while the game is still running.
    #[must_use]
    pub fn from_state(state: &GameState) -> Option<Self> {
        if !state.is_finished() {
            return None;
        }

        let count = |status: Status| state.animals().filter(|a| a.status() == status).count() as u32;
        let animals = state.animals().count() as u32;
        let chased = count(Status::Chased);
        let finished = count(Status::Finished);

        Some(if chased == animals {
            GameResult::CatWins
        } else if finished == animals {
            GameResult::AnimalsEscape
        } else {
            GameResult::Split { chased, finished }
        })
    }
}

/// Everything that happened in one turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Turn index (the epoch of the records written for it).
    pub epoch: i64,
    pub dice: [DiceColor; 2],
    pub pool: MovesPool,
    pub cat: MoveOutcome,
    /// Animals that moved, with the moves granted and the result.
    pub animals: Vec<(CreatureName, u32, MoveOutcome)>,
    pub snack: SnackOutcome,
    /// Animals caught this turn.
    pub chased: Vec<CreatureName>,
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `resolve_turn`: deterministic given the state (including its RNG) and
///   the dice; fails with `GameOver` on a finished game
/// - `is_terminal`: `None` while the game continues
pub trait RulesEngine {
    fn config(&self) -> &GameConfig;

    /// Play one turn with the given dice.
    fn resolve_turn(&self, state: &mut GameState, dice: [DiceColor; 2]) -> Result<TurnReport>;

    /// Check if the game is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        GameResult::from_state(state)
    }

    // === Convenience Methods ===

    /// Throw the dice from the state's RNG and play one turn.
    fn play_turn(&self, state: &mut GameState) -> Result<TurnReport> {
        if state.is_finished() {
            return Err(GameError::GameOver);
        }
        let dice = DiceColor::roll_pair(&mut state.rng);
        self.resolve_turn(state, dice)
    }

    /// Play until the game is over or `max_turns` turns have been played.
    fn play_to_end(&self, state: &mut GameState) -> Result<GameResult> {
        let max_turns = self.config().max_turns;
        loop {
            if let Some(result) = self.is_terminal(state) {
                return Ok(result);
            }
            if state.turn >= max_turns {
                return Err(GameError::TurnLimitExceeded { turns: state.turn });
            }
            self.play_turn(state)?;
        }
    }
}
