//! Dice and the per-turn moves pool.
//!
//! Each turn two two-coloured dice are thrown. Every green face gives the
//! animals one move, every black face gives the cat one move, so the pool
//! always holds exactly two moves.

use serde::{Deserialize, Serialize};

use super::rng::GameRng;

/// Face of a chase die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiceColor {
    /// Favourable to the animals.
    Green,
    /// Favourable to the cat.
    Black,
}

impl DiceColor {
    /// Throw one die.
    pub fn roll(rng: &mut GameRng) -> Self {
        if rng.gen_bool(0.5) {
            DiceColor::Green
        } else {
            DiceColor::Black
        }
    }

    /// Throw the turn's pair of dice.
    pub fn roll_pair(rng: &mut GameRng) -> [DiceColor; 2] {
        [Self::roll(rng), Self::roll(rng)]
    }
}

/// Moves available to the cat and to the animals this turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MovesPool {
    pub cat_moves: u32,
    pub animal_moves: u32,
}

impl MovesPool {
    /// Resolve a pair of dice into a pool.
    ///
    /// ```
    /// use cat_chase::core::{DiceColor, MovesPool};
    ///
    /// let pool = MovesPool::from_dice([DiceColor::Green, DiceColor::Black]);
    /// assert_eq!((pool.cat_moves, pool.animal_moves), (1, 1));
    /// ```
    #[must_use]
    pub fn from_dice(dice: [DiceColor; 2]) -> Self {
        dice.iter().fold(Self::default(), |mut pool, die| {
            match die {
                DiceColor::Green => pool.animal_moves += 1,
                DiceColor::Black => pool.cat_moves += 1,
            }
            pool
        })
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.cat_moves + self.animal_moves
    }
}
