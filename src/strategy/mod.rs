//! Animal-selection strategies.
//!
//! Each turn the animals' share of the moves pool goes to one animal (two on
//! overflow). Which one is decided by an `AnimalPolicy`, picked through the
//! `Strategy` tag stored in the game config.
//!
//! Policies see an immutable [`Snapshot`] of the board and return a choice;
//! they never mutate creatures. Overflow handling is shared by all policies
//! and lives in [`allocate_animal_moves`].
//!
//! ## Usage
//!
//! ```
//! use cat_chase::core::{GameConfig, GameRng, GameState, MovesPool};
//! use cat_chase::strategy::{allocate_animal_moves, Snapshot, Strategy};
//!
//! let config = GameConfig::default().with_strategy(Strategy::ClosestRunAway);
//! let mut state = GameState::new(&config, 0, 42);
//! let snapshot = Snapshot::capture(&state, &config);
//! let pool = MovesPool { cat_moves: 0, animal_moves: 2 };
//!
//! let moves = allocate_animal_moves(config.strategy, &snapshot, pool, &mut state.rng).unwrap();
//! assert_eq!(moves.total(), 2);
//! ```

mod policy;

pub use policy::{AnimalPolicy, ClosestRunAway, OnlyOneRunAway, RandomSingle};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{CreatureName, GameConfig, GameError, GameRng, GameState, MovesPool, Result};

/// Strategy tag selecting an [`AnimalPolicy`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// A uniformly random animal runs.
    #[default]
    RandomSingle,
    /// The animal closest ahead of the cat runs.
    ClosestRunAway,
    /// One animal runs for the whole game, the rest stay at the start.
    OnlyOneRunAway,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::RandomSingle,
        Strategy::ClosestRunAway,
        Strategy::OnlyOneRunAway,
    ];

    /// Tag used on the command line and in sweep output.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Strategy::RandomSingle => "random_single",
            Strategy::ClosestRunAway => "closest_run_away",
            Strategy::OnlyOneRunAway => "only_one_run_away",
        }
    }

    #[must_use]
    pub fn policy(self) -> &'static dyn AnimalPolicy {
        match self {
            Strategy::RandomSingle => &RandomSingle,
            Strategy::ClosestRunAway => &ClosestRunAway,
            Strategy::OnlyOneRunAway => &OnlyOneRunAway,
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for Strategy {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim().to_ascii_lowercase();
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.tag() == tag)
            .ok_or_else(|| GameError::UnsupportedStrategy(s.to_string()))
    }
}

/// An animal still in the game, as seen by a policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub name: CreatureName,
    pub position: u32,
}

/// What a policy may look at when choosing.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub cat_position: u32,
    pub animal_start: u32,
    pub num_fields: u32,
    /// In-progress animals in board order.
    pub candidates: SmallVec<[Candidate; 3]>,
}

impl Snapshot {
    #[must_use]
    pub fn capture(state: &GameState, config: &GameConfig) -> Self {
        Self {
            cat_position: state.cat().position(),
            animal_start: config.animal_start,
            num_fields: state.num_fields(),
            candidates: state
                .animals_in_game()
                .map(|a| Candidate {
                    name: a.name(),
                    position: a.position(),
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn position_of(&self, name: CreatureName) -> Option<u32> {
        self.candidates
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.position)
    }
}

/// Moves granted to each animal this turn. Animals not granted anything
/// have 0 moves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnimalMoves {
    moves: FxHashMap<CreatureName, u32>,
}

impl AnimalMoves {
    pub fn grant(&mut self, name: CreatureName, moves: u32) {
        *self.moves.entry(name).or_insert(0) += moves;
    }

    #[must_use]
    pub fn get(&self, name: CreatureName) -> u32 {
        self.moves.get(&name).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.moves.values().sum()
    }

    /// Animals with at least one move, in board order.
    pub fn movers(&self) -> impl Iterator<Item = (CreatureName, u32)> + '_ {
        CreatureName::ANIMALS
            .into_iter()
            .map(|name| (name, self.get(name)))
            .filter(|&(_, moves)| moves > 0)
    }
}

/// Split the animals' share of `pool` between the animals.
///
/// The policy picks one animal to take every animal move. If that would
/// carry it past the finish, it gets a single move and another in-progress
/// animal, drawn at random, gets one as well. A surplus left after that is
/// an `UnhandledMoveSurplus` error.
pub fn allocate_animal_moves(
    strategy: Strategy,
    snapshot: &Snapshot,
    pool: MovesPool,
    rng: &mut GameRng,
) -> Result<AnimalMoves> {
    let mut moves = AnimalMoves::default();
    if pool.animal_moves == 0 || snapshot.candidates.is_empty() {
        return Ok(moves);
    }

    let chosen = strategy.policy().choose(snapshot, rng)?;
    let position = snapshot.position_of(chosen).ok_or_else(|| {
        GameError::InvariantViolation(format!("{strategy} chose {chosen}, which is not in the game"))
    })?;
    trace!(%strategy, %chosen, position, "animal selected");

    if position + pool.animal_moves <= snapshot.num_fields {
        moves.grant(chosen, pool.animal_moves);
        return Ok(moves);
    }

    moves.grant(chosen, 1);
    let mut remaining = pool.animal_moves - 1;

    let others: SmallVec<[Candidate; 3]> = snapshot
        .candidates
        .iter()
        .filter(|c| c.name != chosen)
        .copied()
        .collect();
    if remaining > 0 {
        if let Some(other) = rng.choose(&others) {
            trace!(%chosen, redraw = %other.name, "overflow, move handed to another animal");
            moves.grant(other.name, 1);
            remaining -= 1;
            if remaining > 0 {
                return Err(GameError::UnhandledMoveSurplus { remaining });
            }
        }
    }

    Ok(moves)
}
