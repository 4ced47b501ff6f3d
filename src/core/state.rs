//! Game state: the creatures on the board and the game's history.
//!
//! `GameState` is created once per game, mutated in place by every turn and
//! discarded when the game is over. It owns:
//! - The creatures (cat first, then animals in `CreatureName::ANIMALS` order)
//! - The game's own deterministic RNG
//! - The append-only history of creature records
//!
//! History uses `im::Vector`, so cloning it is O(1).

use im::Vector;

use super::config::GameConfig;
use super::creature::{Creature, CreatureName, Status};
use super::error::{GameError, Result};
use super::record::{now_millis, render_board, CreatureRecord};
use super::rng::GameRng;
use crate::strategy::Strategy;

#[derive(Clone, Debug)]
pub struct GameState {
    creatures: Vec<Creature>,

    /// Number of turns played so far.
    pub turn: u32,

    /// Identifier copied into every record.
    pub game_id: u64,

    /// Deterministic RNG for dice and strategy choices.
    pub rng: GameRng,

    num_fields: u32,
    strategy: Strategy,
    history: Vector<CreatureRecord>,
}

impl GameState {
    /// Create the starting position for `config` and record the initial
    /// snapshot (epoch `-1`).
    #[must_use]
    pub fn new(config: &GameConfig, game_id: u64, seed: u64) -> Self {
        let cat = Creature::cat(
            config.snack_budget,
            config.shortcuts.entrances_for(CreatureName::Cat),
        );
        let animals = CreatureName::ANIMALS.iter().map(|&name| {
            Creature::animal(name, config.animal_start, config.shortcuts.entrances_for(name))
        });

        let mut state = Self {
            creatures: std::iter::once(cat).chain(animals).collect(),
            turn: 0,
            game_id,
            rng: GameRng::new(seed),
            num_fields: config.num_fields,
            strategy: config.strategy,
            history: Vector::new(),
        };
        state.record_snapshot();
        state
    }

    #[must_use]
    pub fn num_fields(&self) -> u32 {
        self.num_fields
    }

    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// All creatures, cat first.
    #[must_use]
    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    #[must_use]
    pub fn cat(&self) -> &Creature {
        &self.creatures[0]
    }

    pub(crate) fn cat_mut(&mut self) -> &mut Creature {
        &mut self.creatures[0]
    }

    /// Animals in fixed order.
    pub fn animals(&self) -> impl Iterator<Item = &Creature> {
        self.creatures[1..].iter()
    }

    pub(crate) fn animals_mut(&mut self) -> impl Iterator<Item = &mut Creature> {
        self.creatures[1..].iter_mut()
    }

    /// Animals that are neither caught nor finished.
    pub fn animals_in_game(&self) -> impl Iterator<Item = &Creature> {
        self.animals().filter(|a| a.is_in_progress())
    }

    #[must_use]
    pub fn creature(&self, name: CreatureName) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.name() == name)
    }

    pub(crate) fn creature_mut(&mut self, name: CreatureName) -> Option<&mut Creature> {
        self.creatures.iter_mut().find(|c| c.name() == name)
    }

    /// Put a creature on a field, e.g. to set up a scenario.
    ///
    /// Fails if the field is off the board or the creature does not exist.
    pub fn place(&mut self, name: CreatureName, position: u32) -> Result<()> {
        if position > self.num_fields {
            return Err(GameError::InvariantViolation(format!(
                "position {position} is beyond the board ({} fields)",
                self.num_fields
            )));
        }
        let creature = self
            .creature_mut(name)
            .ok_or_else(|| GameError::InvariantViolation(format!("{name} is not in this game")))?;
        creature.place(position);
        Ok(())
    }

    /// True once every animal is caught or finished, every animal finished,
    /// or the cat finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        let animals_terminal = self.animals().all(|a| a.status().is_terminal());
        let animals_finished = self.animals().all(|a| a.status() == Status::Finished);
        let cat_finished = self.cat().status() == Status::Finished;

        animals_terminal || animals_finished || cat_finished
    }

    /// Epoch of the most recent snapshot.
    #[must_use]
    pub fn epoch(&self) -> i64 {
        i64::from(self.turn) - 1
    }

    /// Append one record per creature for the current epoch.
    pub(crate) fn record_snapshot(&mut self) {
        let epoch = self.epoch();
        let timestamp = now_millis();
        for creature in &self.creatures {
            self.history.push_back(CreatureRecord::capture(
                creature,
                epoch,
                self.game_id,
                self.strategy,
                timestamp,
            ));
        }
    }

    /// Records in epoch order, creatures in board order within an epoch.
    #[must_use]
    pub fn history(&self) -> &Vector<CreatureRecord> {
        &self.history
    }

    /// Board render of the current positions.
    #[must_use]
    pub fn render_board(&self) -> Vec<String> {
        render_board(&self.creatures, self.num_fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{ShortcutTable, SnackRule, ANIMALS_START};

    #[test]
    fn test_game_state_new() {
        let config = GameConfig::default();
        let state = GameState::new(&config, 3, 42);

        assert_eq!(state.creatures().len(), 4);
        assert!(state.cat().is_cat());
        assert_eq!(state.cat().position(), 0);
        for animal in state.animals() {
            assert_eq!(animal.position(), 6);
            assert_eq!(animal.status(), Status::InProgress);
        }
        assert_eq!(state.turn, 0);
        assert!(!state.is_finished());
    }

    #[test]
    fn test_initial_snapshot() {
        let config = GameConfig::default().with_snacks(4, SnackRule::CloseAtTwo);
        let state = GameState::new(&config, 9, 42);

        assert_eq!(state.history().len(), 4);
        assert!(state.history().iter().all(|r| r.epoch == -1 && r.game_id == 9));
        assert_eq!(state.history()[0].snack_count, Some(4));
        assert_eq!(state.history()[1].name, CreatureName::Mouse);
    }

    #[test]
    fn test_shortcuts_from_table() {
        let table = ShortcutTable::preset(1, ANIMALS_START).unwrap();
        let config = GameConfig::default().with_shortcuts(table);
        let state = GameState::new(&config, 0, 1);

        assert_eq!(state.creature(CreatureName::Mouse).unwrap().shortcut_entrances(), &[15]);
        assert_eq!(state.creature(CreatureName::Bird).unwrap().shortcut_entrances(), &[35]);
        assert!(state.cat().shortcut_entrances().is_empty());
    }

    #[test]
    fn test_place() {
        let mut state = GameState::new(&GameConfig::default(), 0, 1);
        state.place(CreatureName::Bird, 30).unwrap();
        assert_eq!(state.creature(CreatureName::Bird).unwrap().position(), 30);

        assert!(matches!(
            state.place(CreatureName::Bird, 51),
            Err(GameError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_finished_predicate() {
        let mut state = GameState::new(&GameConfig::default(), 0, 1);

        // One animal caught, others running: still going
        state.creature_mut(CreatureName::Mouse).unwrap().mark_chased();
        assert!(!state.is_finished());

        // Everyone terminal
        state.creature_mut(CreatureName::Squirrel).unwrap().mark_chased();
        state.creature_mut(CreatureName::Bird).unwrap().advance(50, &GameConfig::default());
        assert!(state.is_finished());
    }

    #[test]
    fn test_cat_finishing_ends_game() {
        let mut state = GameState::new(&GameConfig::default(), 0, 1);
        state.cat_mut().advance(50, &GameConfig::default());
        assert!(state.is_finished());
    }
}
