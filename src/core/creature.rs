//! Creatures on the board: the cat and the animals it chases.
//!
//! Cat and animals share one movement contract and differ only in their
//! capabilities: the cat carries a snack counter, animals do not, and the
//! number of shortcut entrances is free per creature. Instead of a type per
//! kind, `Creature` stores those capabilities as data.
//!
//! ## Movement
//!
//! ```
//! use cat_chase::core::{Creature, CreatureName, GameConfig, Status};
//!
//! let config = GameConfig::default();
//! let mut mouse = Creature::animal(CreatureName::Mouse, 6, &[11]);
//!
//! // Steps 6 -> 11 hit the entrance, the bonus adds 4 more fields
//! let outcome = mouse.advance(6, &config);
//! assert_eq!(outcome.position, 16);
//! assert_eq!(outcome.status, Status::InProgress);
//! assert!(mouse.shortcut_triggered()[0]);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::{GameConfig, ShortcutMode};
use super::error::{GameError, Result};

/// Identity of a creature. Also fixes iteration order on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CreatureName {
    Cat,
    Mouse,
    Squirrel,
    Bird,
}

impl CreatureName {
    /// All animals, in the fixed order used by every rule.
    pub const ANIMALS: [CreatureName; 3] =
        [CreatureName::Mouse, CreatureName::Squirrel, CreatureName::Bird];

    /// One-letter board symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            CreatureName::Cat => 'C',
            CreatureName::Mouse => 'M',
            CreatureName::Squirrel => 'S',
            CreatureName::Bird => 'B',
        }
    }

    #[must_use]
    pub const fn is_cat(self) -> bool {
        matches!(self, CreatureName::Cat)
    }
}

impl std::fmt::Display for CreatureName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CreatureName::Cat => "Cat",
            CreatureName::Mouse => "Mouse",
            CreatureName::Squirrel => "Squirrel",
            CreatureName::Bird => "Bird",
        };
        f.write_str(name)
    }
}

/// Progress of a creature through the game.
///
/// `Chased` and `Finished` are terminal. The cat only ever finishes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    InProgress,
    Chased,
    Finished,
}

impl Status {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Status::InProgress)
    }
}

/// Result of a single call to [`Creature::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Position after the move.
    pub position: u32,
    /// Status after the move.
    pub status: Status,
    /// Fields the move would have gone past `num_fields - 1`, 0 unless the
    /// creature overshot the finish.
    pub overshoot: u32,
    /// Number of shortcut bonuses applied.
    pub shortcuts_taken: u32,
}

impl MoveOutcome {
    #[must_use]
    pub fn overshot(&self) -> bool {
        self.overshoot > 0
    }
}

/// A creature on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    name: CreatureName,
    position: u32,
    status: Status,
    shortcut_entrances: SmallVec<[u32; 4]>,
    shortcut_triggered: SmallVec<[bool; 4]>,
    snacks: Option<u32>,
}

impl Creature {
    /// Create the cat at the start field.
    #[must_use]
    pub fn cat(snacks: u32, shortcut_entrances: &[u32]) -> Self {
        Self {
            name: CreatureName::Cat,
            position: 0,
            status: Status::InProgress,
            shortcut_entrances: SmallVec::from_slice(shortcut_entrances),
            shortcut_triggered: SmallVec::from_elem(false, shortcut_entrances.len()),
            snacks: Some(snacks),
        }
    }

    /// Create an animal.
    ///
    /// # Panics
    ///
    /// Panics if `name` is the cat.
    #[must_use]
    pub fn animal(name: CreatureName, position: u32, shortcut_entrances: &[u32]) -> Self {
        assert!(!name.is_cat(), "Use Creature::cat for the cat");
        Self {
            name,
            position,
            status: Status::InProgress,
            shortcut_entrances: SmallVec::from_slice(shortcut_entrances),
            shortcut_triggered: SmallVec::from_elem(false, shortcut_entrances.len()),
            snacks: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> CreatureName {
        self.name
    }

    #[must_use]
    pub fn position(&self) -> u32 {
        self.position
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn is_cat(&self) -> bool {
        self.name.is_cat()
    }

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.status == Status::InProgress
    }

    #[must_use]
    pub fn shortcut_entrances(&self) -> &[u32] {
        &self.shortcut_entrances
    }

    #[must_use]
    pub fn shortcut_triggered(&self) -> &[bool] {
        &self.shortcut_triggered
    }

    /// Snacks left. `None` for creatures that cannot carry snacks.
    #[must_use]
    pub fn snack_count(&self) -> Option<u32> {
        self.snacks
    }

    /// Spend one snack, returning how many are left.
    ///
    /// Fails with `SnackExhausted` when the counter is already zero and with
    /// `InvariantViolation` for a creature that has no snack counter.
    pub fn apply_snack(&mut self) -> Result<u32> {
        match self.snacks.as_mut() {
            Some(0) => Err(GameError::SnackExhausted(self.name)),
            Some(count) => {
                *count -= 1;
                Ok(*count)
            }
            None => Err(GameError::InvariantViolation(format!(
                "{} does not carry snacks",
                self.name
            ))),
        }
    }

    /// Number of moves actually travelled once shortcuts crossed on the way
    /// are spliced in. Records which entrances fired.
    fn apply_shortcuts(&mut self, num_moves: u32, config: &GameConfig) -> (u32, u32) {
        let mut hits = 0;

        'steps: for step in 1..=num_moves {
            let landing = self.position + step;
            for (idx, &entrance) in self.shortcut_entrances.iter().enumerate() {
                if landing != entrance {
                    continue;
                }
                self.shortcut_triggered[idx] = true;
                hits += 1;
                if config.shortcut_mode == ShortcutMode::FirstOnly {
                    break 'steps;
                }
            }
        }

        (num_moves + hits * config.shortcut_bonus, hits)
    }

    /// Move forward by `num_moves` fields.
    ///
    /// Landing exactly on `num_fields` finishes the creature. Going past it
    /// clamps the position to `num_fields - 1`, finishes the creature and
    /// reports the excess as overshoot. Terminal creatures do not move.
    pub fn advance(&mut self, num_moves: u32, config: &GameConfig) -> MoveOutcome {
        if self.status.is_terminal() || num_moves == 0 {
            return self.outcome(0, 0);
        }

        let (num_moves, shortcuts_taken) = if self.shortcut_entrances.is_empty() {
            (num_moves, 0)
        } else {
            self.apply_shortcuts(num_moves, config)
        };

        let finish = config.num_fields;
        let requested = self.position + num_moves;
        let mut overshoot = 0;

        if requested < finish {
            self.position = requested;
        } else if requested == finish {
            self.position = requested;
            self.status = Status::Finished;
        } else {
            self.position = finish - 1;
            self.status = Status::Finished;
            overshoot = requested - self.position;
        }

        self.outcome(overshoot, shortcuts_taken)
    }

    fn outcome(&self, overshoot: u32, shortcuts_taken: u32) -> MoveOutcome {
        MoveOutcome {
            position: self.position,
            status: self.status,
            overshoot,
            shortcuts_taken,
        }
    }

    /// Mark an animal as caught. Terminal creatures and the cat are unaffected.
    ///
    /// Returns whether the status changed.
    pub fn mark_chased(&mut self) -> bool {
        if self.is_cat() || self.status.is_terminal() {
            return false;
        }
        self.status = Status::Chased;
        true
    }

    /// Finish the cat after it has caught everyone.
    pub(crate) fn mark_finished(&mut self) {
        self.status = Status::Finished;
    }

    /// Send an in-progress creature back to `position`.
    pub(crate) fn reset_to(&mut self, position: u32) {
        if self.is_in_progress() {
            self.position = position;
        }
    }

    pub(crate) fn place(&mut self, position: u32) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn test_symbols_and_names() {
        assert_eq!(CreatureName::Cat.symbol(), 'C');
        assert_eq!(CreatureName::Squirrel.symbol(), 'S');
        assert_eq!(format!("{}", CreatureName::Bird), "Bird");
        assert!(CreatureName::ANIMALS.iter().all(|a| !a.is_cat()));
    }

    #[test]
    fn test_plain_move() {
        let mut mouse = Creature::animal(CreatureName::Mouse, 6, &[]);
        let outcome = mouse.advance(2, &config());

        assert_eq!(outcome.position, 8);
        assert_eq!(outcome.status, Status::InProgress);
        assert!(!outcome.overshot());
    }

    #[test]
    fn test_exact_finish_consumes_full_move() {
        let mut bird = Creature::animal(CreatureName::Bird, 48, &[]);
        let outcome = bird.advance(2, &config());

        assert_eq!(outcome.position, 50);
        assert_eq!(outcome.status, Status::Finished);
        assert_eq!(outcome.overshoot, 0);
    }

    #[test]
    fn test_overshoot_clamps_and_finishes() {
        let mut cat = Creature::cat(0, &[]);
        cat.place(49);
        let outcome = cat.advance(2, &config());

        assert_eq!(outcome.position, 49);
        assert_eq!(outcome.status, Status::Finished);
        // requested 51, clamped to 49
        assert_eq!(outcome.overshoot, 2);
    }

    #[test]
    fn test_shortcut_splices_bonus() {
        let mut mouse = Creature::animal(CreatureName::Mouse, 6, &[11]);
        let outcome = mouse.advance(6, &config());

        assert_eq!(outcome.position, 16);
        assert_eq!(outcome.shortcuts_taken, 1);
        assert_eq!(mouse.shortcut_triggered(), &[true]);
    }

    #[test]
    fn test_shortcut_not_reached() {
        let mut mouse = Creature::animal(CreatureName::Mouse, 6, &[11]);
        mouse.advance(2, &config());

        assert_eq!(mouse.position(), 8);
        assert_eq!(mouse.shortcut_triggered(), &[false]);
    }

    #[test]
    fn test_standing_on_entrance_does_not_trigger() {
        let mut mouse = Creature::animal(CreatureName::Mouse, 11, &[11]);
        mouse.advance(1, &config());

        assert_eq!(mouse.position(), 12);
        assert_eq!(mouse.shortcut_triggered(), &[false]);
    }

    #[test]
    fn test_multiple_entrances_compound() {
        let mut cat = Creature::cat(0, &[1, 2]);
        let outcome = cat.advance(2, &config());

        assert_eq!(outcome.shortcuts_taken, 2);
        assert_eq!(outcome.position, 2 + 2 * 4);
        assert_eq!(cat.shortcut_triggered(), &[true, true]);
    }

    #[test]
    fn test_multiple_entrances_first_only() {
        let config = GameConfig::default().with_shortcut_mode(ShortcutMode::FirstOnly);
        let mut cat = Creature::cat(0, &[1, 2]);
        let outcome = cat.advance(2, &config);

        assert_eq!(outcome.shortcuts_taken, 1);
        assert_eq!(outcome.position, 2 + 4);
        assert_eq!(cat.shortcut_triggered(), &[true, false]);
    }

    #[test]
    fn test_terminal_creature_is_frozen() {
        let mut bird = Creature::animal(CreatureName::Bird, 20, &[]);
        assert!(bird.mark_chased());
        assert!(!bird.mark_chased());

        let outcome = bird.advance(2, &config());
        assert_eq!(outcome.position, 20);
        assert_eq!(outcome.status, Status::Chased);

        bird.reset_to(6);
        assert_eq!(bird.position(), 20);
    }

    #[test]
    fn test_cat_cannot_be_chased() {
        let mut cat = Creature::cat(0, &[]);
        assert!(!cat.mark_chased());
        assert_eq!(cat.status(), Status::InProgress);
    }

    #[test]
    fn test_snacks() {
        let mut cat = Creature::cat(2, &[]);
        assert_eq!(cat.apply_snack(), Ok(1));
        assert_eq!(cat.apply_snack(), Ok(0));
        assert_eq!(
            cat.apply_snack(),
            Err(GameError::SnackExhausted(CreatureName::Cat))
        );
        assert_eq!(cat.snack_count(), Some(0));

        let mut mouse = Creature::animal(CreatureName::Mouse, 6, &[]);
        assert!(matches!(
            mouse.apply_snack(),
            Err(GameError::InvariantViolation(_))
        ));
        assert_eq!(mouse.snack_count(), None);
    }

    #[test]
    #[should_panic(expected = "Use Creature::cat")]
    fn test_animal_constructor_rejects_cat() {
        let _ = Creature::animal(CreatureName::Cat, 0, &[]);
    }
}
