//! Game configuration.
//!
//! Everything a game reads besides its RNG lives here:
//! - `ShortcutTable`: where each creature's shortcut entrances are
//! - `SnackRule`: whether and how the cat may spend snacks
//! - `Strategy`: how animal moves are allocated
//! - `GameConfig`: board geometry plus all of the above
//!
//! The presets used by experiment sweeps are exposed as constructors rather
//! than globals so that every game gets its parameters injected.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::creature::CreatureName;
use super::error::{GameError, Result};
use crate::strategy::Strategy;

/// Number of board fields. Reaching this position finishes a creature.
pub const NUM_FIELDS: u32 = 50;

/// Field the animals start on. The cat starts at 0.
pub const ANIMALS_START: u32 = 6;

/// Extra fields granted by a shortcut.
pub const SHORTCUT_BONUS: u32 = 4;

/// Snack budgets explored by the default sweep.
pub const SNACK_BUDGETS: [u32; 5] = [0, 3, 4, 5, 6];

/// Shortcut entrance offsets (relative to the animals' start) for the
/// preset tables, in `CreatureName::ANIMALS` order.
const SHORTCUT_PRESETS: [[u32; 3]; 3] = [[5, 15, 25], [9, 19, 29], [13, 23, 33]];

/// How entrances crossed within a single move are counted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShortcutMode {
    /// Every entrance crossed adds a bonus.
    #[default]
    Compound,
    /// Only the first entrance crossed adds a bonus.
    FirstOnly,
}

/// Snack behaviour of the cat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnackRule {
    /// The cat never spends snacks.
    #[default]
    Disabled,
    /// Spend a snack on the first animal within two fields and spare it.
    CloseAtTwo,
    /// As `CloseAtTwo`, and the fed animal goes back to the start field.
    CloseAtTwoWithReset,
}

impl SnackRule {
    /// Maximum distance between cat and animal for a snack to be spent.
    pub const REACH: u32 = 2;

    #[must_use]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, SnackRule::Disabled)
    }

    #[must_use]
    pub const fn resets_position(self) -> bool {
        matches!(self, SnackRule::CloseAtTwoWithReset)
    }

    pub const ALL: [SnackRule; 3] = [
        SnackRule::Disabled,
        SnackRule::CloseAtTwo,
        SnackRule::CloseAtTwoWithReset,
    ];

    /// Tag used in sweep keys and on the command line.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            SnackRule::Disabled => "disabled",
            SnackRule::CloseAtTwo => "close_at_2",
            SnackRule::CloseAtTwoWithReset => "close_at_2_reset",
        }
    }
}

impl std::fmt::Display for SnackRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for SnackRule {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim().to_ascii_lowercase();
        SnackRule::ALL
            .into_iter()
            .find(|rule| rule.tag() == tag)
            .ok_or_else(|| GameError::InvalidConfig(format!("unknown snack rule '{s}'")))
    }
}

/// Shortcut entrances per creature.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutTable {
    /// Human-readable label used in sweep output.
    pub label: String,

    /// Entrances by creature. Creatures without an entry have none.
    pub entrances: FxHashMap<CreatureName, Vec<u32>>,
}

impl ShortcutTable {
    /// A board without shortcuts.
    #[must_use]
    pub fn none() -> Self {
        Self {
            label: "none".to_string(),
            entrances: FxHashMap::default(),
        }
    }

    /// One of the preset tables (0, 1 or 2), placed relative to
    /// `animal_start`. Returns `None` for an unknown index.
    #[must_use]
    pub fn preset(index: usize, animal_start: u32) -> Option<Self> {
        let offsets = SHORTCUT_PRESETS.get(index)?;
        let entrances = CreatureName::ANIMALS
            .iter()
            .zip(offsets)
            .map(|(&name, &offset)| (name, vec![animal_start + offset]))
            .collect();

        Some(Self {
            label: format!("table-{index}"),
            entrances,
        })
    }

    /// All preset tables for the standard start field.
    #[must_use]
    pub fn presets() -> Vec<Self> {
        (0..SHORTCUT_PRESETS.len())
            .filter_map(|i| Self::preset(i, ANIMALS_START))
            .collect()
    }

    /// Set the entrances of one creature.
    #[must_use]
    pub fn with_entrances(mut self, name: CreatureName, entrances: Vec<u32>) -> Self {
        self.entrances.insert(name, entrances);
        self
    }

    /// Entrances of a creature, empty when it has none.
    #[must_use]
    pub fn entrances_for(&self, name: CreatureName) -> &[u32] {
        self.entrances.get(&name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Complete configuration of one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board length; landing here finishes a creature.
    pub num_fields: u32,

    /// Start field of every animal.
    pub animal_start: u32,

    /// Fields added for each shortcut taken.
    pub shortcut_bonus: u32,

    pub shortcuts: ShortcutTable,

    pub shortcut_mode: ShortcutMode,

    /// Snacks the cat starts with.
    pub snack_budget: u32,

    pub snack_rule: SnackRule,

    pub strategy: Strategy,

    /// Turns after which a runner gives up on the game.
    pub max_turns: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_fields: NUM_FIELDS,
            animal_start: ANIMALS_START,
            shortcut_bonus: SHORTCUT_BONUS,
            shortcuts: ShortcutTable::none(),
            shortcut_mode: ShortcutMode::default(),
            snack_budget: 0,
            snack_rule: SnackRule::default(),
            strategy: Strategy::default(),
            max_turns: 10_000,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_num_fields(mut self, num_fields: u32) -> Self {
        assert!(num_fields > 1, "Board needs at least 2 fields");
        self.num_fields = num_fields;
        self
    }

    /// # Panics
    ///
    /// Panics if `start` is not before the finish field.
    #[must_use]
    pub fn with_animal_start(mut self, start: u32) -> Self {
        assert!(
            start < self.num_fields,
            "Animals must start before the finish field"
        );
        self.animal_start = start;
        self
    }

    #[must_use]
    pub fn with_shortcut_bonus(mut self, bonus: u32) -> Self {
        self.shortcut_bonus = bonus;
        self
    }

    #[must_use]
    pub fn with_shortcuts(mut self, shortcuts: ShortcutTable) -> Self {
        self.shortcuts = shortcuts;
        self
    }

    #[must_use]
    pub fn with_shortcut_mode(mut self, mode: ShortcutMode) -> Self {
        self.shortcut_mode = mode;
        self
    }

    /// Set the snack budget and the rule spending it.
    #[must_use]
    pub fn with_snacks(mut self, budget: u32, rule: SnackRule) -> Self {
        self.snack_budget = budget;
        self.snack_rule = rule;
        self
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Check the geometry a game is built on.
    ///
    /// The builders assert the same conditions; this catches configs that
    /// were deserialized or assembled field by field.
    pub fn validate(&self) -> Result<()> {
        if self.num_fields < 2 {
            return Err(GameError::InvalidConfig(format!(
                "board needs at least 2 fields, got {}",
                self.num_fields
            )));
        }
        if self.animal_start >= self.num_fields {
            return Err(GameError::InvalidConfig(format!(
                "animal start {} is not before the finish field {}",
                self.animal_start, self.num_fields
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.num_fields, 50);
        assert_eq!(config.animal_start, 6);
        assert_eq!(config.shortcut_bonus, 4);
        assert_eq!(config.snack_rule, SnackRule::Disabled);
        assert_eq!(config.strategy, Strategy::RandomSingle);
        assert!(config.shortcuts.entrances.is_empty());
    }

    #[test]
    fn test_presets() {
        let tables = ShortcutTable::presets();
        assert_eq!(tables.len(), 3);

        assert_eq!(tables[0].entrances_for(CreatureName::Mouse), &[11]);
        assert_eq!(tables[0].entrances_for(CreatureName::Squirrel), &[21]);
        assert_eq!(tables[0].entrances_for(CreatureName::Bird), &[31]);
        assert_eq!(tables[2].entrances_for(CreatureName::Bird), &[39]);
        assert!(tables[1].entrances_for(CreatureName::Cat).is_empty());
        assert_eq!(tables[1].label, "table-1");

        assert!(ShortcutTable::preset(3, ANIMALS_START).is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let table = ShortcutTable::none().with_entrances(CreatureName::Cat, vec![10, 20]);
        let config = GameConfig::default()
            .with_shortcuts(table)
            .with_snacks(3, SnackRule::CloseAtTwoWithReset)
            .with_strategy(Strategy::OnlyOneRunAway)
            .with_max_turns(200);

        assert_eq!(config.shortcuts.entrances_for(CreatureName::Cat), &[10, 20]);
        assert_eq!(config.snack_budget, 3);
        assert!(config.snack_rule.resets_position());
        assert_eq!(config.strategy, Strategy::OnlyOneRunAway);
        assert_eq!(config.max_turns, 200);
    }

    #[test]
    #[should_panic(expected = "at least 2 fields")]
    fn test_tiny_board_rejected() {
        let _ = GameConfig::default().with_num_fields(1);
    }

    #[test]
    #[should_panic(expected = "start before the finish")]
    fn test_animal_start_past_finish_rejected() {
        let _ = GameConfig::default().with_animal_start(60);
    }

    #[test]
    fn test_validate() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
        assert_eq!(GameConfig::default().with_animal_start(49).validate(), Ok(()));

        let mut config = GameConfig::default();
        config.animal_start = 50;
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_catches_deserialized_board() {
        let mut json = serde_json::to_value(GameConfig::default()).unwrap();
        json["num_fields"] = serde_json::json!(0);
        let config: GameConfig = serde_json::from_value(json).unwrap();

        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "invalid game config: board needs at least 2 fields, got 0");
    }

    #[test]
    fn test_snack_rule_tags() {
        for rule in SnackRule::ALL {
            assert_eq!(rule.tag().parse::<SnackRule>(), Ok(rule));
        }
        assert_eq!(" Close_At_2 ".parse::<SnackRule>(), Ok(SnackRule::CloseAtTwo));
        assert!(matches!(
            "always".parse::<SnackRule>(),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default()
            .with_shortcuts(ShortcutTable::preset(0, ANIMALS_START).unwrap())
            .with_snacks(4, SnackRule::CloseAtTwo);
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
