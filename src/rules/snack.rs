//! Snack rule: the cat may spend a snack to spare an animal within reach.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{CreatureName, GameError, GameState, Result, SnackRule};

/// What the snack rule did this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnackOutcome {
    /// Snacks are switched off for this game.
    Disabled,
    /// No running animal within reach of the cat.
    NobodyInReach,
    /// The cat fed `animal`. `reset_to` is set when the animal was sent back.
    Fed {
        animal: CreatureName,
        snacks_left: u32,
        reset_to: Option<u32>,
    },
    /// An animal was in reach but the cat had no snacks left.
    Exhausted { animal: CreatureName },
}

impl SnackOutcome {
    /// The animal spared from being chased this turn.
    #[must_use]
    pub fn spared(&self) -> Option<CreatureName> {
        match self {
            SnackOutcome::Fed { animal, .. } => Some(*animal),
            _ => None,
        }
    }
}

/// Apply `rule` after movement and before chase detection.
///
/// The first running animal (in board order) within `SnackRule::REACH`
/// fields of the cat, in either direction, gets the snack. At most one snack
/// is spent per turn.
pub fn apply_snack_rule(
    state: &mut GameState,
    rule: SnackRule,
    animal_start: u32,
) -> Result<SnackOutcome> {
    if !rule.is_enabled() {
        return Ok(SnackOutcome::Disabled);
    }

    let cat_position = state.cat().position();
    let Some(animal) = state
        .animals_in_game()
        .find(|a| a.position().abs_diff(cat_position) <= SnackRule::REACH)
        .map(|a| a.name())
    else {
        return Ok(SnackOutcome::NobodyInReach);
    };

    let snacks_left = match state.cat_mut().apply_snack() {
        Ok(left) => left,
        Err(GameError::SnackExhausted(_)) => {
            debug!(game_id = state.game_id, %animal, "cat is out of snacks");
            return Ok(SnackOutcome::Exhausted { animal });
        }
        Err(err) => return Err(err),
    };

    let reset_to = if rule.resets_position() {
        if let Some(creature) = state.creature_mut(animal) {
            creature.reset_to(animal_start);
        }
        Some(animal_start)
    } else {
        None
    };

    debug!(game_id = state.game_id, %animal, snacks_left, ?reset_to, "snack spent");
    Ok(SnackOutcome::Fed {
        animal,
        snacks_left,
        reset_to,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;

    fn state_with(snacks: u32, cat: u32, animals: &[(CreatureName, u32)]) -> GameState {
        let config = GameConfig::default().with_snacks(snacks, SnackRule::CloseAtTwo);
        let mut state = GameState::new(&config, 0, 1);
        state.place(CreatureName::Cat, cat).unwrap();
        for &(name, position) in animals {
            state.place(name, position).unwrap();
        }
        state
    }

    #[test]
    fn test_disabled_rule_does_nothing() {
        let mut state = state_with(3, 6, &[]);
        let outcome = apply_snack_rule(&mut state, SnackRule::Disabled, 6).unwrap();

        assert_eq!(outcome, SnackOutcome::Disabled);
        assert_eq!(state.cat().snack_count(), Some(3));
    }

    #[test]
    fn test_nobody_in_reach() {
        let mut state = state_with(3, 0, &[]);
        let outcome = apply_snack_rule(&mut state, SnackRule::CloseAtTwo, 6).unwrap();

        assert_eq!(outcome, SnackOutcome::NobodyInReach);
        assert_eq!(state.cat().snack_count(), Some(3));
    }

    #[test]
    fn test_first_animal_in_reach_is_fed() {
        // Every animal is within reach; the mouse comes first.
        let mut state = state_with(3, 5, &[]);
        let outcome = apply_snack_rule(&mut state, SnackRule::CloseAtTwo, 6).unwrap();

        assert_eq!(
            outcome,
            SnackOutcome::Fed {
                animal: CreatureName::Mouse,
                snacks_left: 2,
                reset_to: None,
            }
        );
        assert_eq!(outcome.spared(), Some(CreatureName::Mouse));
        assert_eq!(state.cat().snack_count(), Some(2));
    }

    #[test]
    fn test_animal_behind_cat_counts() {
        let mut state = state_with(
            1,
            20,
            &[
                (CreatureName::Mouse, 30),
                (CreatureName::Squirrel, 18),
                (CreatureName::Bird, 40),
            ],
        );
        let outcome = apply_snack_rule(&mut state, SnackRule::CloseAtTwo, 6).unwrap();
        assert_eq!(outcome.spared(), Some(CreatureName::Squirrel));
    }

    #[test]
    fn test_reset_sends_animal_back() {
        let mut state = state_with(
            2,
            20,
            &[
                (CreatureName::Mouse, 21),
                (CreatureName::Squirrel, 30),
                (CreatureName::Bird, 40),
            ],
        );
        let outcome = apply_snack_rule(&mut state, SnackRule::CloseAtTwoWithReset, 6).unwrap();

        assert_eq!(
            outcome,
            SnackOutcome::Fed {
                animal: CreatureName::Mouse,
                snacks_left: 1,
                reset_to: Some(6),
            }
        );
        assert_eq!(state.creature(CreatureName::Mouse).unwrap().position(), 6);
    }

    #[test]
    fn test_out_of_snacks_is_a_no_op() {
        let mut state = state_with(0, 5, &[]);
        let outcome = apply_snack_rule(&mut state, SnackRule::CloseAtTwoWithReset, 6).unwrap();

        assert_eq!(
            outcome,
            SnackOutcome::Exhausted {
                animal: CreatureName::Mouse
            }
        );
        assert_eq!(outcome.spared(), None);
        assert_eq!(state.cat().snack_count(), Some(0));
        assert_eq!(state.creature(CreatureName::Mouse).unwrap().position(), 6);
    }

    #[test]
    fn test_caught_animals_are_ignored() {
        let mut state = state_with(
            2,
            20,
            &[
                (CreatureName::Mouse, 20),
                (CreatureName::Squirrel, 35),
                (CreatureName::Bird, 40),
            ],
        );
        state
            .creature_mut(CreatureName::Mouse)
            .unwrap()
            .mark_chased();

        let outcome = apply_snack_rule(&mut state, SnackRule::CloseAtTwo, 6).unwrap();
        assert_eq!(outcome, SnackOutcome::NobodyInReach);
    }
}
