//! Per-turn creature records and the board render.
//!
//! A `CreatureRecord` is one row of game history: the state of one creature
//! after one turn. Result sinks (CSV writers, dashboards) consume these rows;
//! the engine only produces them. Epoch `-1` is the snapshot taken before
//! the first turn.

use serde::{Deserialize, Serialize};

use super::creature::{Creature, CreatureName, Status};
use crate::strategy::Strategy;

/// The state of one creature at the end of one epoch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureRecord {
    /// Turn index, `-1` for the initial snapshot.
    pub epoch: i64,
    pub name: CreatureName,
    pub position: u32,
    pub status: Status,
    pub shortcut_entrances: Vec<u32>,
    pub shortcut_triggered: Vec<bool>,
    /// Snacks left, only recorded for the cat.
    pub snack_count: Option<u32>,
    pub game_id: u64,
    pub strategy: Strategy,
    /// Wall-clock time of the snapshot in milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl CreatureRecord {
    #[must_use]
    pub fn capture(
        creature: &Creature,
        epoch: i64,
        game_id: u64,
        strategy: Strategy,
        timestamp: u64,
    ) -> Self {
        Self {
            epoch,
            name: creature.name(),
            position: creature.position(),
            status: creature.status(),
            shortcut_entrances: creature.shortcut_entrances().to_vec(),
            shortcut_triggered: creature.shortcut_triggered().to_vec(),
            snack_count: creature.snack_count(),
            game_id,
            strategy,
            timestamp,
        }
    }
}

/// Milliseconds since the Unix epoch, 0 if the clock is before it.
#[must_use]
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

/// Render the board as `num_fields + 1` cells.
///
/// Each cell lists the symbols of the creatures standing on it, lower-cased
/// for caught animals.
///
/// ```
/// use cat_chase::core::{render_board, Creature, CreatureName};
///
/// let creatures = [
///     Creature::cat(0, &[]),
///     Creature::animal(CreatureName::Mouse, 6, &[]),
///     Creature::animal(CreatureName::Bird, 6, &[]),
/// ];
/// let board = render_board(&creatures, 50);
/// assert_eq!(board.len(), 51);
/// assert_eq!(board[0], "C");
/// assert_eq!(board[6], "MB");
/// ```
#[must_use]
pub fn render_board(creatures: &[Creature], num_fields: u32) -> Vec<String> {
    let mut board = vec![String::new(); num_fields as usize + 1];

    for creature in creatures {
        let Some(cell) = board.get_mut(creature.position() as usize) else {
            continue;
        };
        let symbol = creature.name().symbol();
        if creature.status() == Status::Chased {
            cell.push(symbol.to_ascii_lowercase());
        } else {
            cell.push(symbol);
        }
    }

    board
}
