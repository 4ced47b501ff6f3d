//! Policies choosing which animal takes the turn's animal moves.

use smallvec::SmallVec;

use crate::core::{CreatureName, GameError, GameRng, Result};

use super::{Candidate, Snapshot};

/// Chooses the animal that runs this turn.
///
/// Called only with at least one candidate in the snapshot.
pub trait AnimalPolicy: Send + Sync {
    fn choose(&self, snapshot: &Snapshot, rng: &mut GameRng) -> Result<CreatureName>;
}

fn no_candidates() -> GameError {
    GameError::InvariantViolation("no animal left to choose from".to_string())
}

fn random_candidate(candidates: &[Candidate], rng: &mut GameRng) -> Result<CreatureName> {
    rng.choose(candidates)
        .map(|c| c.name)
        .ok_or_else(no_candidates)
}

// =============================================================================
// Random
// =============================================================================

/// Uniformly random in-progress animal.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomSingle;

impl AnimalPolicy for RandomSingle {
    fn choose(&self, snapshot: &Snapshot, rng: &mut GameRng) -> Result<CreatureName> {
        random_candidate(&snapshot.candidates, rng)
    }
}

// =============================================================================
// Closest
// =============================================================================

/// The animal with the smallest positive lead over the cat.
///
/// Candidates are shuffled first so ties go to a random animal. When nobody
/// is strictly ahead of the cat, the first shuffled candidate runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClosestRunAway;

impl AnimalPolicy for ClosestRunAway {
    fn choose(&self, snapshot: &Snapshot, rng: &mut GameRng) -> Result<CreatureName> {
        let mut shuffled: SmallVec<[Candidate; 3]> = snapshot.candidates.clone();
        rng.shuffle(&mut shuffled);

        let closest_ahead = shuffled
            .iter()
            .filter(|c| c.position > snapshot.cat_position)
            // min_by_key keeps the first of equal leads
            .min_by_key(|c| c.position - snapshot.cat_position);

        closest_ahead
            .or_else(|| shuffled.first())
            .map(|c| c.name)
            .ok_or_else(no_candidates)
    }
}

// =============================================================================
// Only one
// =============================================================================

/// Keeps moving whichever animal has run furthest.
///
/// On the first move all animals share the start field and one is drawn at
/// random; from then on the same animal is picked every turn. Two animals
/// sharing a field away from the start contradict that and are reported as
/// an `InvariantViolation`.
#[derive(Clone, Copy, Debug, Default)]
pub struct OnlyOneRunAway;

impl AnimalPolicy for OnlyOneRunAway {
    fn choose(&self, snapshot: &Snapshot, rng: &mut GameRng) -> Result<CreatureName> {
        let candidates = &snapshot.candidates;

        if candidates.iter().all(|c| c.position == snapshot.animal_start) {
            return random_candidate(candidates, rng);
        }

        for (i, a) in candidates.iter().enumerate() {
            let shared = candidates[i + 1..]
                .iter()
                .find(|b| b.position == a.position && a.position != snapshot.animal_start);
            if let Some(b) = shared {
                return Err(GameError::InvariantViolation(format!(
                    "{} and {} share field {} while only one animal should be running",
                    a.name, b.name, a.position
                )));
            }
        }

        candidates
            .iter()
            .max_by_key(|c| c.position)
            .map(|c| c.name)
            .ok_or_else(no_candidates)
    }
}
