//! Chase detection: animals sharing the cat's field are caught.

use smallvec::SmallVec;

use crate::core::{CreatureName, GameState, Status};

/// Mark every running animal on the cat's field as chased, except `spared`.
///
/// When this leaves every animal chased, the cat finishes too. Returns the
/// animals caught by this call.
pub fn detect_chases(
    state: &mut GameState,
    spared: Option<CreatureName>,
) -> SmallVec<[CreatureName; 3]> {
    let cat_position = state.cat().position();
    let mut caught = SmallVec::new();

    for animal in state.animals_mut() {
        if Some(animal.name()) == spared || animal.position() != cat_position {
            continue;
        }
        if animal.mark_chased() {
            caught.push(animal.name());
        }
    }

    if state.animals().all(|a| a.status() == Status::Chased) {
        state.cat_mut().mark_finished();
    }

    caught
}
