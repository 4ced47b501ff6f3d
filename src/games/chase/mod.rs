//! The cat-and-animals chase game.
//!
//! - The cat starts on field 0, mouse, squirrel and bird on field 6
//! - Each turn two dice split two moves between the cat and the animals
//! - Animals jump ahead on shortcuts; the cat may spend snacks to spare them
//! - An animal on the cat's field is caught; reaching field 50 finishes
//!
//! The game ends when every animal is caught or finished, or when the cat
//! reaches the finish.

mod game;

pub use game::{ChaseGame, ChaseGameBuilder};
