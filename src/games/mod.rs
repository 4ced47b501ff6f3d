//! Concrete games built on the engine.

pub mod chase;
