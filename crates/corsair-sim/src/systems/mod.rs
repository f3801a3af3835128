//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions over `&mut World` (or `&World` when
//! read-only). They own no state; everything lives in components or on
//! the engine.

pub mod cleanup;
pub mod collision;
pub mod helm;
pub mod movement;
pub mod snapshot;
