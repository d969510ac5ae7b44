//! Controller layer: worker events and command dispatch for the roulette UI.

pub mod events;
pub mod orchestration;
