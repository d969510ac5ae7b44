//! UI layer: the roulette app shell and card rendering.

pub mod app;

pub use app::MovieRouletteApp;
