//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` events into [`crate::types::GameInput`] through a
//! configured key table, and pumps them into the game's input channel.
//! Unrecognized keys never leave this crate.

pub mod map;
pub mod pump;

pub use tui_snake_types as types;

pub use map::{should_quit, KeyMap};
pub use pump::spawn_input_pump;
