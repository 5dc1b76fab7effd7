//! TUI Snake (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, the
//! integration tests and the benches can use `tui_snake::{core,engine,...}`.

pub use tui_snake_core as core;
pub use tui_snake_engine as engine;
pub use tui_snake_input as input;
pub use tui_snake_term as term;
pub use tui_snake_types as types;
