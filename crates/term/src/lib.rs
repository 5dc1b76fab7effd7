//! Terminal presentation for the snake game.
//!
//! Scenes are laid out into a plain framebuffer (no widget toolkit), then
//! flushed to the terminal as a diff against the previous frame.
//!
//! | Module      | Role                                                  |
//! |-------------|-------------------------------------------------------|
//! | `fb`        | styled cell grid                                      |
//! | `game_view` | `Scene` to framebuffer layout, pure and testable       |
//! | `renderer`  | raw mode, alternate screen, diffed writes             |
//! | `surface`   | `SceneRenderer` implementation used by the supervisor |

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod surface;

pub use tui_snake_core as core;
pub use tui_snake_engine as engine;
pub use tui_snake_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{SceneView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use surface::TermSceneRenderer;
