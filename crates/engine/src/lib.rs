//! Game engine - composes input, clocks and the pure core into runs
//!
//! The core crate knows how one step of the game works. This crate decides
//! *when* steps happen and how their results reach the screen:
//!
//! ```text
//! key presses ──► DirectionResolver ─┐
//!                                    ▼
//! logical tick ──────────────► SnakeMover ──► AppleFeeder ──► ScoreAccumulator
//!                                    ▲             │                 │
//!                                    └── Grow ◄────┘                 ▼
//!                                                             latest-scene cache
//!                                                                    │
//! frame tick ────────────────────────────────────────────────► RunEvent ──► Supervisor ──► SceneRenderer
//! ```
//!
//! - Steering is sampled at each logical tick (latest value, not a queue).
//! - Growth from an apple travels as a message and is applied on the next tick.
//! - Frames read the newest scene; ticks between two frames are coalesced.
//!   The supervisor reads frames the same way, so a slow renderer skips
//!   frames instead of falling behind.
//! - A terminal scene ends the run with [`RunEvent::Finished`]; the
//!   [`Supervisor`] then waits for a restart trigger and builds a fresh run.
//!
//! # Module Structure
//!
//! - [`cache`]: single-slot latest-value cache
//! - [`direction`]: reversal-safe direction resolution
//! - [`growth`]: growth messages and the snake mover
//! - [`feeder`]: apple consumption and score
//! - [`run`]: a single run, its clocks, and the task driving it
//! - [`supervisor`]: the restart state machine and the renderer seam
//! - [`config`]: configuration loading

pub mod cache;
pub mod config;
pub mod direction;
pub mod feeder;
pub mod growth;
pub mod run;
pub mod supervisor;

pub use tui_snake_core as core;
pub use tui_snake_types as types;

pub use cache::{latest_cache, CacheReader, CacheWriter};
pub use config::{apply_env_overrides, config_from_file, config_from_json, load_config};
pub use direction::DirectionResolver;
pub use feeder::{AppleEaten, AppleFeeder, ScoreAccumulator};
pub use growth::{growth_channel, Grow, GrowthReceiver, GrowthSender, SnakeMover};
pub use run::{Run, RunClocks, RunEvent, RunHandle};
pub use supervisor::{Lifecycle, SceneRenderer, Supervisor};
