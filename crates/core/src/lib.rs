//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the entity generators and state transition functions of
//! the snake game. It has **no dependencies** on timing, input, or rendering:
//! every function takes its inputs explicitly and returns a fresh value.
//!
//! # Module Structure
//!
//! - [`snake`]: snake body, [`generate_snake`], and the movement fold [`move_snake`]
//! - [`apples`]: apple set, [`generate_apples`], and the consumption fold [`eat`]
//! - [`rules`]: reversal rejection ([`next_direction`]) and [`is_game_over`]
//! - [`scene`]: the immutable [`Scene`] snapshot
//! - [`rng`]: seeded LCG so a seed fully determines apple placement
//!
//! # Example
//!
//! ```
//! use tui_snake_core::{eat, generate_apples, generate_snake, is_game_over, move_snake};
//! use tui_snake_core::{Scene, SimpleRng};
//! use tui_snake_types::{Direction, PlayField};
//!
//! let field = PlayField::new(20, 10);
//! let mut rng = SimpleRng::new(42);
//!
//! let snake = generate_snake(3, field);
//! let apples = generate_apples(2, &snake, field, &mut rng);
//!
//! let snake = move_snake(&snake, Direction::Right, 3);
//! let apples = eat(&apples, &snake, field, &mut rng)
//!     .map(|eaten| eaten.apples)
//!     .unwrap_or(apples);
//!
//! let scene = Scene::new(snake, apples, 0);
//! assert!(!is_game_over(&scene, field));
//! ```

pub mod apples;
pub mod rng;
pub mod rules;
pub mod scene;
pub mod snake;

pub use tui_snake_types as types;

// Re-export commonly used types for convenience
pub use apples::{eat, generate_apples, random_free_position, Apples, Eaten};
pub use rng::SimpleRng;
pub use rules::{bites_itself, is_game_over, next_direction};
pub use scene::Scene;
pub use snake::{generate_snake, move_snake, Snake};
