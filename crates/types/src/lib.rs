//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! Everything here is plain data: grid geometry, directions, the inputs the
//! game reacts to, and the configuration loaded once at startup.
//!
//! # Play Field
//!
//! The snake moves on a rectangular grid of `cols x rows` cells, indexed from
//! `(0, 0)` at the top-left. Coordinates are signed so that a head that has
//! left the field can still be represented (and detected as game over).
//!
//! # Default Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 200 | Logical tick period (movement speed) |
//! | `FPS` | 60 | Presentation rate |
//! | `SNAKE_LENGTH` | 5 | Initial snake length |
//! | `APPLE_COUNT` | 2 | Apples on the field at all times |
//! | `POINTS_PER_APPLE` | 1 | Score awarded per apple |
//! | `GROWTH_PER_APPLE` | 1 | Target length increase per apple |
//! | `FIELD_COLS` | 30 | Play field width in cells |
//! | `FIELD_ROWS` | 20 | Play field height in cells |
//! | `MAX_FIELD_SIDE` | 1000 | Largest accepted `cols` or `rows` |
//!
//! # Examples
//!
//! ```
//! use tui_snake_types::{Direction, Point2D};
//!
//! let head = Point2D::new(5, 5);
//! assert_eq!(head + Direction::Right.vector(), Point2D::new(6, 5));
//!
//! assert!(Direction::Up.is_opposite(Direction::Down));
//! assert!(!Direction::Up.is_opposite(Direction::Left));
//!
//! assert_eq!(Direction::from_str("left"), Some(Direction::Left));
//! ```

use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Logical tick period in milliseconds (one snake step per tick)
pub const TICK_MS: u64 = 200;

/// Presentation rate in frames per second
pub const FPS: u32 = 60;

/// Initial snake length in cells
pub const SNAKE_LENGTH: usize = 5;

/// Number of apples kept on the field
pub const APPLE_COUNT: usize = 2;

/// Score awarded for each apple eaten
pub const POINTS_PER_APPLE: u32 = 1;

/// Target length increase for each apple eaten
pub const GROWTH_PER_APPLE: usize = 1;

/// Play field width in cells
pub const FIELD_COLS: u16 = 30;

/// Play field height in cells
pub const FIELD_ROWS: u16 = 20;

/// Largest accepted field width or height in cells
///
/// Keeps the terminal layout (two columns per cell plus a border) well
/// inside `u16`.
pub const MAX_FIELD_SIDE: u16 = 1000;

/// Direction the snake starts moving in
pub const INITIAL_DIRECTION: Direction = Direction::Right;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_constants() {
        assert_eq!(TICK_MS, 200);
        assert_eq!(FPS, 60);
        assert_eq!(SNAKE_LENGTH, 5);
        assert_eq!(APPLE_COUNT, 2);
        assert_eq!(POINTS_PER_APPLE, 1);
        assert_eq!(INITIAL_DIRECTION, Direction::Right);
    }

    #[test]
    fn opposites_are_symmetric() {
        for d in Direction::ALL {
            assert!(d.opposite().is_opposite(d));
            assert_eq!(d.opposite().opposite(), d);
            assert!(!d.is_opposite(d));
        }
    }

    #[test]
    fn vectors_sum_to_zero_with_opposite() {
        for d in Direction::ALL {
            assert_eq!(d.vector() + d.opposite().vector(), Point2D::new(0, 0));
        }
    }

    #[test]
    fn play_field_bounds() {
        let field = PlayField::new(3, 2);
        assert!(field.contains(Point2D::new(0, 0)));
        assert!(field.contains(Point2D::new(2, 1)));
        assert!(!field.contains(Point2D::new(3, 1)));
        assert!(!field.contains(Point2D::new(0, 2)));
        assert!(!field.contains(Point2D::new(-1, 0)));
        assert_eq!(field.cell_count(), 6);
    }

    #[test]
    fn config_deserializes_partial_json() {
        let config: GameConfig = serde_json::from_str(r#"{"tick_ms": 120, "cols": 12}"#).unwrap();
        assert_eq!(config.tick_ms, 120);
        assert_eq!(config.cols, 12);
        assert_eq!(config.rows, FIELD_ROWS);
        assert_eq!(config.keys, KeyBindings::default());
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_degenerate_values() {
        let bad = GameConfig {
            tick_ms: 0,
            ..GameConfig::default()
        };
        assert!(bad.validate().is_err());

        let bad = GameConfig {
            snake_length: 1,
            ..GameConfig::default()
        };
        assert!(bad.validate().is_err());

        let bad = GameConfig {
            cols: 4,
            snake_length: 5,
            ..GameConfig::default()
        };
        assert!(bad.validate().is_err());

        let bad = GameConfig {
            cols: 5,
            rows: 1,
            snake_length: 4,
            apple_count: 2,
            ..GameConfig::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn validate_bounds_field_size() {
        let huge = GameConfig {
            cols: 40000,
            rows: 2,
            ..GameConfig::default()
        };
        assert!(huge.validate().unwrap_err().contains("limit"));

        let tall = GameConfig {
            rows: MAX_FIELD_SIDE + 1,
            ..GameConfig::default()
        };
        assert!(tall.validate().is_err());

        let largest = GameConfig {
            cols: MAX_FIELD_SIDE,
            rows: MAX_FIELD_SIDE,
            ..GameConfig::default()
        };
        assert_eq!(largest.validate(), Ok(()));
    }
}

/// Integer grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: i32,
    pub y: i32,
}

impl Point2D {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point2D {
    type Output = Point2D;

    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// The four movement directions
///
/// Screen coordinates: `Up` decreases `y`, `Down` increases it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector for one step in this direction
    pub fn vector(&self) -> Point2D {
        match self {
            Direction::Up => Point2D::new(0, -1),
            Direction::Down => Point2D::new(0, 1),
            Direction::Left => Point2D::new(-1, 0),
            Direction::Right => Point2D::new(1, 0),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True when `other` points exactly the other way
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Parse direction from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_snake_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("UP"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Rectangular play field, `cols x rows` cells starting at the origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayField {
    pub cols: u16,
    pub rows: u16,
}

impl PlayField {
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    pub fn contains(&self, p: Point2D) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.cols as i32 && p.y < self.rows as i32
    }

    pub fn cell_count(&self) -> usize {
        (self.cols as usize) * (self.rows as usize)
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Point2D> + '_ {
        (0..self.rows as i32).flat_map(move |y| (0..self.cols as i32).map(move |x| Point2D::new(x, y)))
    }
}

impl Default for PlayField {
    fn default() -> Self {
        Self::new(FIELD_COLS, FIELD_ROWS)
    }
}

/// Discrete inputs the game reacts to
///
/// Raw terminal events are mapped into these by the input layer; anything
/// unrecognized never becomes a `GameInput`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    /// A recognized direction key
    Steer(Direction),
    /// Start a new run (only meaningful after game over)
    Restart,
    /// Leave the game entirely
    Quit,
}

/// Key names bound to each direction
///
/// Names are `"Up"`, `"Down"`, `"Left"`, `"Right"` for arrow keys, or a single
/// character. Characters are matched case-insensitively by the input layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
}

impl KeyBindings {
    /// Bindings for one direction
    pub fn for_direction(&self, direction: Direction) -> &[String] {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let names = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            up: names(&["Up", "w", "k"]),
            down: names(&["Down", "s", "j"]),
            left: names(&["Left", "a", "h"]),
            right: names(&["Right", "d", "l"]),
        }
    }
}

/// Game configuration, loaded once at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Logical tick period in milliseconds
    pub tick_ms: u64,
    /// Presentation rate in frames per second
    pub fps: u32,
    pub snake_length: usize,
    pub apple_count: usize,
    pub points_per_apple: u32,
    pub growth_per_apple: usize,
    pub cols: u16,
    pub rows: u16,
    pub keys: KeyBindings,
}

impl GameConfig {
    pub fn field(&self) -> PlayField {
        PlayField::new(self.cols, self.rows)
    }

    /// Frame period in milliseconds (at least 1)
    pub fn frame_ms(&self) -> u64 {
        (1000 / self.fps.max(1) as u64).max(1)
    }

    /// Check that a run can actually be started with these values.
    pub fn validate(&self) -> Result<(), String> {
        if self.tick_ms == 0 {
            return Err("tick_ms must be greater than zero".to_string());
        }
        if self.fps == 0 {
            return Err("fps must be greater than zero".to_string());
        }
        if self.snake_length < 2 {
            return Err(format!(
                "snake_length must be at least 2, got {}",
                self.snake_length
            ));
        }
        if self.cols > MAX_FIELD_SIDE || self.rows > MAX_FIELD_SIDE {
            return Err(format!(
                "a {}x{} field exceeds the {} cell limit per side",
                self.cols, self.rows, MAX_FIELD_SIDE
            ));
        }
        if self.rows == 0 || self.snake_length > self.cols as usize {
            return Err(format!(
                "snake of length {} does not fit a {}x{} field",
                self.snake_length, self.cols, self.rows
            ));
        }
        let free = self.field().cell_count() - self.snake_length;
        if self.apple_count > free {
            return Err(format!(
                "{} apples do not fit in the {} free cells",
                self.apple_count, free
            ));
        }
        for direction in Direction::ALL {
            if self.keys.for_direction(direction).is_empty() {
                return Err(format!("no keys bound to {}", direction.as_str()));
            }
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            fps: FPS,
            snake_length: SNAKE_LENGTH,
            apple_count: APPLE_COUNT,
            points_per_apple: POINTS_PER_APPLE,
            growth_per_apple: GROWTH_PER_APPLE,
            cols: FIELD_COLS,
            rows: FIELD_ROWS,
            keys: KeyBindings::default(),
        }
    }
}
