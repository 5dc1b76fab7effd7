//! Direction and terminal-state rules.

use crate::scene::Scene;
use crate::snake::Snake;
use crate::types::{Direction, PlayField};

/// Decide the direction to adopt given the previous one.
///
/// A reversal is rejected (the previous direction stays); anything else is
/// adopted.
pub fn next_direction(previous: Direction, candidate: Direction) -> Direction {
    if previous.is_opposite(candidate) {
        previous
    } else {
        candidate
    }
}

/// True when the head sits on any other segment.
pub fn bites_itself(snake: &Snake) -> bool {
    let head = snake.head();
    snake.tail_segments().contains(&head)
}

/// Terminal condition for a run: self-collision or head outside the field.
pub fn is_game_over(scene: &Scene, field: PlayField) -> bool {
    !field.contains(scene.snake.head()) || bites_itself(&scene.snake)
}
