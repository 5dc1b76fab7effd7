//! Snake body and the movement fold.

use crate::types::{Direction, PlayField, Point2D};

/// Ordered snake body, head at index 0
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snake {
    body: Vec<Point2D>,
}

impl Snake {
    /// Build a snake from explicit segments (head first).
    ///
    /// Panics on an empty body: a snake always has a head.
    pub fn from_segments(body: Vec<Point2D>) -> Self {
        assert!(!body.is_empty(), "snake needs at least one segment");
        Self { body }
    }

    pub fn head(&self) -> Point2D {
        self.body[0]
    }

    pub fn segments(&self) -> &[Point2D] {
        &self.body
    }

    /// Everything but the head
    pub fn tail_segments(&self) -> &[Point2D] {
        &self.body[1..]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, p: Point2D) -> bool {
        self.body.contains(&p)
    }
}

/// Create the starting snake: a horizontal line on the middle row, head on
/// the right, ready to move right.
pub fn generate_snake(length: usize, field: PlayField) -> Snake {
    let length = length.max(1);
    let row = (field.rows / 2) as i32;
    let body = (0..length as i32)
        .rev()
        .map(|x| Point2D::new(x, row))
        .collect();
    Snake { body }
}

/// Advance the snake one cell.
///
/// The new head is prepended. The tail is kept only while the snake is
/// shorter than `target_length`, so growth shows up one cell per step.
/// The snake never shrinks, even if `target_length` is below its length.
/// Edges do not wrap: leaving the field is for `is_game_over` to judge.
pub fn move_snake(snake: &Snake, direction: Direction, target_length: usize) -> Snake {
    let head = snake.head() + direction.vector();
    let new_len = (snake.len() + 1).min(target_length.max(snake.len()));

    let mut body = Vec::with_capacity(new_len);
    body.push(head);
    body.extend(snake.body.iter().take(new_len - 1).copied());
    Snake { body }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(cells: &[(i32, i32)]) -> Snake {
        Snake::from_segments(cells.iter().map(|&(x, y)| Point2D::new(x, y)).collect())
    }

    #[test]
    fn test_move_keeps_length_without_growth() {
        let s = snake(&[(5, 5), (4, 5), (3, 5)]);
        let next = move_snake(&s, Direction::Right, 3);
        assert_eq!(next, snake(&[(6, 5), (5, 5), (4, 5)]));
    }

    #[test]
    fn test_move_grows_by_keeping_tail() {
        let s = snake(&[(5, 5), (4, 5), (3, 5)]);
        let next = move_snake(&s, Direction::Down, 4);
        assert_eq!(next, snake(&[(5, 6), (5, 5), (4, 5), (3, 5)]));
    }

    #[test]
    fn test_move_grows_one_cell_per_step() {
        let s = snake(&[(5, 5), (4, 5)]);
        let next = move_snake(&s, Direction::Right, 10);
        assert_eq!(next.len(), 3);
        let next = move_snake(&next, Direction::Right, 10);
        assert_eq!(next.len(), 4);
    }

    #[test]
    fn test_move_never_shrinks() {
        let s = snake(&[(5, 5), (4, 5), (3, 5)]);
        let next = move_snake(&s, Direction::Up, 1);
        assert_eq!(next.len(), 3);
        assert_eq!(next.head(), Point2D::new(5, 4));
    }

    #[test]
    fn test_move_does_not_wrap() {
        let s = snake(&[(0, 0), (1, 0)]);
        let next = move_snake(&s, Direction::Left, 2);
        assert_eq!(next.head(), Point2D::new(-1, 0));
    }

    #[test]
    fn test_move_leaves_input_untouched() {
        let s = snake(&[(5, 5), (4, 5), (3, 5)]);
        let before = s.clone();
        let _ = move_snake(&s, Direction::Right, 4);
        assert_eq!(s, before);
    }

    #[test]
    fn test_generate_snake_layout() {
        let s = generate_snake(4, PlayField::new(10, 8));
        assert_eq!(s, snake(&[(3, 4), (2, 4), (1, 4), (0, 4)]));
    }
}
