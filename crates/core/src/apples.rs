//! Apple placement and the consumption fold.

use crate::rng::SimpleRng;
use crate::snake::Snake;
use crate::types::{PlayField, Point2D};

/// Apples currently on the field
///
/// Positions are distinct. Order is placement order, which keeps runs
/// reproducible for a given seed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Apples {
    cells: Vec<Point2D>,
}

impl Apples {
    /// Build an apple set from explicit positions, dropping duplicates.
    pub fn from_positions(positions: impl IntoIterator<Item = Point2D>) -> Self {
        let mut cells: Vec<Point2D> = Vec::new();
        for p in positions {
            if !cells.contains(&p) {
                cells.push(p);
            }
        }
        Self { cells }
    }

    pub fn positions(&self) -> &[Point2D] {
        &self.cells
    }

    pub fn contains(&self, p: Point2D) -> bool {
        self.cells.contains(&p)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Pick a random cell not covered by the snake or an existing apple.
///
/// Returns `None` only when the field is completely full.
pub fn random_free_position(
    field: PlayField,
    snake: &Snake,
    apples: &Apples,
    rng: &mut SimpleRng,
) -> Option<Point2D> {
    let free: Vec<Point2D> = field
        .cells()
        .filter(|&p| !snake.occupies(p) && !apples.contains(p))
        .collect();
    if free.is_empty() {
        return None;
    }
    let i = rng.next_range(free.len() as u32) as usize;
    Some(free[i])
}

/// Place `count` apples clear of the snake.
///
/// Stops early if the field runs out of free cells.
pub fn generate_apples(count: usize, snake: &Snake, field: PlayField, rng: &mut SimpleRng) -> Apples {
    let mut apples = Apples::default();
    for _ in 0..count {
        match random_free_position(field, snake, &apples, rng) {
            Some(p) => apples.cells.push(p),
            None => break,
        }
    }
    apples
}

/// Result of one consumption step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eaten {
    /// Where the eaten apple was (the snake's head)
    pub at: Point2D,
    /// Replacement apple, `None` if the field had no free cell left
    pub replacement: Option<Point2D>,
    pub apples: Apples,
}

/// Consume the apple under the snake's head, if any.
///
/// Returns `None` when the head is not on an apple (the set is unchanged).
/// Otherwise the eaten apple is removed and a new one is placed on a cell
/// free of both the snake and the remaining apples.
pub fn eat(apples: &Apples, snake: &Snake, field: PlayField, rng: &mut SimpleRng) -> Option<Eaten> {
    let head = snake.head();
    let idx = apples.cells.iter().position(|&p| p == head)?;

    let mut next = apples.clone();
    next.cells.remove(idx);
    let replacement = random_free_position(field, snake, &next, rng);
    if let Some(p) = replacement {
        next.cells.push(p);
    }

    Some(Eaten {
        at: head,
        replacement,
        apples: next,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::generate_snake;

    fn snake(cells: &[(i32, i32)]) -> Snake {
        Snake::from_segments(cells.iter().map(|&(x, y)| Point2D::new(x, y)).collect())
    }

    #[test]
    fn test_generate_apples_avoid_snake_and_each_other() {
        let field = PlayField::new(8, 6);
        for seed in 1..50 {
            let mut rng = SimpleRng::new(seed);
            let s = generate_snake(5, field);
            let apples = generate_apples(6, &s, field, &mut rng);
            assert_eq!(apples.len(), 6);
            for (i, p) in apples.positions().iter().enumerate() {
                assert!(field.contains(*p));
                assert!(!s.occupies(*p), "apple {p:?} on snake (seed {seed})");
                assert!(!apples.positions()[i + 1..].contains(p));
            }
        }
    }

    #[test]
    fn test_generate_apples_stops_when_field_full() {
        let field = PlayField::new(3, 1);
        let s = snake(&[(1, 0)]);
        let mut rng = SimpleRng::new(1);
        let apples = generate_apples(5, &s, field, &mut rng);
        assert_eq!(apples.len(), 2);
    }

    #[test]
    fn test_eat_miss_returns_none() {
        let field = PlayField::new(10, 10);
        let apples = Apples::from_positions([Point2D::new(1, 1), Point2D::new(2, 2)]);
        let s = snake(&[(5, 5), (4, 5)]);
        let mut rng = SimpleRng::new(1);
        assert_eq!(eat(&apples, &s, field, &mut rng), None);
    }

    #[test]
    fn test_eat_replaces_exactly_one_apple() {
        let field = PlayField::new(10, 10);
        let apples = Apples::from_positions([Point2D::new(6, 5), Point2D::new(2, 2)]);
        let s = snake(&[(6, 5), (5, 5), (4, 5)]);
        let mut rng = SimpleRng::new(3);

        let eaten = eat(&apples, &s, field, &mut rng).unwrap();
        assert_eq!(eaten.at, Point2D::new(6, 5));
        assert_eq!(eaten.apples.len(), 2);
        assert!(!eaten.apples.contains(Point2D::new(6, 5)));
        assert!(eaten.apples.contains(Point2D::new(2, 2)));

        let new_apple = eaten.replacement.unwrap();
        assert!(eaten.apples.contains(new_apple));
        assert!(!s.occupies(new_apple));
        assert_ne!(new_apple, Point2D::new(2, 2));
    }

    #[test]
    fn test_eat_on_full_field_drops_replacement() {
        let field = PlayField::new(3, 1);
        let apples = Apples::from_positions([Point2D::new(2, 0)]);
        let s = snake(&[(2, 0), (1, 0), (0, 0)]);
        let mut rng = SimpleRng::new(1);

        let eaten = eat(&apples, &s, field, &mut rng).unwrap();
        assert_eq!(eaten.replacement, None);
        assert!(eaten.apples.is_empty());
    }

    #[test]
    fn test_from_positions_dedups() {
        let apples = Apples::from_positions([Point2D::new(1, 1), Point2D::new(1, 1)]);
        assert_eq!(apples.len(), 1);
    }
}
