//! Apple consumption stage and score accumulator.

use tracing::{debug, warn};

use crate::core::{eat, Apples, SimpleRng, Snake};
use crate::growth::GrowthSender;
use crate::types::{PlayField, Point2D};

/// One apple eaten: the discrete event both growth and score react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppleEaten {
    pub at: Point2D,
}

/// Owns the apple set and reacts to each new snake.
#[derive(Debug)]
pub struct AppleFeeder {
    apples: Apples,
    field: PlayField,
    rng: SimpleRng,
    growth: GrowthSender,
    growth_per_apple: usize,
}

impl AppleFeeder {
    pub fn new(
        apples: Apples,
        field: PlayField,
        rng: SimpleRng,
        growth: GrowthSender,
        growth_per_apple: usize,
    ) -> Self {
        Self {
            apples,
            field,
            rng,
            growth,
            growth_per_apple,
        }
    }

    /// Check the new snake against the apples.
    ///
    /// On a hit the apple is replaced and a growth message is queued for the
    /// mover; the caller gets the event to feed the score.
    pub fn feed(&mut self, snake: &Snake) -> Option<AppleEaten> {
        let eaten = eat(&self.apples, snake, self.field, &mut self.rng)?;
        if eaten.replacement.is_none() {
            warn!(at = ?eaten.at, "no free cell left for a replacement apple");
        }
        self.apples = eaten.apples;
        self.growth.grow(self.growth_per_apple);
        debug!(at = ?eaten.at, replacement = ?eaten.replacement, "apple eaten");
        Some(AppleEaten { at: eaten.at })
    }

    pub fn apples(&self) -> &Apples {
        &self.apples
    }
}

/// Running score for one run.
#[derive(Debug, Clone)]
pub struct ScoreAccumulator {
    total: u32,
    points_per_apple: u32,
}

impl ScoreAccumulator {
    pub fn new(points_per_apple: u32) -> Self {
        Self {
            total: 0,
            points_per_apple,
        }
    }

    pub fn observe(&mut self, _event: &AppleEaten) -> u32 {
        self.total = self.total.saturating_add(self.points_per_apple);
        self.total
    }

    pub fn total(&self) -> u32 {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::{growth_channel, SnakeMover};
    use crate::types::Direction;

    fn snake(cells: &[(i32, i32)]) -> Snake {
        Snake::from_segments(cells.iter().map(|&(x, y)| Point2D::new(x, y)).collect())
    }

    #[test]
    fn feeding_queues_growth_and_keeps_cardinality() {
        let field = PlayField::new(12, 12);
        let (tx, rx) = growth_channel();
        let start = snake(&[(5, 5), (4, 5), (3, 5)]);
        let apples = Apples::from_positions([Point2D::new(6, 5), Point2D::new(0, 0)]);
        let mut feeder = AppleFeeder::new(apples, field, SimpleRng::new(9), tx, 1);
        let mut mover = SnakeMover::new(start, rx);

        let s = mover.step(Direction::Right).clone();
        let event = feeder.feed(&s);
        assert_eq!(event, Some(AppleEaten { at: Point2D::new(6, 5) }));
        assert_eq!(feeder.apples().len(), 2);
        assert!(!feeder.apples().contains(Point2D::new(6, 5)));
        assert_eq!(mover.target_length(), 3);

        mover.step(Direction::Right);
        assert_eq!(mover.target_length(), 4);
        assert_eq!(mover.snake().len(), 4);
    }

    #[test]
    fn miss_changes_nothing() {
        let field = PlayField::new(12, 12);
        let (tx, _rx) = growth_channel();
        let apples = Apples::from_positions([Point2D::new(0, 0)]);
        let mut feeder = AppleFeeder::new(apples.clone(), field, SimpleRng::new(9), tx, 1);
        assert_eq!(feeder.feed(&snake(&[(5, 5), (4, 5)])), None);
        assert_eq!(feeder.apples(), &apples);
    }

    #[test]
    fn score_counts_points_per_apple() {
        let mut score = ScoreAccumulator::new(10);
        let event = AppleEaten {
            at: Point2D::new(1, 1),
        };
        assert_eq!(score.total(), 0);
        assert_eq!(score.observe(&event), 10);
        assert_eq!(score.observe(&event), 20);
        assert_eq!(score.total(), 20);
    }
}
