//! Growth messages and the movement fold that consumes them.
//!
//! Apple consumption never touches the snake's target length directly. It
//! sends a [`Grow`] message; the [`SnakeMover`] is the only owner of the
//! target length and drains the channel at the start of each step. A message
//! sent during tick N is therefore applied on tick N+1.

use tokio::sync::mpsc;
use tracing::debug;

use crate::core::{move_snake, Snake};
use crate::types::Direction;

/// Increase the target length by this many cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grow(pub usize);

pub fn growth_channel() -> (GrowthSender, GrowthReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (GrowthSender { tx }, GrowthReceiver { rx })
}

#[derive(Debug, Clone)]
pub struct GrowthSender {
    tx: mpsc::UnboundedSender<Grow>,
}

impl GrowthSender {
    pub fn grow(&self, cells: usize) {
        // A closed channel means the run is being torn down.
        let _ = self.tx.send(Grow(cells));
    }
}

#[derive(Debug)]
pub struct GrowthReceiver {
    rx: mpsc::UnboundedReceiver<Grow>,
}

impl GrowthReceiver {
    /// Sum of all queued growth, emptying the queue.
    fn drain(&mut self) -> usize {
        let mut total = 0usize;
        while let Ok(Grow(cells)) = self.rx.try_recv() {
            total = total.saturating_add(cells);
        }
        total
    }
}

/// Owns the snake and its target length.
#[derive(Debug)]
pub struct SnakeMover {
    snake: Snake,
    target_length: usize,
    growth: GrowthReceiver,
}

impl SnakeMover {
    pub fn new(snake: Snake, growth: GrowthReceiver) -> Self {
        let target_length = snake.len();
        Self {
            snake,
            target_length,
            growth,
        }
    }

    /// Apply queued growth, then move one cell in `direction`.
    pub fn step(&mut self, direction: Direction) -> &Snake {
        let grown = self.growth.drain();
        if grown > 0 {
            self.target_length = self.target_length.saturating_add(grown);
            debug!(target_length = self.target_length, "snake length target raised");
        }
        self.snake = move_snake(&self.snake, direction, self.target_length);
        &self.snake
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }
}
