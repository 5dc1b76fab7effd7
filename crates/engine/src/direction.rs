//! Direction resolution between key presses and ticks.

use tracing::{debug, trace};

use crate::core::next_direction;
use crate::types::Direction;

/// Folds steering input into the direction used by the next tick.
///
/// Two directions are tracked: `committed` is what the last tick actually
/// moved in, `pending` is what the next tick will use. Reversal is judged
/// against `committed`, so a quick "up, then left" while moving right cannot
/// turn the snake back into its own neck within one tick.
#[derive(Debug, Clone)]
pub struct DirectionResolver {
    committed: Direction,
    pending: Direction,
}

impl DirectionResolver {
    pub fn new(initial: Direction) -> Self {
        Self {
            committed: initial,
            pending: initial,
        }
    }

    /// Offer a candidate direction.
    ///
    /// Returns the new pending direction when it changed, `None` when the
    /// candidate was a reversal or a repeat of what is already pending.
    pub fn offer(&mut self, candidate: Direction) -> Option<Direction> {
        if next_direction(self.committed, candidate) != candidate {
            trace!(
                committed = self.committed.as_str(),
                candidate = candidate.as_str(),
                "reversal rejected"
            );
            return None;
        }
        if candidate == self.pending {
            return None;
        }
        self.pending = candidate;
        Some(candidate)
    }

    /// Lock in the pending direction for the current tick.
    pub fn commit(&mut self) -> Direction {
        if self.pending != self.committed {
            debug!(
                from = self.committed.as_str(),
                to = self.pending.as_str(),
                "direction committed"
            );
        }
        self.committed = self.pending;
        self.committed
    }

    pub fn committed(&self) -> Direction {
        self.committed
    }

    pub fn pending(&self) -> Direction {
        self.pending
    }
}
