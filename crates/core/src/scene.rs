use crate::apples::Apples;
use crate::snake::Snake;

/// Snapshot handed to the renderer: snake, apples and score at one instant.
///
/// Scenes are values. A new one is built for every update and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scene {
    pub snake: Snake,
    pub apples: Apples,
    pub score: u32,
}

impl Scene {
    pub fn new(snake: Snake, apples: Apples, score: u32) -> Self {
        Self {
            snake,
            apples,
            score,
        }
    }
}
