// order.rs - Injectable neighbour orderings for carving and classic search

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::grid::Direction;

/// Decides the order in which the four directions are tried.
///
/// Maze carving and the classic solver both consult one of these per
/// expansion. Production code shuffles; tests plug in a fixed order.
pub trait DirectionOrder {
    fn arrange(&mut self, directions: &mut [Direction; 4]);

    fn ordered(&mut self) -> [Direction; 4] {
        let mut directions = Direction::ALL;
        self.arrange(&mut directions);
        directions
    }
}

impl<F> DirectionOrder for F
where
    F: FnMut(&mut [Direction; 4]),
{
    fn arrange(&mut self, directions: &mut [Direction; 4]) {
        self(directions)
    }
}

/// Uniform random permutation per call.
#[derive(Debug, Clone)]
pub struct Shuffled<R> {
    rng: R,
}

impl<R: Rng> Shuffled<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl Shuffled<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> DirectionOrder for Shuffled<R> {
    fn arrange(&mut self, directions: &mut [Direction; 4]) {
        directions.shuffle(&mut self.rng);
    }
}

/// Always N, E, S, W.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unshuffled;

impl DirectionOrder for Unshuffled {
    fn arrange(&mut self, _directions: &mut [Direction; 4]) {}
}
