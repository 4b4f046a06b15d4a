// solver/quantum.rs - Wavefront (breadth-first) search, whole frontier per tick

use super::{Published, Solver, SolverPhase, SolverSnapshot, StepOutcome, Workspace};
use crate::grid::{Direction, Grid, Point};
use crate::path::reconstruct_path;

pub const QUANTUM_NAME: &str = "Quantum";

/// Expands every cell of the current wave in one tick.
///
/// The "parallelism" is simulated: the wave is processed in order within a
/// single call, and neighbours are always tried N, E, S, W. After `k` ticks
/// the frontier holds exactly the cells at distance `k` from the start, so
/// the step count at completion is the shortest-path distance.
#[derive(Debug)]
pub struct QuantumSolver {
    frontier: Vec<Point>,
    workspace: Workspace,
    published: Published,
}

impl QuantumSolver {
    pub fn new(goal: Point) -> Self {
        Self {
            frontier: Vec::new(),
            workspace: Workspace::default(),
            published: Published::new(QUANTUM_NAME, goal),
        }
    }

    /// The wave that the next tick will expand.
    pub fn wave(&self) -> &[Point] {
        &self.frontier
    }
}

impl Solver for QuantumSolver {
    fn phase(&self) -> SolverPhase {
        self.published.phase
    }

    fn seed(&mut self, start: Point) {
        if self.published.phase != SolverPhase::Idle {
            log::debug!("{} already seeded, ignoring", self.name());
            return;
        }
        self.frontier.push(start);
        self.workspace.root(start);
        self.published.phase = SolverPhase::Running;
    }

    fn step(&mut self, grid: &Grid) -> StepOutcome {
        if self.published.phase != SolverPhase::Running {
            return StepOutcome::NoOp;
        }
        if self.frontier.is_empty() {
            return self.published.exhausted();
        }

        let goal = self.published.goal;
        if self.frontier.contains(&goal) {
            let path = reconstruct_path(&self.workspace.parents, goal);
            self.published.finish(path);
            return StepOutcome::Solved;
        }

        // Member by member: a cell touched by two wave members is claimed
        // by whichever comes first.
        let wave = std::mem::take(&mut self.frontier);
        let mut next = Vec::with_capacity(wave.len() * 2);
        for &current in &wave {
            for neighbor in grid.open_neighbors(current, &Direction::ALL) {
                if self.workspace.discover(neighbor, current) {
                    next.push(neighbor);
                }
            }
        }
        self.frontier = next;

        self.published.advance(&self.frontier, &self.workspace.visited);
        log::trace!(
            "{} step {}: wave of {}",
            self.published.snapshot.name,
            self.published.snapshot.steps,
            self.frontier.len()
        );
        StepOutcome::Advanced
    }

    fn reset(&mut self, goal: Point) {
        self.frontier.clear();
        self.workspace.clear();
        self.published.reset(goal);
    }

    fn snapshot(&self) -> &SolverSnapshot {
        &self.published.snapshot
    }
}
