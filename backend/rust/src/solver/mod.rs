// solver/mod.rs - Step-wise search simulators and their published snapshots

pub mod classic;
pub mod quantum;

pub use classic::ClassicSolver;
pub use quantum::QuantumSolver;

use serde::{Deserialize, Serialize};

use crate::grid::{Grid, Point, VisitedSet};
use crate::path::ParentMap;

/// Lifecycle shared by both solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverPhase {
    /// Created or reset, not yet seeded with the start cell.
    Idle,
    Running,
    Finished,
}

/// What a single `step` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// Idle or already finished; nothing changed.
    NoOp,
    /// Expanded one unit of work and published a new snapshot.
    Advanced,
    /// Reached the goal this step; the path is published.
    Solved,
    /// Running, but nothing is left to explore and the goal was never reached.
    Exhausted,
}

/// Immutable view of a solver after a tick, handed to renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverSnapshot {
    pub name: String,
    pub visited: VisitedSet,
    pub frontier: Vec<Point>,
    pub path: Vec<Point>,
    pub steps: u32,
    pub finished: bool,
}

impl SolverSnapshot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visited: VisitedSet::default(),
            frontier: Vec::new(),
            path: Vec::new(),
            steps: 0,
            finished: false,
        }
    }

    /// Number of cells discovered so far.
    pub fn explored(&self) -> usize {
        self.visited.len()
    }

    pub fn has_visited(&self, point: Point) -> bool {
        self.visited.contains(&point.key())
    }

    fn clear(&mut self) {
        self.visited.clear();
        self.frontier.clear();
        self.path.clear();
        self.steps = 0;
        self.finished = false;
    }
}

/// A search that advances one tick at a time over a shared, read-only grid.
pub trait Solver {
    fn phase(&self) -> SolverPhase;

    /// Place the start cell in the pending container. Only valid while Idle.
    fn seed(&mut self, start: Point);

    /// Perform one tick of work against `grid`.
    fn step(&mut self, grid: &Grid) -> StepOutcome;

    /// Drop all traversal state and aim at a new goal.
    fn reset(&mut self, goal: Point);

    fn snapshot(&self) -> &SolverSnapshot;

    fn name(&self) -> &str {
        &self.snapshot().name
    }

    fn is_finished(&self) -> bool {
        self.phase() == SolverPhase::Finished
    }
}

/// Visited set and parent links, always updated together.
#[derive(Debug, Clone, Default)]
pub(crate) struct Workspace {
    pub(crate) visited: VisitedSet,
    pub(crate) parents: ParentMap,
}

impl Workspace {
    /// Mark the seed cell; it has no parent.
    pub(crate) fn root(&mut self, start: Point) {
        self.visited.insert(start.key());
    }

    /// Record `child` as found from `parent`. False if it was already known.
    pub(crate) fn discover(&mut self, child: Point, parent: Point) -> bool {
        if !self.visited.insert(child.key()) {
            return false;
        }
        self.parents.link(child, parent);
        true
    }

    pub(crate) fn clear(&mut self) {
        self.visited.clear();
        self.parents.clear();
    }
}

/// Shared bookkeeping for the two solvers' published state.
#[derive(Debug, Clone)]
pub(crate) struct Published {
    pub(crate) snapshot: SolverSnapshot,
    pub(crate) phase: SolverPhase,
    pub(crate) goal: Point,
    pub(crate) exhausted_logged: bool,
}

impl Published {
    pub(crate) fn new(name: &str, goal: Point) -> Self {
        Self {
            snapshot: SolverSnapshot::new(name),
            phase: SolverPhase::Idle,
            goal,
            exhausted_logged: false,
        }
    }

    pub(crate) fn reset(&mut self, goal: Point) {
        self.snapshot.clear();
        self.phase = SolverPhase::Idle;
        self.goal = goal;
        self.exhausted_logged = false;
    }

    pub(crate) fn finish(&mut self, path: Vec<Point>) {
        self.phase = SolverPhase::Finished;
        self.snapshot.finished = true;
        self.snapshot.frontier.clear();
        self.snapshot.path = path;
        log::info!(
            "{} reached {} after {} steps ({} cells explored, path length {})",
            self.snapshot.name,
            self.goal,
            self.snapshot.steps,
            self.snapshot.explored(),
            self.snapshot.path.len()
        );
    }

    pub(crate) fn advance(&mut self, frontier: &[Point], visited: &VisitedSet) {
        self.snapshot.frontier.clear();
        self.snapshot.frontier.extend_from_slice(frontier);
        self.snapshot.steps += 1;
        self.snapshot.visited.clone_from(visited);
    }

    pub(crate) fn exhausted(&mut self) -> StepOutcome {
        if !self.exhausted_logged {
            log::warn!(
                "{} ran out of cells to explore without reaching {}",
                self.snapshot.name,
                self.goal
            );
            self.exhausted_logged = true;
        }
        StepOutcome::Exhausted
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_links_once() {
        let mut ws = Workspace::default();
        let start = Point::new(1, 1);
        ws.root(start);
        assert!(!ws.discover(start, Point::new(2, 1)));
        assert!(ws.discover(Point::new(2, 1), start));
        assert!(!ws.discover(Point::new(2, 1), Point::new(3, 1)));
        assert_eq!(ws.parents.parent_of(Point::new(2, 1)), Some(start));
        assert!(ws.parents.parent_of(start).is_none());
    }

    #[test]
    fn test_snapshot_serializes_keys_as_integers() {
        let mut snapshot = SolverSnapshot::new("Classic");
        snapshot.visited.insert(Point::new(1, 1).key());
        snapshot.frontier.push(Point::new(1, 1));
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["name"], "Classic");
        assert_eq!(json["visited"][0], 65537);
        assert_eq!(json["frontier"][0]["x"], 1);
        assert_eq!(json["finished"], false);
    }
}
