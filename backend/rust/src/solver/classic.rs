// solver/classic.rs - Sequential depth-first search, one cell per tick

use super::{Published, Solver, SolverPhase, SolverSnapshot, StepOutcome, Workspace};
use crate::grid::{Grid, Point};
use crate::order::DirectionOrder;
use crate::path::reconstruct_path;

pub const CLASSIC_NAME: &str = "Classic";

/// Single-headed search driven by a LIFO stack.
///
/// Neighbour order is shuffled per expansion purely for visual variety: it
/// changes the shape of the "snake", never whether the goal is reached.
pub struct ClassicSolver {
    stack: Vec<Point>,
    workspace: Workspace,
    published: Published,
    order: Box<dyn DirectionOrder + Send>,
}

impl ClassicSolver {
    pub fn new(goal: Point, order: Box<dyn DirectionOrder + Send>) -> Self {
        Self {
            stack: Vec::new(),
            workspace: Workspace::default(),
            published: Published::new(CLASSIC_NAME, goal),
            order,
        }
    }

    /// Cells waiting on the stack, top last.
    pub fn pending(&self) -> &[Point] {
        &self.stack
    }
}

impl Solver for ClassicSolver {
    fn phase(&self) -> SolverPhase {
        self.published.phase
    }

    fn seed(&mut self, start: Point) {
        if self.published.phase != SolverPhase::Idle {
            log::debug!("{} already seeded, ignoring", self.name());
            return;
        }
        self.stack.push(start);
        self.workspace.root(start);
        self.published.phase = SolverPhase::Running;
    }

    fn step(&mut self, grid: &Grid) -> StepOutcome {
        if self.published.phase != SolverPhase::Running {
            return StepOutcome::NoOp;
        }
        let Some(current) = self.stack.pop() else {
            return self.published.exhausted();
        };

        if current == self.published.goal {
            let path = reconstruct_path(&self.workspace.parents, current);
            self.published.finish(path);
            return StepOutcome::Solved;
        }

        let directions = self.order.ordered();
        for next in grid.open_neighbors(current, &directions) {
            if self.workspace.discover(next, current) {
                self.stack.push(next);
            }
        }

        self.published.advance(&[current], &self.workspace.visited);
        log::trace!(
            "{} step {}: at {}, {} pending",
            self.published.snapshot.name,
            self.published.snapshot.steps,
            current,
            self.stack.len()
        );
        StepOutcome::Advanced
    }

    fn reset(&mut self, goal: Point) {
        self.stack.clear();
        self.workspace.clear();
        self.published.reset(goal);
    }

    fn snapshot(&self) -> &SolverSnapshot {
        &self.published.snapshot
    }
}

impl std::fmt::Debug for ClassicSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassicSolver")
            .field("stack", &self.stack)
            .field("phase", &self.published.phase)
            .field("steps", &self.published.snapshot.steps)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate_maze;
    use crate::grid::Direction;
    use crate::order::{Shuffled, Unshuffled};
    use crate::solver::testing::{assert_walkable, corridor, corridor_order};

    fn unshuffled(goal: Point) -> ClassicSolver {
        ClassicSolver::new(goal, Box::new(Unshuffled))
    }

    #[test]
    fn test_idle_until_seeded() {
        let grid = corridor();
        let mut solver = unshuffled(grid.end());
        assert_eq!(solver.phase(), SolverPhase::Idle);
        assert_eq!(solver.step(&grid), StepOutcome::NoOp);
        assert_eq!(solver.snapshot().steps, 0);
    }

    #[test]
    fn test_corridor_step_count_and_path() {
        let grid = corridor();
        let order = corridor_order();
        let mut solver = unshuffled(grid.end());
        solver.seed(grid.start());

        let mut ticks = 0;
        while !solver.is_finished() {
            solver.step(&grid);
            ticks += 1;
            assert!(ticks <= grid.len());
        }

        assert_eq!(solver.snapshot().steps as usize, order.len() - 1);
        assert_eq!(solver.snapshot().path, order);
        assert!(solver.snapshot().frontier.is_empty());
    }

    #[test]
    fn test_single_head_frontier() {
        let grid = corridor();
        let mut solver = unshuffled(grid.end());
        solver.seed(grid.start());
        assert_eq!(solver.step(&grid), StepOutcome::Advanced);
        assert_eq!(solver.snapshot().frontier, vec![Point::new(1, 1)]);
        assert_eq!(solver.step(&grid), StepOutcome::Advanced);
        assert_eq!(solver.snapshot().frontier, vec![Point::new(2, 1)]);
        assert_eq!(solver.snapshot().explored(), 3);
    }

    #[test]
    fn test_each_tick_adds_one_step_and_never_shrinks_visited() {
        let grid = generate_maze(15, 15, &mut Unshuffled).unwrap();
        let mut solver = ClassicSolver::new(grid.end(), Box::new(Shuffled::seeded(5)));
        solver.seed(grid.start());

        let mut last = solver.snapshot().clone();
        while !solver.is_finished() {
            let outcome = solver.step(&grid);
            let now = solver.snapshot();
            match outcome {
                StepOutcome::Advanced => {
                    assert_eq!(now.steps, last.steps + 1);
                    assert!(last.visited.is_subset(&now.visited));
                }
                StepOutcome::Solved => {
                    assert_eq!(now.steps, last.steps);
                    assert_eq!(now.visited, last.visited);
                }
                other => panic!("unexpected outcome {other:?}"),
            }
            last = now.clone();
        }
        assert_walkable(&grid, &solver.snapshot().path);
    }

    #[test]
    fn test_finished_is_idempotent() {
        let grid = corridor();
        let mut solver = unshuffled(grid.end());
        solver.seed(grid.start());
        while solver.step(&grid) != StepOutcome::Solved {}
        let done = solver.snapshot().clone();
        for _ in 0..5 {
            assert_eq!(solver.step(&grid), StepOutcome::NoOp);
        }
        assert_eq!(solver.snapshot(), &done);
    }

    #[test]
    fn test_unreachable_goal_exhausts() {
        // End is walled off from the start
        let grid = Grid::from_ascii("#####\n#S..#\n#####\n#..E#\n#####\n").unwrap();
        let mut solver = unshuffled(grid.end());
        solver.seed(grid.start());
        for _ in 0..3 {
            assert_eq!(solver.step(&grid), StepOutcome::Advanced);
        }
        let stalled = solver.snapshot().clone();
        assert_eq!(solver.step(&grid), StepOutcome::Exhausted);
        assert_eq!(solver.step(&grid), StepOutcome::Exhausted);
        assert_eq!(solver.phase(), SolverPhase::Running);
        assert_eq!(solver.snapshot(), &stalled);
    }

    #[test]
    fn test_injected_order_drives_the_head() {
        // Fork at (1,1): east corridor and south corridor both reach the end.
        let grid = Grid::from_ascii("#####\n#S..#\n#.#.#\n#..E#\n#####\n").unwrap();

        // Pushing E before S means S is popped first (LIFO).
        let mut solver = unshuffled(grid.end());
        solver.seed(grid.start());
        solver.step(&grid);
        solver.step(&grid);
        assert_eq!(solver.snapshot().frontier, vec![Point::new(1, 2)]);

        let mut reverse = ClassicSolver::new(
            grid.end(),
            Box::new(|dirs: &mut [Direction; 4]| dirs.reverse()),
        );
        reverse.seed(grid.start());
        reverse.step(&grid);
        reverse.step(&grid);
        assert_eq!(reverse.snapshot().frontier, vec![Point::new(2, 1)]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let grid = corridor();
        let mut solver = unshuffled(grid.end());
        solver.seed(grid.start());
        while !solver.is_finished() {
            solver.step(&grid);
        }
        solver.reset(grid.end());
        assert_eq!(solver.phase(), SolverPhase::Idle);
        assert_eq!(solver.snapshot(), &SolverSnapshot::new(CLASSIC_NAME));
        assert!(solver.pending().is_empty());
    }
}
