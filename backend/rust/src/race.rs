// race.rs - Simulation driver: one maze, two solvers, start/pause/reset/tick

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::generator::MazeGenerator;
use crate::grid::Grid;
use crate::order::{DirectionOrder, Shuffled};
use crate::solver::{ClassicSolver, QuantumSolver, Solver, SolverSnapshot, StepOutcome};

/// Maze side length used when nothing else is asked for.
pub const DEFAULT_MAZE_SIZE: usize = 29;

/// Driver lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RacePhase {
    /// Fresh maze; solvers are not seeded yet.
    Idle,
    Running,
    /// Ticks are ignored; all traversal state is kept.
    Paused,
    /// Both solvers reached the goal. Only `reset` leaves this phase.
    Finished,
}

/// Result of one driver tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub classic: StepOutcome,
    pub quantum: StepOutcome,
    pub phase: RacePhase,
}

impl TickReport {
    fn skipped(phase: RacePhase) -> Self {
        Self {
            classic: StepOutcome::NoOp,
            quantum: StepOutcome::NoOp,
            phase,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.classic == StepOutcome::NoOp && self.quantum == StepOutcome::NoOp
    }
}

/// Owns the live grid and both solvers' workspaces.
///
/// The grid is only replaced by `reset`; between resets both solvers read
/// it without ever writing to it.
pub struct Race {
    generator: MazeGenerator,
    maze_order: Box<dyn DirectionOrder + Send>,
    grid: Grid,
    classic: ClassicSolver,
    quantum: QuantumSolver,
    phase: RacePhase,
    ticks: u64,
}

impl Race {
    /// Square maze with OS-seeded randomness.
    pub fn new(size: usize) -> Result<Self> {
        RaceBuilder::new().size(size).build()
    }

    /// Square maze whose carving and classic shuffles replay for a seed.
    pub fn seeded(size: usize, seed: u64) -> Result<Self> {
        RaceBuilder::new().size(size).seed(seed).build()
    }

    pub fn builder() -> RaceBuilder {
        RaceBuilder::new()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == RacePhase::Running
    }

    pub fn is_finished(&self) -> bool {
        self.phase == RacePhase::Finished
    }

    /// Ticks applied since the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn classic(&self) -> &SolverSnapshot {
        self.classic.snapshot()
    }

    pub fn quantum(&self) -> &SolverSnapshot {
        self.quantum.snapshot()
    }

    /// Begin a fresh run or resume a paused one.
    pub fn start(&mut self) {
        match self.phase {
            RacePhase::Idle => {
                let start = self.grid.start();
                self.classic.seed(start);
                self.quantum.seed(start);
                self.phase = RacePhase::Running;
                log::info!(
                    "Race started on {}x{} maze from {} to {}",
                    self.grid.width(),
                    self.grid.height(),
                    start,
                    self.grid.end()
                );
            }
            RacePhase::Paused => {
                self.phase = RacePhase::Running;
                log::info!("Race resumed at tick {}", self.ticks);
            }
            RacePhase::Running | RacePhase::Finished => {
                log::debug!("Start ignored while {:?}", self.phase);
            }
        }
    }

    pub fn pause(&mut self) {
        if self.phase == RacePhase::Running {
            self.phase = RacePhase::Paused;
            log::info!("Race paused at tick {}", self.ticks);
        } else {
            log::debug!("Pause ignored while {:?}", self.phase);
        }
    }

    /// Throw away all traversal state and carve a new maze.
    pub fn reset(&mut self) {
        self.grid = self.generator.generate(self.maze_order.as_mut());
        let goal = self.grid.end();
        self.classic.reset(goal);
        self.quantum.reset(goal);
        self.phase = RacePhase::Idle;
        self.ticks = 0;
        log::info!(
            "New {}x{} maze generated",
            self.grid.width(),
            self.grid.height()
        );
    }

    /// Advance both solvers by one unit of work each.
    pub fn tick(&mut self) -> TickReport {
        if self.phase != RacePhase::Running {
            return TickReport::skipped(self.phase);
        }

        let classic = self.classic.step(&self.grid);
        let quantum = self.quantum.step(&self.grid);
        self.ticks += 1;

        if self.classic.is_finished() && self.quantum.is_finished() {
            self.phase = RacePhase::Finished;
            log::info!(
                "Race finished after {} ticks: {} took {} steps, {} took {} steps",
                self.ticks,
                self.classic.name(),
                self.classic.snapshot().steps,
                self.quantum.name(),
                self.quantum.snapshot().steps
            );
        }

        TickReport {
            classic,
            quantum,
            phase: self.phase,
        }
    }
}

impl std::fmt::Debug for Race {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Race")
            .field("generator", &self.generator)
            .field("phase", &self.phase)
            .field("ticks", &self.ticks)
            .field("classic", &self.classic)
            .field("quantum", &self.quantum)
            .finish_non_exhaustive()
    }
}

/// Builder for a `Race` with explicit sizes, seeds or injected orderings.
pub struct RaceBuilder {
    width: usize,
    height: usize,
    seed: Option<u64>,
    grid: Option<Grid>,
    maze_order: Option<Box<dyn DirectionOrder + Send>>,
    classic_order: Option<Box<dyn DirectionOrder + Send>>,
}

impl RaceBuilder {
    pub fn new() -> Self {
        Self {
            width: DEFAULT_MAZE_SIZE,
            height: DEFAULT_MAZE_SIZE,
            seed: None,
            grid: None,
            maze_order: None,
            classic_order: None,
        }
    }

    pub fn size(self, size: usize) -> Self {
        self.dimensions(size, size)
    }

    pub fn dimensions(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Race on a ready-made grid. Later resets carve mazes of the same size,
    /// whatever `size` or `dimensions` say.
    pub fn grid(mut self, grid: Grid) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn maze_order(mut self, order: impl DirectionOrder + Send + 'static) -> Self {
        self.maze_order = Some(Box::new(order));
        self
    }

    pub fn classic_order(mut self, order: impl DirectionOrder + Send + 'static) -> Self {
        self.classic_order = Some(Box::new(order));
        self
    }

    pub fn build(self) -> Result<Race> {
        // a supplied grid fixes the size of every later reset
        let (width, height) = match &self.grid {
            Some(grid) => (grid.width(), grid.height()),
            None => (self.width, self.height),
        };
        let generator = MazeGenerator::new(width, height)?;

        let mut root = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut maze_order = self
            .maze_order
            .unwrap_or_else(|| Box::new(Shuffled::seeded(root.gen())));
        let classic_order = self
            .classic_order
            .unwrap_or_else(|| Box::new(Shuffled::seeded(root.gen())));

        let grid = match self.grid {
            Some(grid) => grid,
            None => generator.generate(maze_order.as_mut()),
        };
        let goal = grid.end();
        log::info!("Maze ready: {}x{}", grid.width(), grid.height());

        Ok(Race {
            generator,
            maze_order,
            grid,
            classic: ClassicSolver::new(goal, classic_order),
            quantum: QuantumSolver::new(goal),
            phase: RacePhase::Idle,
            ticks: 0,
        })
    }
}

impl Default for RaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MazeError;
    use crate::order::Unshuffled;
    use crate::solver::testing::corridor;

    #[test]
    fn test_ticks_ignored_until_started() {
        let mut race = Race::seeded(11, 1).unwrap();
        assert_eq!(race.phase(), RacePhase::Idle);
        assert!(race.tick().is_noop());
        assert_eq!(race.ticks(), 0);
        assert_eq!(race.classic().steps, 0);
    }

    #[test]
    fn test_runs_to_joint_completion() {
        let mut race = Race::seeded(15, 42).unwrap();
        race.start();
        let limit = race.grid().len() as u64;
        while !race.is_finished() {
            race.tick();
            assert!(race.ticks() <= limit);
        }
        assert!(race.classic().finished);
        assert!(race.quantum().finished);
        assert!(race.quantum().steps <= race.classic().steps);

        // the tick source is stopped: further ticks change nothing
        let ticks = race.ticks();
        assert!(race.tick().is_noop());
        assert_eq!(race.ticks(), ticks);
    }

    #[test]
    fn test_pause_preserves_and_resume_does_not_reseed() {
        let mut race = Race::builder()
            .grid(corridor())
            .classic_order(Unshuffled)
            .build()
            .unwrap();
        race.start();
        race.tick();
        race.tick();
        race.pause();
        assert_eq!(race.phase(), RacePhase::Paused);

        let classic = race.classic().clone();
        let quantum = race.quantum().clone();
        for _ in 0..3 {
            assert!(race.tick().is_noop());
        }
        assert_eq!(race.classic(), &classic);
        assert_eq!(race.quantum(), &quantum);

        race.start();
        let report = race.tick();
        assert_eq!(report.classic, StepOutcome::Advanced);
        assert_eq!(race.classic().steps, 3);
        assert_eq!(race.quantum().steps, 3);
    }

    #[test]
    fn test_reset_discards_state() {
        let mut race = Race::seeded(9, 7).unwrap();
        race.start();
        for _ in 0..5 {
            race.tick();
        }
        race.reset();

        assert_eq!(race.phase(), RacePhase::Idle);
        assert_eq!(race.ticks(), 0);
        for snapshot in [race.classic(), race.quantum()] {
            assert!(snapshot.visited.is_empty());
            assert_eq!(snapshot.steps, 0);
            assert!(!snapshot.finished);
        }
        assert_eq!(race.grid().width(), 9);
    }

    #[test]
    fn test_start_after_finish_needs_reset() {
        let mut race = Race::builder().grid(corridor()).build().unwrap();
        race.start();
        while !race.is_finished() {
            race.tick();
        }
        race.start();
        assert_eq!(race.phase(), RacePhase::Finished);
        race.reset();
        race.start();
        assert_eq!(race.phase(), RacePhase::Running);
    }

    #[test]
    fn test_supplied_grid_fixes_reset_size() {
        let mut race = Race::builder()
            .grid(corridor())
            .dimensions(11, 9)
            .seed(4)
            .build()
            .unwrap();
        let (width, height) = (race.grid().width(), race.grid().height());
        race.reset();
        assert_eq!(race.grid().width(), width);
        assert_eq!(race.grid().height(), height);
    }

    #[test]
    fn test_rejects_bad_size() {
        assert!(matches!(Race::new(10), Err(MazeError::EvenDimension { .. })));
    }

    #[test]
    fn test_seed_reproduces_maze() {
        let a = Race::seeded(21, 3).unwrap();
        let b = Race::seeded(21, 3).unwrap();
        assert_eq!(a.grid(), b.grid());
        let custom = Race::builder().size(5).maze_order(Unshuffled).build().unwrap();
        assert_eq!(custom.grid().to_string(), "#####\n#S..#\n###.#\n#..E#\n#####\n");
    }
}
