//! Maze generation and two step-wise search simulators racing on it.
//!
//! A [`Race`] owns one generated [`Grid`] and two solvers: the
//! [`ClassicSolver`] pops a single cell per tick from a stack, the
//! [`QuantumSolver`] expands its whole wavefront per tick. Both publish a
//! [`SolverSnapshot`] after every tick for whatever renders them.

pub mod error;
pub mod generator;
pub mod grid;
pub mod order;
pub mod path;
pub mod race;
pub mod solver;

// Re-export commonly used types
pub use error::{MazeError, Result};
pub use generator::{generate_maze, MazeGenerator};
pub use grid::{Cell, CellKey, CellKind, Direction, Grid, Point, VisitedSet};
pub use order::{DirectionOrder, Shuffled, Unshuffled};
pub use path::{reconstruct_path, ParentMap};
pub use race::{Race, RaceBuilder, RacePhase, TickReport, DEFAULT_MAZE_SIZE};
pub use solver::{
    ClassicSolver, QuantumSolver, Solver, SolverPhase, SolverSnapshot, StepOutcome,
};
