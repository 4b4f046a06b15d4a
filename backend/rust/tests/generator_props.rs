//! Property-based tests for maze generation.
//!
//! Every generated maze must be a perfect maze: solid border, fixed
//! endpoints, and open cells forming a single spanning tree.

use std::collections::{HashSet, VecDeque};

use maze_race_solver::{generate_maze, CellKind, Direction, Grid, MazeError, Point, Shuffled};
use proptest::prelude::*;

fn odd_side() -> impl Strategy<Value = usize> {
    (2usize..=20).prop_map(|k| 2 * k + 1)
}

/// Adjacent open pairs, each counted once.
fn open_edges(grid: &Grid) -> usize {
    grid.open_cells()
        .map(|p| {
            [Direction::East, Direction::South]
                .into_iter()
                .filter_map(|dir| p.step(dir, 1))
                .filter(|n| grid.is_open(*n))
                .count()
        })
        .sum()
}

fn reachable_from(grid: &Grid, origin: Point) -> HashSet<Point> {
    let mut seen = HashSet::from([origin]);
    let mut queue = VecDeque::from([origin]);
    while let Some(p) = queue.pop_front() {
        for n in grid.open_neighbors(p, &Direction::ALL) {
            if seen.insert(n) {
                queue.push_back(n);
            }
        }
    }
    seen
}

proptest! {
    #[test]
    fn prop_border_is_solid(width in odd_side(), height in odd_side(), seed in any::<u64>()) {
        let grid = generate_maze(width, height, &mut Shuffled::seeded(seed)).unwrap();
        for p in grid.border() {
            prop_assert_eq!(grid.kind(p), Some(CellKind::Wall), "border cell {}", p);
        }
    }

    #[test]
    fn prop_single_start_and_end(width in odd_side(), height in odd_side(), seed in any::<u64>()) {
        let grid = generate_maze(width, height, &mut Shuffled::seeded(seed)).unwrap();
        let starts: Vec<Point> = grid.cells().iter()
            .filter(|c| c.kind == CellKind::Start).map(|c| c.point()).collect();
        let ends: Vec<Point> = grid.cells().iter()
            .filter(|c| c.kind == CellKind::End).map(|c| c.point()).collect();
        prop_assert_eq!(starts, vec![Point::new(1, 1)]);
        prop_assert_eq!(ends, vec![Point::new(width as u16 - 2, height as u16 - 2)]);
    }

    /// Connected and acyclic: every open cell is reachable and there is
    /// exactly one fewer passage than there are open cells.
    #[test]
    fn prop_open_cells_form_spanning_tree(width in odd_side(), height in odd_side(), seed in any::<u64>()) {
        let grid = generate_maze(width, height, &mut Shuffled::seeded(seed)).unwrap();
        let open = grid.open_cells().count();
        prop_assert_eq!(reachable_from(&grid, grid.start()).len(), open);
        prop_assert_eq!(open_edges(&grid), open - 1);
    }

    /// Every lattice cell (odd, odd) gets carved.
    #[test]
    fn prop_lattice_fully_carved(width in odd_side(), height in odd_side(), seed in any::<u64>()) {
        let grid = generate_maze(width, height, &mut Shuffled::seeded(seed)).unwrap();
        for y in (1..height as u16 - 1).step_by(2) {
            for x in (1..width as u16 - 1).step_by(2) {
                prop_assert!(grid.is_open(Point::new(x, y)), "lattice cell ({},{}) left solid", x, y);
            }
        }
    }

    #[test]
    fn prop_even_sides_rejected(k in 2usize..40, seed in any::<u64>()) {
        let result = generate_maze(2 * k, 2 * k + 1, &mut Shuffled::seeded(seed));
        prop_assert_eq!(result, Err(MazeError::EvenDimension { axis: "width", value: 2 * k }));
    }
}
