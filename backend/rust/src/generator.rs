// generator.rs - Randomized depth-first maze carving on a 2-step lattice

use crate::error::Result;
use crate::grid::{validate_dimensions, CellKind, Grid, Point};
use crate::order::DirectionOrder;

/// Carves perfect mazes of a fixed, validated size.
///
/// Lattice cells sit on odd coordinates; carving from one to the next also
/// opens the wall cell between them, so the open cells always form a
/// spanning tree and the outer ring stays solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeGenerator {
    width: u16,
    height: u16,
}

impl MazeGenerator {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        validate_dimensions(width, height)?;
        // validate_dimensions caps both sides well inside u16
        Ok(Self {
            width: width as u16,
            height: height as u16,
        })
    }

    pub fn square(size: usize) -> Result<Self> {
        Self::new(size, size)
    }

    pub fn width(&self) -> usize {
        usize::from(self.width)
    }

    pub fn height(&self) -> usize {
        usize::from(self.height)
    }

    #[inline]
    fn is_interior(&self, point: Point) -> bool {
        point.x > 0 && point.x < self.width - 1 && point.y > 0 && point.y < self.height - 1
    }

    pub fn generate<O>(&self, order: &mut O) -> Grid
    where
        O: DirectionOrder + ?Sized,
    {
        let mut grid = Grid::filled(self.width, self.height, CellKind::Wall);
        let origin = grid.start();
        grid.set_kind(origin, CellKind::Path);

        let mut stack = vec![origin];
        while let Some(&current) = stack.last() {
            let carve = order.ordered().into_iter().find_map(|dir| {
                let next = current.step(dir, 2)?;
                let open = self.is_interior(next) && grid.kind(next) == Some(CellKind::Wall);
                open.then_some((dir, next))
            });

            match carve {
                Some((dir, next)) => {
                    if let Some(between) = current.step(dir, 1) {
                        grid.set_kind(between, CellKind::Path);
                    }
                    grid.set_kind(next, CellKind::Path);
                    stack.push(next);
                }
                None => {
                    stack.pop();
                }
            }
        }

        grid.set_kind(grid.start(), CellKind::Start);
        grid.set_kind(grid.end(), CellKind::End);

        log::debug!(
            "Carved {}x{} maze with {} open cells",
            self.width,
            self.height,
            grid.open_cells().count()
        );
        grid
    }
}

/// Validate the size and carve a maze in one call.
pub fn generate_maze<O>(width: usize, height: usize, order: &mut O) -> Result<Grid>
where
    O: DirectionOrder + ?Sized,
{
    Ok(MazeGenerator::new(width, height)?.generate(order))
}
