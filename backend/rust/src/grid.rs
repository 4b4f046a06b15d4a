// grid.rs - Maze cell grid, coordinates and packed cell keys

use std::collections::VecDeque;
use std::fmt;

use nohash_hasher::{IntMap, IntSet};
use serde::{Deserialize, Serialize};

use crate::error::{MazeError, Result};

/// Smallest odd side length that still leaves an interior lattice.
pub const MIN_DIMENSION: usize = 5;

/// Coordinates are packed into 16 bits each; keep well below that.
pub const MAX_DIMENSION: usize = 4095;

// ============================================================================
// COORDINATES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    #[inline]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Move `distance` cells in `dir`, or `None` when that leaves the u16 domain.
    #[inline]
    pub fn step(self, dir: Direction, distance: u16) -> Option<Point> {
        let (dx, dy) = dir.delta();
        let distance = i32::from(distance);
        let x = u16::try_from(i32::from(self.x) + dx * distance).ok()?;
        let y = u16::try_from(i32::from(self.y) + dy * distance).ok()?;
        Some(Point::new(x, y))
    }

    #[inline]
    pub fn manhattan(self, other: Point) -> u32 {
        u32::from(self.x.abs_diff(other.x)) + u32::from(self.y.abs_diff(other.y))
    }

    #[inline]
    pub const fn key(self) -> CellKey {
        CellKey::from_point(self)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Cardinal directions in the fixed N/E/S/W order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}

/// Identity of a cell for visited sets and parent maps: `(y << 16) | x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellKey(u32);

impl CellKey {
    #[inline]
    pub const fn from_point(point: Point) -> Self {
        CellKey(((point.y as u32) << 16) | point.x as u32)
    }

    #[inline]
    pub const fn point(self) -> Point {
        Point::new((self.0 & 0xFFFF) as u16, (self.0 >> 16) as u16)
    }
}

// The derived Hash writes the single u32, which is what NoHashHasher expects.
impl nohash_hasher::IsEnabled for CellKey {}

impl From<Point> for CellKey {
    fn from(point: Point) -> Self {
        CellKey::from_point(point)
    }
}

impl From<CellKey> for Point {
    fn from(key: CellKey) -> Self {
        key.point()
    }
}

/// Keys a solver has discovered. Only ever grows while a maze is live.
pub type VisitedSet = IntSet<CellKey>;

// ============================================================================
// CELLS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Wall,
    Path,
    Start,
    End,
}

impl CellKind {
    #[inline]
    pub fn is_open(self) -> bool {
        self != CellKind::Wall
    }

    fn as_char(self) -> char {
        match self {
            CellKind::Wall => '#',
            CellKind::Path => '.',
            CellKind::Start => 'S',
            CellKind::End => 'E',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub x: u16,
    pub y: u16,
    #[serde(rename = "type")]
    pub kind: CellKind,
}

impl Cell {
    #[inline]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

// ============================================================================
// GRID
// ============================================================================

/// Row-major maze grid. Read-only once generation has finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

/// Reject dimensions the 2-step carving lattice cannot handle.
pub fn validate_dimensions(width: usize, height: usize) -> Result<()> {
    for (axis, value) in [("width", width), ("height", height)] {
        if value < MIN_DIMENSION {
            return Err(MazeError::TooSmall {
                axis,
                value,
                min: MIN_DIMENSION,
            });
        }
        if value > MAX_DIMENSION {
            return Err(MazeError::TooLarge {
                axis,
                value,
                max: MAX_DIMENSION,
            });
        }
        if value % 2 == 0 {
            return Err(MazeError::EvenDimension { axis, value });
        }
    }
    Ok(())
}

impl Grid {
    /// Grid of a single kind. Dimensions must already be validated.
    pub(crate) fn filled(width: u16, height: u16, kind: CellKind) -> Self {
        let mut cells = Vec::with_capacity(usize::from(width) * usize::from(height));
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell { x, y, kind });
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        usize::from(self.width)
    }

    #[inline]
    pub fn height(&self) -> usize {
        usize::from(self.height)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Fixed entry cell.
    #[inline]
    pub fn start(&self) -> Point {
        Point::new(1, 1)
    }

    /// Fixed exit cell, diagonally opposite the start.
    #[inline]
    pub fn end(&self) -> Point {
        Point::new(self.width - 2, self.height - 2)
    }

    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x < self.width && point.y < self.height
    }

    #[inline]
    fn index(&self, point: Point) -> Option<usize> {
        self.contains(point)
            .then(|| usize::from(point.y) * self.width() + usize::from(point.x))
    }

    pub fn cell(&self, point: Point) -> Option<&Cell> {
        self.index(point).map(|i| &self.cells[i])
    }

    pub fn kind(&self, point: Point) -> Option<CellKind> {
        self.cell(point).map(|c| c.kind)
    }

    /// In bounds and not a wall.
    #[inline]
    pub fn is_open(&self, point: Point) -> bool {
        matches!(self.kind(point), Some(kind) if kind.is_open())
    }

    pub(crate) fn set_kind(&mut self, point: Point, kind: CellKind) {
        if let Some(i) = self.index(point) {
            self.cells[i].kind = kind;
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rows top to bottom, for layout by renderers.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width())
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells
            .iter()
            .filter(|c| c.kind.is_open())
            .map(Cell::point)
    }

    /// Open cells one step away from `point`, visited in `order`.
    pub fn open_neighbors(&self, point: Point, order: &[Direction; 4]) -> heapless::Vec<Point, 4> {
        let mut out = heapless::Vec::new();
        for &dir in order {
            if let Some(next) = point.step(dir, 1) {
                if self.is_open(next) {
                    // Capacity equals the number of directions.
                    let _ = out.push(next);
                }
            }
        }
        out
    }

    /// Breadth-first distance in grid steps between two open cells.
    ///
    /// Independent of the solvers; used as the reference the wavefront
    /// search is measured against.
    pub fn shortest_distance(&self, from: Point, to: Point) -> Option<u32> {
        if !self.is_open(from) || !self.is_open(to) {
            return None;
        }
        let mut distances: IntMap<CellKey, u32> = IntMap::default();
        let mut queue = VecDeque::new();
        distances.insert(from.key(), 0);
        queue.push_back(from);

        while let Some(current) = queue.pop_front() {
            let dist = distances.get(&current.key()).copied().unwrap_or_default();
            if current == to {
                return Some(dist);
            }
            for next in self.open_neighbors(current, &Direction::ALL) {
                if !distances.contains_key(&next.key()) {
                    distances.insert(next.key(), dist + 1);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    /// Parse a text maze: `#` wall, `.` or space open, `S` start, `E` end.
    ///
    /// The layout must satisfy the same shape rules as a generated maze:
    /// odd dimensions, a solid wall border, start at (1,1) and end at
    /// (width-2, height-2).
    pub fn from_ascii(text: &str) -> Result<Grid> {
        // `lines` already drops "\r\n" endings; spaces are open cells and stay
        let mut lines: Vec<&str> = text.lines().collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        if let Some(blank) = lines.iter().position(|line| line.is_empty()) {
            return Err(MazeError::Parse {
                line: blank + 1,
                reason: "blank line inside the maze".to_string(),
            });
        }

        let height = lines.len();
        let width = lines.first().map_or(0, |l| l.chars().count());
        validate_dimensions(width, height)?;

        // Bounded by MAX_DIMENSION above.
        let mut grid = Grid::filled(width as u16, height as u16, CellKind::Wall);
        let mut starts = Vec::new();
        let mut ends = Vec::new();

        for (y, line) in lines.iter().enumerate() {
            let row_width = line.chars().count();
            if row_width != width {
                return Err(MazeError::Parse {
                    line: y + 1,
                    reason: format!("expected {width} columns, found {row_width}"),
                });
            }
            for (x, ch) in line.chars().enumerate() {
                let kind = match ch {
                    '#' => CellKind::Wall,
                    '.' | ' ' => CellKind::Path,
                    'S' => CellKind::Start,
                    'E' => CellKind::End,
                    other => {
                        return Err(MazeError::Parse {
                            line: y + 1,
                            reason: format!("unexpected character {other:?} at column {}", x + 1),
                        })
                    }
                };
                let point = Point::new(x as u16, y as u16);
                match kind {
                    CellKind::Start => starts.push(point),
                    CellKind::End => ends.push(point),
                    _ => {}
                }
                grid.set_kind(point, kind);
            }
        }

        if starts != [grid.start()] {
            return Err(MazeError::Layout(format!(
                "expected a single start at {}, found {:?}",
                grid.start(),
                starts
            )));
        }
        if ends != [grid.end()] {
            return Err(MazeError::Layout(format!(
                "expected a single end at {}, found {:?}",
                grid.end(),
                ends
            )));
        }
        if let Some(open) = grid.border().find(|p| grid.is_open(*p)) {
            return Err(MazeError::Layout(format!("border cell {open} is not a wall")));
        }

        Ok(grid)
    }

    /// Every cell on the outer ring.
    pub fn border(&self) -> impl Iterator<Item = Point> + '_ {
        let (w, h) = (self.width, self.height);
        self.cells
            .iter()
            .map(Cell::point)
            .filter(move |p| p.x == 0 || p.y == 0 || p.x == w - 1 || p.y == h - 1)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{}", cell.kind.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
