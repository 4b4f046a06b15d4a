// shading.rs - Cell classification and per-solver colour themes

use maze_race_solver::{Cell, CellKey, CellKind, Grid, Point, SolverSnapshot};
use nohash_hasher::IntSet;
use serde::{Deserialize, Serialize};

// ============================================================================
// CELL SHADES
// ============================================================================

/// What a cell looks like in one solver's frame.
///
/// Static kinds win first (wall, start, end); of the search overlays the
/// solution path beats the frontier, which beats plain visited cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellShade {
    Wall,
    Start,
    End,
    Path,
    Frontier,
    Visited,
    Open,
}

impl CellShade {
    pub fn glyph(self) -> char {
        match self {
            CellShade::Wall => '#',
            CellShade::Start => 'S',
            CellShade::End => 'E',
            CellShade::Path => '*',
            CellShade::Frontier => '@',
            CellShade::Visited => '.',
            CellShade::Open => ' ',
        }
    }
}

/// A snapshot laid over the grid, ready for per-cell lookups.
pub struct ShadedFrame<'a> {
    grid: &'a Grid,
    snapshot: &'a SolverSnapshot,
    path: IntSet<CellKey>,
    frontier: IntSet<CellKey>,
}

impl<'a> ShadedFrame<'a> {
    pub fn new(grid: &'a Grid, snapshot: &'a SolverSnapshot) -> Self {
        Self {
            grid,
            snapshot,
            path: snapshot.path.iter().map(|p| p.key()).collect(),
            frontier: snapshot.frontier.iter().map(|p| p.key()).collect(),
        }
    }

    pub fn shade(&self, cell: &Cell) -> CellShade {
        let key = cell.point().key();
        match cell.kind {
            CellKind::Wall => CellShade::Wall,
            CellKind::Start => CellShade::Start,
            CellKind::End => CellShade::End,
            CellKind::Path if self.path.contains(&key) => CellShade::Path,
            CellKind::Path if self.frontier.contains(&key) => CellShade::Frontier,
            CellKind::Path if self.snapshot.visited.contains(&key) => CellShade::Visited,
            CellKind::Path => CellShade::Open,
        }
    }

    pub fn shade_at(&self, point: Point) -> Option<CellShade> {
        self.grid.cell(point).map(|cell| self.shade(cell))
    }
}

// ============================================================================
// COLOUR TYPE
// ============================================================================

/// RGBA colour with components in 0..=1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// From a 0xRRGGBB literal.
    pub fn hex(rgb: u32) -> Self {
        Self::new(
            ((rgb >> 16) & 0xFF) as f32 / 255.0,
            ((rgb >> 8) & 0xFF) as f32 / 255.0,
            (rgb & 0xFF) as f32 / 255.0,
            1.0,
        )
    }

    #[inline]
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

// ============================================================================
// THEMES
// ============================================================================

// Tailwind swatches, 0xRRGGBB
const SLATE_950: u32 = 0x020617;
const SLATE_800: u32 = 0x1E293B;
const GREEN_500: u32 = 0x22C55E;
const RED_600: u32 = 0xDC2626;
const WHITE: u32 = 0xFFFFFF;
const AMBER_500: u32 = 0xF59E0B;
const CYAN_400: u32 = 0x22D3EE;
const CYAN_500: u32 = 0x06B6D4;

/// Visited cells are the theme colour at 30% over the background.
const VISITED_MIX: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub wall: Color,
    pub start: Color,
    pub end: Color,
    pub path: Color,
    pub frontier: Color,
    pub visited: Color,
    pub open: Color,
}

impl Palette {
    fn themed(frontier: u32, visited_base: u32) -> Self {
        let background = Color::hex(SLATE_950);
        Self {
            wall: Color::hex(SLATE_800),
            start: Color::hex(GREEN_500),
            end: Color::hex(RED_600),
            path: Color::hex(WHITE),
            frontier: Color::hex(frontier),
            visited: background.lerp(Color::hex(visited_base), VISITED_MIX),
            open: background,
        }
    }

    /// Amber theme of the sequential solver.
    pub fn classic() -> Self {
        Self::themed(AMBER_500, AMBER_500)
    }

    /// Cyan theme of the wavefront solver.
    pub fn quantum() -> Self {
        Self::themed(CYAN_400, CYAN_500)
    }

    pub fn background(&self) -> Color {
        self.open
    }

    pub fn color(&self, shade: CellShade) -> Color {
        match shade {
            CellShade::Wall => self.wall,
            CellShade::Start => self.start,
            CellShade::End => self.end,
            CellShade::Path => self.path,
            CellShade::Frontier => self.frontier,
            CellShade::Visited => self.visited,
            CellShade::Open => self.open,
        }
    }
}
