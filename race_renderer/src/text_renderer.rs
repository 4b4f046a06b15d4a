// text_renderer.rs - Side-by-side terminal frames for both solvers

use std::fmt::Write as _;

use maze_race_solver::{Grid, Race, SolverSnapshot};

use crate::shading::{Color, Palette, ShadedFrame};

/// Moves the cursor home and clears the terminal.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const RESET: &str = "\x1b[0m";

/// One rendered line plus its printable width (escape codes excluded).
struct Line {
    text: String,
    width: usize,
}

impl Line {
    fn plain(text: String) -> Self {
        let width = text.chars().count();
        Self { text, width }
    }
}

/// Draws frames as glyphs, optionally with 24-bit ANSI backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRenderer {
    ansi: bool,
    gap: usize,
}

impl TextRenderer {
    pub fn plain() -> Self {
        Self { ansi: false, gap: 4 }
    }

    pub fn ansi() -> Self {
        Self { ansi: true, gap: 4 }
    }

    pub fn with_gap(mut self, gap: usize) -> Self {
        self.gap = gap;
        self
    }

    /// Both solvers next to each other, classic on the left.
    pub fn render_race(&self, race: &Race) -> String {
        let left = self.solver_lines(race.grid(), race.classic(), &Palette::classic());
        let right = self.solver_lines(race.grid(), race.quantum(), &Palette::quantum());
        let left_width = left.iter().map(|l| l.width).max().unwrap_or(0);

        let mut out = String::new();
        for i in 0..left.len().max(right.len()) {
            let mut used = 0;
            if let Some(line) = left.get(i) {
                out.push_str(&line.text);
                used = line.width;
            }
            if let Some(line) = right.get(i) {
                let pad = left_width - used + self.gap;
                out.extend(std::iter::repeat(' ').take(pad));
                out.push_str(&line.text);
            }
            out.push('\n');
        }
        out
    }

    /// A single solver's frame with its header.
    pub fn render_solver(&self, grid: &Grid, snapshot: &SolverSnapshot, palette: &Palette) -> String {
        let mut out = String::new();
        for line in self.solver_lines(grid, snapshot, palette) {
            out.push_str(&line.text);
            out.push('\n');
        }
        out
    }

    fn solver_lines(&self, grid: &Grid, snapshot: &SolverSnapshot, palette: &Palette) -> Vec<Line> {
        let status = if snapshot.finished { " (solved)" } else { "" };
        let mut lines = vec![
            Line::plain(format!("{}{}", snapshot.name, status)),
            Line::plain(format!(
                "steps {:>5}  explored {:>5}",
                snapshot.steps,
                snapshot.explored()
            )),
        ];

        let frame = ShadedFrame::new(grid, snapshot);
        for row in grid.rows() {
            let mut text = String::with_capacity(row.len() * if self.ansi { 20 } else { 1 });
            let mut current: Option<Color> = None;
            for cell in row {
                let shade = frame.shade(cell);
                if self.ansi {
                    let color = palette.color(shade);
                    if current != Some(color) {
                        let [r, g, b, _] = color.to_rgba8();
                        let _ = write!(text, "\x1b[48;2;{r};{g};{b}m");
                        current = Some(color);
                    }
                }
                text.push(shade.glyph());
            }
            if self.ansi {
                text.push_str(RESET);
            }
            lines.push(Line {
                text,
                width: row.len(),
            });
        }
        lines
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::plain()
    }
}
