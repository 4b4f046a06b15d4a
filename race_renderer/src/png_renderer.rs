// png_renderer.rs - Raster frames of both solvers, encoded as PNG

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use log::info;
use maze_race_solver::{Grid, Race, SolverSnapshot};
use tokio::io::AsyncWriteExt;

use crate::config::{RaceConfig, DEFAULT_CELL_PIXELS};
use crate::error_handling::{RaceError, Result};
use crate::shading::{Palette, ShadedFrame};

/// Longest side, in pixels, of any frame we are willing to allocate.
pub const MAX_FRAME_SIDE: u64 = 16_384;

/// Paints each cell as a `cell_pixels` square, classic panel on the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngRenderer {
    cell_pixels: u32,
    /// Background margin around and between the panels.
    gap: u32,
}

impl PngRenderer {
    pub fn new(cell_pixels: u32) -> Self {
        Self {
            cell_pixels: cell_pixels.max(1),
            gap: cell_pixels.max(1),
        }
    }

    pub fn from_config(config: &RaceConfig) -> Self {
        Self::new(config.cell_pixels)
    }

    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    pub fn cell_pixels(&self) -> u32 {
        self.cell_pixels
    }

    /// Frame size for a grid, or `FrameTooLarge` if either side exceeds the cap.
    pub fn frame_size(&self, grid: &Grid) -> Result<(u32, u32)> {
        let panel_w = grid.width() as u64 * self.cell_pixels as u64;
        let panel_h = grid.height() as u64 * self.cell_pixels as u64;
        let gap = self.gap as u64;
        let width = 3 * gap + 2 * panel_w;
        let height = 2 * gap + panel_h;
        if width > MAX_FRAME_SIDE || height > MAX_FRAME_SIDE {
            return Err(RaceError::FrameTooLarge {
                width,
                height,
                max: MAX_FRAME_SIDE,
            });
        }
        Ok((width as u32, height as u32))
    }

    pub fn render_race(&self, race: &Race) -> Result<RgbaImage> {
        let grid = race.grid();
        let (width, height) = self.frame_size(grid)?;
        let classic = Palette::classic();
        let mut image = RgbaImage::from_pixel(width, height, Rgba(classic.background().to_rgba8()));

        let panel_w = grid.width() as u32 * self.cell_pixels;
        self.paint_panel(&mut image, self.gap, grid, race.classic(), &classic);
        self.paint_panel(
            &mut image,
            2 * self.gap + panel_w,
            grid,
            race.quantum(),
            &Palette::quantum(),
        );
        Ok(image)
    }

    /// A single solver's panel with a margin of `gap` all round.
    pub fn render_solver(
        &self,
        grid: &Grid,
        snapshot: &SolverSnapshot,
        palette: &Palette,
    ) -> Result<RgbaImage> {
        // the two-panel size bounds the single panel too
        self.frame_size(grid)?;
        let width = 2 * self.gap + grid.width() as u32 * self.cell_pixels;
        let height = 2 * self.gap + grid.height() as u32 * self.cell_pixels;
        let mut image = RgbaImage::from_pixel(width, height, Rgba(palette.background().to_rgba8()));
        self.paint_panel(&mut image, self.gap, grid, snapshot, palette);
        Ok(image)
    }

    fn paint_panel(
        &self,
        image: &mut RgbaImage,
        left: u32,
        grid: &Grid,
        snapshot: &SolverSnapshot,
        palette: &Palette,
    ) {
        let frame = ShadedFrame::new(grid, snapshot);
        let size = self.cell_pixels;
        for cell in grid.cells() {
            let pixel = Rgba(palette.color(frame.shade(cell)).to_rgba8());
            let x0 = left + cell.x as u32 * size;
            let y0 = self.gap + cell.y as u32 * size;
            for y in y0..y0 + size {
                for x in x0..x0 + size {
                    image.put_pixel(x, y, pixel);
                }
            }
        }
    }

    /// Encode the race frame as PNG into memory.
    pub fn encode(&self, race: &Race) -> Result<Vec<u8>> {
        let image = self.render_race(race)?;
        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(png)
    }

    /// Write the race frame to `path`, or to stdout when `path` is "-".
    pub async fn save<P: AsRef<Path>>(&self, race: &Race, path: P) -> Result<()> {
        let path = path.as_ref();
        let png = self.encode(race)?;

        if path == Path::new("-") {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(&png).await?;
            stdout.flush().await?;
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(path, &png).await?;
        info!("Saved frame to {}", path.display());
        Ok(())
    }
}

impl Default for PngRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_PIXELS)
    }
}
