// lib.rs - Library exports for maze-race-renderer
// Configuration, the tick loop and the text/PNG views around maze_race_solver

pub mod config;
pub mod error_handling;
pub mod png_renderer;
pub mod runner;
pub mod shading;
pub mod stats;
pub mod text_renderer;

// Re-export commonly used types
pub use config::{RaceConfig, RaceConfigBuilder};
pub use error_handling::{RaceError, Result};
pub use png_renderer::PngRenderer;
pub use runner::{forward_commands, spawn_stdin_commands, Command, RaceRunner, RunEvent};
pub use shading::{CellShade, Color, Palette, ShadedFrame};
pub use stats::{RaceStats, SolverStats};
pub use text_renderer::TextRenderer;
