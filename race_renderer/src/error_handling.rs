// error_handling.rs - Error types for configuration, rendering and the tick loop

use maze_race_solver::MazeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RaceError {
    #[error("Invalid maze: {0}")]
    Maze(#[from] MazeError),

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Image processing failed: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Race still running after {ticks} ticks")]
    TickBudgetExhausted { ticks: u64 },

    #[error("Race cannot finish: {solver} ran out of cells after {ticks} ticks")]
    Stalled { solver: String, ticks: u64 },

    #[error("Unknown command {input:?} (expected start, pause, reset or quit)")]
    UnknownCommand { input: String },

    #[error("Frame of {width}x{height} pixels exceeds the {max} pixel limit")]
    FrameTooLarge { width: u64, height: u64, max: u64 },
}

impl RaceError {
    pub fn config(reason: impl Into<String>) -> Self {
        RaceError::InvalidConfig {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RaceError>;
