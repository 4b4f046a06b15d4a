// error.rs - Maze construction errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("Maze {axis} must be odd, got {value}")]
    EvenDimension { axis: &'static str, value: usize },

    #[error("Maze {axis} must be at least {min}, got {value}")]
    TooSmall {
        axis: &'static str,
        value: usize,
        min: usize,
    },

    #[error("Maze {axis} must be at most {max}, got {value}")]
    TooLarge {
        axis: &'static str,
        value: usize,
        max: usize,
    },

    #[error("Maze text line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("Invalid maze layout: {0}")]
    Layout(String),
}

pub type Result<T> = std::result::Result<T, MazeError>;
