use flee_core::CellCoord;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("grid dimensions {width}x{height} must be non-zero and addressable")]
    InvalidDimensions { width: usize, height: usize },
    #[error("tile size must be a positive finite number (got {0})")]
    InvalidTileSize(f32),
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("cell {0} is outside the grid")]
    OutOfBounds(CellCoord),
}
