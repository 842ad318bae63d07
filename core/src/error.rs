use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Invalid cell index")]
    InvalidIndex,
    #[error("Invalid board size {rows}x{columns}, each side must be within 2..=70")]
    InvalidDimensions { rows: Coord, columns: Coord },
    #[error("Invalid mine count {mines}, must be within 1..={max}")]
    InvalidMineCount { mines: CellCount, max: CellCount },
    #[error("Mine generator ran out of positions")]
    GeneratorExhausted,
}

pub type Result<T> = core::result::Result<T, GameError>;
