use serde::{Deserialize, Serialize};

use crate::Coord2;

/// Canonical player-visible state stored by the engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Flagged,
    Revealed,
}

impl CellState {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

/// What a cell should look like, including the end-of-game categories.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Hidden,
    Flagged,
    Empty,
    /// Revealed with `1..=8` adjacent mines.
    Danger(u8),
    /// The mine that was stepped on.
    Mine,
    /// An unflagged mine shown once the game ended.
    MineExposed,
    /// A flag placed on a safe cell, shown once the game ended.
    FlagIncorrect,
    /// A flag placed on a mine, shown once the game ended.
    FlagCorrect,
}

impl Tile {
    pub const fn from_count(count: u8) -> Self {
        match count {
            0 => Self::Empty,
            n => Self::Danger(n),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellUpdate {
    pub coords: Coord2,
    pub tile: Tile,
}

impl CellUpdate {
    pub const fn new(coords: Coord2, tile: Tile) -> Self {
        Self { coords, tile }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagUpdate {
    pub coords: Coord2,
    pub flagged: bool,
}

impl FlagUpdate {
    pub const fn tile(self) -> Tile {
        if self.flagged { Tile::Flagged } else { Tile::Hidden }
    }
}
