#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod tile;
mod types;

/// Which condition ends the game in a win.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinRule {
    /// Every safe cell is revealed, flags are irrelevant.
    #[default]
    RevealAllSafe,
    /// Revealed plus flagged cells cover the whole board, also checked after flagging.
    RevealedPlusFlagged,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub columns: Coord,
    pub mines: CellCount,
    #[serde(default)]
    pub win_rule: WinRule,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, columns: Coord, mines: CellCount) -> Self {
        Self {
            rows,
            columns,
            mines,
            win_rule: WinRule::RevealAllSafe,
        }
    }

    /// Strict constructor, out of range values are rejected.
    pub fn new(rows: Coord, columns: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(rows, columns, mines);
        config.validate()?;
        Ok(config)
    }

    /// Forces arbitrary user input into the accepted ranges, sides first and then mines.
    pub fn clamped(rows: Coord, columns: Coord, mines: CellCount) -> Self {
        let rows = rows.clamp(MIN_SIDE, MAX_SIDE);
        let columns = columns.clamp(MIN_SIDE, MAX_SIDE);
        let mines = mines.clamp(1, mult(rows, columns) - 1);
        Self::new_unchecked(rows, columns, mines)
    }

    pub const fn with_win_rule(self, win_rule: WinRule) -> Self {
        Self { win_rule, ..self }
    }

    pub fn validate(&self) -> Result<()> {
        let side_range = MIN_SIDE..=MAX_SIDE;
        if !side_range.contains(&self.rows) || !side_range.contains(&self.columns) {
            return Err(GameError::InvalidDimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }

        let max = self.total_cells() - 1;
        if self.mines < 1 || self.mines > max {
            return Err(GameError::InvalidMineCount {
                mines: self.mines,
                max,
            });
        }

        Ok(())
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.columns)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.columns)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

/// Where the mines are, fixed for the lifetime of one game.
///
/// Neighbour counts are computed once on construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    adjacent_counts: Array2<u8>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Layout from a row-major mine mask, each side must be within `MIN_SIDE..=MAX_SIDE`.
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let side_range = usize::from(MIN_SIDE)..=usize::from(MAX_SIDE);
        let (rows, columns) = mine_mask.dim();
        if !side_range.contains(&rows) || !side_range.contains(&columns) {
            return Err(GameError::InvalidDimensions {
                rows: saturate_side(rows),
                columns: saturate_side(columns),
            });
        }
        Ok(Self::with_adjacent_counts(mine_mask))
    }

    /// Sides must fit in [`Coord`].
    fn with_adjacent_counts(mine_mask: Array2<bool>) -> Self {
        let mut adjacent_counts: Array2<u8> = Array2::zeros(mine_mask.dim());
        let (rows, columns) = board_size(&mine_mask);
        for row in 1..=rows {
            for col in 1..=columns {
                let coords = (row, col);
                adjacent_counts[coords.to_nd_index()] = mine_mask
                    .iter_neighbors(coords)
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count() as u8;
            }
        }

        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            adjacent_counts,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(nd_dim(size));

        for &coords in mine_coords {
            let (row, col) = coords;
            if row == 0 || col == 0 || row > size.0 || col > size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::with_adjacent_counts(mine_mask))
    }

    /// Builds a layout from 1-based row-major flat indices.
    pub fn from_mine_indices<I>(size: Coord2, indices: I) -> Result<Self>
    where
        I: IntoIterator<Item = CellCount>,
    {
        let total = mult(size.0, size.1);
        let coords = indices
            .into_iter()
            .map(|index| {
                if (1..=total).contains(&index) {
                    Ok(cell_coords(index, size.1))
                } else {
                    Err(GameError::InvalidIndex)
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_mine_coords(size, &coords)
    }

    pub fn game_config(&self) -> GameConfig {
        let (rows, columns) = self.size();
        GameConfig::new_unchecked(rows, columns, self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, columns) = self.size();
        let (row, col) = coords;
        if (1..=rows).contains(&row) && (1..=columns).contains(&col) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        board_size(&self.mine_mask)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.adjacent_counts[coords.to_nd_index()]
    }

    /// Mine positions in row-major order.
    pub fn mine_coords(&self) -> Vec<Coord2> {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord + 1, col as Coord + 1))
            .collect()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

impl Default for MineLayout {
    fn default() -> Self {
        Self::with_adjacent_counts(Array2::default(nd_dim((0, 0))))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

fn nd_dim((rows, columns): Coord2) -> (usize, usize) {
    (rows.into(), columns.into())
}

fn saturate_side(side: usize) -> Coord {
    Coord::try_from(side).unwrap_or(Coord::MAX)
}
