use alloc::collections::VecDeque;
use alloc::vec::Vec;
use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> Active
/// - Active -> Won
/// - Active -> Lost
///
/// Any state goes back to Active through a new game.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    NotStarted,
    Active,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Owns one game from generation to the final board.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MinefieldEngine {
    mine_layout: MineLayout,
    board: Array2<CellState>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    status: GameStatus,
    win_rule: WinRule,
    triggered_mine: Option<Coord2>,
}

impl MinefieldEngine {
    /// Engine with no game yet, every coordinate is out of bounds until [`Self::new_game`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_layout(mine_layout: MineLayout, win_rule: WinRule) -> Result<Self> {
        let mut engine = Self::new();
        engine.restart_with_layout(mine_layout, win_rule)?;
        Ok(engine)
    }

    /// Discards the current game and starts a freshly generated one.
    ///
    /// Nothing changes when the config is rejected or generation fails.
    pub fn new_game<G>(&mut self, config: GameConfig, generator: &mut G) -> Result<()>
    where
        G: MinefieldGenerator + ?Sized,
    {
        config.validate()?;
        let mine_layout = generator.generate(&config)?;
        self.restart_with_layout(mine_layout, config.win_rule)
    }

    pub fn restart_with_layout(&mut self, mine_layout: MineLayout, win_rule: WinRule) -> Result<()> {
        let config = mine_layout.game_config();
        config.validate()?;
        if config.total_cells() != mine_layout.total_cells() {
            return Err(GameError::InvalidDimensions {
                rows: config.rows,
                columns: config.columns,
            });
        }

        let (rows, columns) = mine_layout.size();
        log::debug!(
            "New game {}x{} with {} mines, {:?}",
            rows,
            columns,
            mine_layout.mine_count(),
            win_rule
        );
        *self = Self {
            board: Array2::default((usize::from(rows), usize::from(columns))),
            mine_layout,
            revealed_count: 0,
            flagged_count: 0,
            status: GameStatus::Active,
            win_rule,
            triggered_mine: None,
        };
        Ok(())
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn config(&self) -> GameConfig {
        self.mine_layout.game_config().with_win_rule(self.win_rule)
    }

    pub fn win_rule(&self) -> WinRule {
        self.win_rule
    }

    pub fn size(&self) -> Coord2 {
        self.mine_layout.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines not accounted for by flags, negative when over-flagged.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.mine_layout.mine_count()) - i32::from(self.flagged_count)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    pub fn cell_state(&self, coords: Coord2) -> Result<CellState> {
        let coords = self.mine_layout.validate_coords(coords)?;
        Ok(self.board[coords.to_nd_index()])
    }

    pub fn index_of(&self, coords: Coord2) -> Result<CellCount> {
        let coords = self.mine_layout.validate_coords(coords)?;
        Ok(cell_index(coords, self.size().1))
    }

    pub fn coords_of(&self, index: CellCount) -> Result<Coord2> {
        if (1..=self.mine_layout.total_cells()).contains(&index) {
            Ok(cell_coords(index, self.size().1))
        } else {
            Err(GameError::InvalidIndex)
        }
    }

    /// Display category of a cell, taking the end of the game into account.
    pub fn tile_at(&self, coords: Coord2) -> Result<Tile> {
        let coords = self.mine_layout.validate_coords(coords)?;
        Ok(self.tile_unchecked(coords))
    }

    /// Every cell with its current display category, row by row.
    pub fn board(&self) -> Vec<CellUpdate> {
        self.iter_coords()
            .map(|coords| CellUpdate::new(coords, self.tile_unchecked(coords)))
            .collect()
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagUpdate> {
        use CellState::*;

        let coords = self.mine_layout.validate_coords(coords)?;
        let cell = &mut self.board[coords.to_nd_index()];

        if !self.status.is_active() {
            return Ok(FlagUpdate {
                coords,
                flagged: *cell == Flagged,
            });
        }

        let flagged = match *cell {
            Hidden => {
                *cell = Flagged;
                self.flagged_count += 1;
                true
            }
            Flagged => {
                *cell = Hidden;
                self.flagged_count -= 1;
                false
            }
            Revealed => false,
        };
        log::debug!("Flag at {:?} is now {}", coords, flagged);

        if self.win_rule == WinRule::RevealedPlusFlagged && self.all_cells_accounted() {
            self.end_game(true);
        }

        Ok(FlagUpdate { coords, flagged })
    }

    /// Reveals a cell, cascading over zero-count regions.
    ///
    /// Returns every cell whose display changed, with the whole board's final categories appended
    /// when this move ends the game.
    pub fn reveal(&mut self, coords: Coord2) -> Result<Vec<CellUpdate>> {
        let coords = self.mine_layout.validate_coords(coords)?;

        if !self.status.is_active() || self.board[coords.to_nd_index()] != CellState::Hidden {
            return Ok(Vec::new());
        }

        let mut updates = Vec::new();

        if self.mine_layout.contains_mine(coords) {
            self.open_cell(coords);
            self.triggered_mine = Some(coords);
            log::debug!("Hit mine at {:?}", coords);
            updates.push(CellUpdate::new(coords, Tile::Mine));
            self.end_game(false);
            self.push_resolution(&mut updates);
            return Ok(updates);
        }

        self.open_cell(coords);
        let count = self.mine_layout.adjacent_mine_count(coords);
        updates.push(CellUpdate::new(coords, Tile::from_count(count)));
        log::debug!("Revealed {:?}, mine count: {}", coords, count);

        if count == 0 {
            self.cascade_from(coords, &mut updates);
        }

        let won = match self.win_rule {
            WinRule::RevealAllSafe => self.revealed_count == self.mine_layout.safe_cell_count(),
            WinRule::RevealedPlusFlagged => self.all_cells_accounted(),
        };
        if won {
            self.end_game(true);
            self.push_resolution(&mut updates);
        }

        Ok(updates)
    }

    /// Opens every hidden cell reachable from `origin` through zero-count cells.
    fn cascade_from(&mut self, origin: Coord2, updates: &mut Vec<CellUpdate>) {
        let mut visited = HashSet::new();
        visited.insert(origin);
        let mut to_visit: VecDeque<_> = self.hidden_neighbors(origin).collect();
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            origin,
            to_visit
        );

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) {
                continue;
            }

            // flags stop the cascade, they are never opened for the player
            if self.board[visit_coords.to_nd_index()] != CellState::Hidden {
                continue;
            }

            self.open_cell(visit_coords);
            let count = self.mine_layout.adjacent_mine_count(visit_coords);
            updates.push(CellUpdate::new(visit_coords, Tile::from_count(count)));
            log::trace!("Flood opened {:?}, mine count: {}", visit_coords, count);

            if count == 0 {
                to_visit.extend(
                    self.hidden_neighbors(visit_coords)
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    fn open_cell(&mut self, coords: Coord2) {
        self.board[coords.to_nd_index()] = CellState::Revealed;
        self.revealed_count += 1;
    }

    fn hidden_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_layout
            .iter_neighbors(coords)
            .filter(|&pos| self.board[pos.to_nd_index()] == CellState::Hidden)
    }

    fn all_cells_accounted(&self) -> bool {
        self.revealed_count + self.flagged_count == self.mine_layout.total_cells()
    }

    fn end_game(&mut self, won: bool) {
        if self.status.is_finished() {
            return;
        }

        self.status = if won {
            GameStatus::Won
        } else {
            GameStatus::Lost
        };
        log::debug!(
            "Game ended with {:?}, revealed: {}, flagged: {}",
            self.status,
            self.revealed_count,
            self.flagged_count
        );
    }

    /// Final category of every cell the player never opened.
    fn push_resolution(&self, updates: &mut Vec<CellUpdate>) {
        updates.extend(
            self.iter_coords()
                .filter(|&coords| self.board[coords.to_nd_index()].is_unrevealed())
                .map(|coords| CellUpdate::new(coords, self.tile_unchecked(coords))),
        );
    }

    fn tile_unchecked(&self, coords: Coord2) -> Tile {
        use CellState::*;

        let cell = self.board[coords.to_nd_index()];
        let mine = self.mine_layout.contains_mine(coords);
        let count = self.mine_layout.adjacent_mine_count(coords);

        match (cell, mine, self.status.is_finished()) {
            (Revealed, true, _) => Tile::Mine,
            (Revealed, false, _) => Tile::from_count(count),
            (Hidden, _, false) => Tile::Hidden,
            (Flagged, _, false) => Tile::Flagged,
            (Flagged, true, true) => Tile::FlagCorrect,
            (Flagged, false, true) => Tile::FlagIncorrect,
            (Hidden, true, true) => Tile::MineExposed,
            (Hidden, false, true) => Tile::from_count(count),
        }
    }

    fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, columns) = self.size();
        (1..=rows).flat_map(move |row| (1..=columns).map(move |col| (row, col)))
    }
}
