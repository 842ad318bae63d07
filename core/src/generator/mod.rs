use hashbrown::HashSet;

use crate::*;
pub use random::*;
pub use scripted::*;

mod random;
mod scripted;

/// Source of mine layouts for new games.
pub trait MinefieldGenerator {
    fn generate(&mut self, config: &GameConfig) -> Result<MineLayout>;
}

/// Draws 1-based flat indices until `config.mines` distinct ones are collected.
///
/// Repeated draws are discarded, which keeps every position equally likely when `draw` is uniform.
fn place_by_rejection<F>(config: &GameConfig, mut draw: F) -> Result<MineLayout>
where
    F: FnMut(CellCount) -> Result<CellCount>,
{
    config.validate()?;

    let total = config.total_cells();
    let wanted = usize::from(config.mines);
    let mut indices: HashSet<CellCount> = HashSet::with_capacity(wanted);
    let mut draws = 0usize;

    while indices.len() < wanted {
        let index = draw(total)?;
        if !(1..=total).contains(&index) {
            return Err(GameError::InvalidIndex);
        }
        indices.insert(index);
        draws += 1;
    }

    log::debug!(
        "Placed {} mines on {}x{} after {} draws",
        wanted,
        config.rows,
        config.columns,
        draws
    );
    MineLayout::from_mine_indices(config.size(), indices)
}
