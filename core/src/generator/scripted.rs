use alloc::vec::Vec;

use super::*;

/// Replays a fixed sequence of draws, for reproducing exact layouts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptedMinefieldGenerator {
    draws: Vec<CellCount>,
    next: usize,
}

impl ScriptedMinefieldGenerator {
    pub fn new<I>(draws: I) -> Self
    where
        I: IntoIterator<Item = CellCount>,
    {
        Self {
            draws: draws.into_iter().collect(),
            next: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.draws.len() - self.next
    }
}

impl MinefieldGenerator for ScriptedMinefieldGenerator {
    fn generate(&mut self, config: &GameConfig) -> Result<MineLayout> {
        place_by_rejection(config, |_| {
            let draw = *self
                .draws
                .get(self.next)
                .ok_or(GameError::GeneratorExhausted)?;
            self.next += 1;
            Ok(draw)
        })
    }
}
