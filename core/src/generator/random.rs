use rand::prelude::*;

use super::*;

/// Uniform placement without replacement, reproducible from the seed.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    rng: SmallRng,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(&mut self, config: &GameConfig) -> Result<MineLayout> {
        let rng = &mut self.rng;
        place_by_rejection(config, |total| Ok(rng.random_range(1..=total)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exactly_the_requested_mines() {
        let mut generator = RandomMinefieldGenerator::new(7);
        for (rows, columns, mines) in [(5, 5, 7), (8, 8, 10), (2, 2, 3), (70, 70, 4899)] {
            let config = GameConfig::new(rows, columns, mines).unwrap();
            let layout = generator.generate(&config).unwrap();
            assert_eq!(layout.size(), (rows, columns));
            assert_eq!(layout.mine_count(), mines);
            assert_eq!(layout.mine_coords().len(), usize::from(mines));
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::new(16, 30, 99).unwrap();
        let first = RandomMinefieldGenerator::new(42).generate(&config).unwrap();
        let second = RandomMinefieldGenerator::new(42).generate(&config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn successive_games_differ() {
        let config = GameConfig::new(16, 30, 99).unwrap();
        let mut generator = RandomMinefieldGenerator::new(42);
        let first = generator.generate(&config).unwrap();
        let second = generator.generate(&config).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn seed_survives_generation() {
        let config = GameConfig::new(5, 5, 7).unwrap();
        let mut generator = RandomMinefieldGenerator::new(1234);
        generator.generate(&config).unwrap();
        generator.generate(&config).unwrap();
        assert_eq!(generator.seed(), 1234);
    }

    #[test]
    fn rejects_invalid_config() {
        let config = GameConfig::new_unchecked(3, 3, 9);
        assert_eq!(
            RandomMinefieldGenerator::new(0).generate(&config),
            Err(GameError::InvalidMineCount { mines: 9, max: 8 })
        );
    }
}
