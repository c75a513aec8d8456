use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Generation strategy that drops mines one at a time on uniformly random tiles,
/// resampling whenever the chosen tile already holds a mine.
///
/// The expected number of samples grows as the mine count approaches the tile
/// count, boards are expected to stay well below that.
#[derive(Clone, Debug, PartialEq)]
pub struct RejectionSampler {
    seed: u64,
}

impl RejectionSampler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seeded from the thread-local generator, for a fresh board every game.
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MinefieldGenerator for RejectionSampler {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        let config = config.validated().inspect_err(|err| {
            log::warn!(
                "Cannot generate minefield of size {:?} with {} mines: {}",
                config.size,
                config.mines,
                err
            );
        })?;

        let (width, height) = config.size;
        let mut mine_mask: Array2<bool> = Array2::default(nd_shape(config.size));
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut rejected: u64 = 0;

        for _ in 0..config.mines {
            let coords = loop {
                let coords = (rng.random_range(0..width), rng.random_range(0..height));
                if !mine_mask[coords.to_nd_index()] {
                    break coords;
                }
                rejected += 1;
            };
            mine_mask[coords.to_nd_index()] = true;
        }

        log::trace!(
            "Placed {} mines with seed {}, rejected {} samples",
            config.mines,
            self.seed,
            rejected
        );
        MineLayout::from_mine_mask(mine_mask)
    }
}
