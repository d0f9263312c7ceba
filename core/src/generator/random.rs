use super::*;

/// Uniform placement over every cell except the excluded one, driven by a seeded RNG.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinePlacer {
    seed: u64,
}

impl RandomMinePlacer {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinePlacer for RandomMinePlacer {
    fn place(self, config: GameConfig, excluded: Coord2) -> Vec<Coord2> {
        use rand::prelude::*;

        let cols = config.cols();
        let excluded_index = linear_index(excluded, cols);

        // every linear index except the reserved one, so no redraws are ever needed
        let mut pool: Vec<CellCount> = (0..config.total_cells())
            .filter(|&index| index != excluded_index)
            .collect();

        let amount = usize::from(config.mines);
        if amount > pool.len() {
            log::warn!(
                "Cannot fit all mines, requested {} but only {} cells are free",
                amount,
                pool.len()
            );
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let (chosen, _) = pool.partial_shuffle(&mut rng, amount);

        log::debug!(
            "Placed {} mines with seed {:#x}, keeping {:?} clear",
            chosen.len(),
            self.seed,
            excluded
        );
        chosen
            .iter()
            .map(|&index| from_linear_index(index, cols))
            .collect()
    }
}
