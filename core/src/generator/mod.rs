use crate::*;
pub use random::*;

mod random;

/// Chooses where the mines of a board go.
pub trait MinePlacer {
    /// Returns `config.mines` distinct positions, none of them equal to `excluded`.
    fn place(self, config: GameConfig, excluded: Coord2) -> Vec<Coord2>;
}
