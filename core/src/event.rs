use serde::{Deserialize, Serialize};

use crate::*;

/// A cell whose presentation changed as the result of a reveal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellChange {
    /// Safe cell uncovered, showing its adjacent mine count.
    Uncovered { coords: Coord2, value: u8 },
    /// The mine that ended the game.
    Detonated { coords: Coord2 },
    /// Any other unflagged mine, shown after a loss.
    MineShown { coords: Coord2 },
    /// A flag that was sitting on a safe cell when the game was lost.
    WrongFlag { coords: Coord2 },
}

impl CellChange {
    pub const fn coords(self) -> Coord2 {
        match self {
            Self::Uncovered { coords, .. }
            | Self::Detonated { coords }
            | Self::MineShown { coords }
            | Self::WrongFlag { coords } => coords,
        }
    }
}

/// Everything a single reveal changed, in the order it happened.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealReport {
    pub changes: Vec<CellChange>,
    pub status: GameStatus,
}

impl RevealReport {
    pub(crate) fn unchanged(status: GameStatus) -> Self {
        Self {
            changes: Vec::new(),
            status,
        }
    }

    pub fn has_update(&self) -> bool {
        !self.changes.is_empty()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagChange {
    pub coords: Coord2,
    pub flagged: bool,
}
