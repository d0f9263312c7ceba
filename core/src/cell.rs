use serde::{Deserialize, Serialize};

/// Per-cell state stored by the grid.
///
/// A cell can only carry a flag while it is covered, uncovering clears the flag first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    mine: bool,
    adjacent_mines: u8,
    covered: bool,
    flagged: bool,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.mine
    }

    /// Number of mines among the up to 8 neighbours, meaningless for mine cells.
    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    pub const fn is_covered(self) -> bool {
        self.covered
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    pub const fn value(self) -> CellValue {
        if self.mine {
            CellValue::Mine
        } else {
            CellValue::Count(self.adjacent_mines)
        }
    }

    pub(crate) fn set_mine(&mut self) {
        self.mine = true;
        self.adjacent_mines = 0;
    }

    pub(crate) fn set_adjacent_mines(&mut self, count: u8) {
        self.adjacent_mines = count;
    }

    pub(crate) fn set_flagged(&mut self, flagged: bool) {
        debug_assert!(self.covered || !flagged, "only covered cells can be flagged");
        self.flagged = flagged;
    }

    /// Marks the cell uncovered, returns whether a flag had to be cleared.
    pub(crate) fn uncover(&mut self) -> bool {
        let was_flagged = self.flagged;
        self.flagged = false;
        self.covered = false;
        was_flagged
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            mine: false,
            adjacent_mines: 0,
            covered: true,
            flagged: false,
        }
    }
}

/// What a cell holds: a mine, or the count of adjacent mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Mine,
    Count(u8),
}

impl CellValue {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn count(self) -> Option<u8> {
        match self {
            Self::Mine => None,
            Self::Count(count) => Some(count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_is_covered_and_empty() {
        let cell = Cell::default();

        assert!(cell.is_covered());
        assert!(!cell.is_flagged());
        assert!(!cell.is_mine());
        assert_eq!(cell.value(), CellValue::Count(0));
    }

    #[test]
    fn uncover_clears_flag() {
        let mut cell = Cell::default();
        cell.set_flagged(true);

        assert!(cell.uncover());
        assert!(!cell.is_flagged());
        assert!(!cell.is_covered());
        assert!(!cell.uncover());
    }

    #[test]
    fn mine_cell_reports_mine_value() {
        let mut cell = Cell::default();
        cell.set_adjacent_mines(3);
        cell.set_mine();

        assert_eq!(cell.value(), CellValue::Mine);
        assert_eq!(cell.value().count(), None);
    }
}
