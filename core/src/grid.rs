use core::num::Saturating;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Row-major cell storage for one game, plus the running counters the invariants are stated over.
///
/// Deserializing rejects anything that is not a preset board with counters matching its cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCellGrid")]
pub struct CellGrid {
    config: GameConfig,
    cells: Array2<Cell>,
    mines_laid: bool,
    pub(crate) flagged_count: Saturating<CellCount>,
    pub(crate) uncovered_count: Saturating<CellCount>,
}

/// Unchecked serialized form of [`CellGrid`].
#[derive(Deserialize)]
struct RawCellGrid {
    config: GameConfig,
    cells: Array2<Cell>,
    mines_laid: bool,
    flagged_count: Saturating<CellCount>,
    uncovered_count: Saturating<CellCount>,
}

impl TryFrom<RawCellGrid> for CellGrid {
    type Error = GameError;

    fn try_from(raw: RawCellGrid) -> Result<Self> {
        // the config itself only deserializes from a preset
        let config = raw.config;
        if raw.cells.dim() != (usize::from(config.rows()), usize::from(config.cols())) {
            return Err(GameError::InvalidBoardShape);
        }

        let grid = Self {
            config,
            cells: raw.cells,
            mines_laid: raw.mines_laid,
            flagged_count: raw.flagged_count,
            uncovered_count: raw.uncovered_count,
        };

        let mines = grid.iter_coords().filter(|&pos| grid[pos].is_mine()).count();
        let expected_mines = if grid.mines_laid { config.mines } else { 0 };
        if mines != usize::from(expected_mines) {
            return Err(GameError::InvalidLayout);
        }
        let miscounted = grid.iter_coords().any(|pos| {
            let cell = grid[pos];
            let count = grid
                .iter_neighbors(pos)
                .filter(|&n| grid[n].is_mine())
                .count();
            !cell.is_mine() && usize::from(cell.adjacent_mines()) != count
        });
        if miscounted {
            return Err(GameError::InvalidLayout);
        }

        let mut flagged = 0;
        let mut uncovered = 0;
        for pos in grid.iter_coords() {
            let cell = grid[pos];
            if cell.is_flagged() {
                if !cell.is_covered() {
                    return Err(GameError::InconsistentCounters);
                }
                flagged += 1;
            }
            if !cell.is_covered() && !cell.is_mine() {
                uncovered += 1;
            }
        }
        let uncovered_before_mines = !grid.mines_laid && uncovered > 0;
        if flagged != grid.flagged_count.0
            || flagged > config.mines
            || uncovered != grid.uncovered_count.0
            || uncovered_before_mines
        {
            return Err(GameError::InconsistentCounters);
        }

        Ok(grid)
    }
}

impl CellGrid {
    /// Allocates an empty grid: no mines, everything covered and unflagged.
    pub(crate) fn new(config: GameConfig) -> Self {
        Self {
            config,
            cells: Array2::default(config.size.to_nd_index()),
            mines_laid: false,
            flagged_count: Saturating(0),
            uncovered_count: Saturating(0),
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn rows(&self) -> Coord {
        self.config.rows()
    }

    pub fn cols(&self) -> Coord {
        self.config.cols()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn total_cells(&self) -> CellCount {
        self.config.total_cells()
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    /// Safe cells uncovered so far, a detonated mine is never counted.
    pub fn uncovered_count(&self) -> CellCount {
        self.uncovered_count.0
    }

    pub fn has_mines(&self) -> bool {
        self.mines_laid
    }

    /// Whether every safe cell has been uncovered.
    pub fn is_cleared(&self) -> bool {
        self.uncovered_count.0 + self.config.mines == self.config.total_cells()
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        row < self.rows() && col < self.cols()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    pub fn is_mine(&self, coords: Coord2) -> Result<bool> {
        self.cell(coords).map(Cell::is_mine)
    }

    pub fn is_flagged(&self, coords: Coord2) -> Result<bool> {
        self.cell(coords).map(Cell::is_flagged)
    }

    pub fn is_covered(&self, coords: Coord2) -> Result<bool> {
        self.cell(coords).map(Cell::is_covered)
    }

    pub fn value(&self, coords: Coord2) -> Result<CellValue> {
        self.cell(coords).map(Cell::value)
    }

    /// All coordinates in row-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Marks `mines` as mine cells and computes the adjacency counts of everything else.
    ///
    /// Runs once per grid; the layout has to match the configured mine count exactly.
    pub fn lay_mines(&mut self, mines: &[Coord2]) -> Result<()> {
        if self.mines_laid {
            log::warn!("Mines already laid, ignoring new layout");
            return Err(GameError::InvalidLayout);
        }
        if mines.len() != usize::from(self.config.mines) {
            return Err(GameError::InvalidLayout);
        }

        let mut mask: Array2<bool> = Array2::default(self.size().to_nd_index());
        for &coords in mines {
            let coords = self
                .validate_coords(coords)
                .map_err(|_| GameError::InvalidLayout)?;
            if core::mem::replace(&mut mask[coords.to_nd_index()], true) {
                return Err(GameError::InvalidLayout);
            }
        }

        for (cell, &is_mine) in self.cells.iter_mut().zip(mask.iter()) {
            if is_mine {
                cell.set_mine();
            }
        }
        self.mines_laid = true;
        self.count_adjacent_mines();
        Ok(())
    }

    /// Writes the 8-neighbour mine count into every non-mine cell.
    fn count_adjacent_mines(&mut self) {
        for coords in self.iter_coords() {
            if self[coords].is_mine() {
                continue;
            }
            let count = self
                .iter_neighbors(coords)
                .filter(|&pos| self[pos].is_mine())
                .count() as u8;
            self.cell_mut(coords).set_adjacent_mines(count);
        }
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }
}

impl Index<Coord2> for CellGrid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
