use std::collections::VecDeque;

use crate::*;

/// One cell visited by the post-loss scan, see [`CellGrid::uncover_all_other_mines`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LossScan {
    Mine(Coord2),
    Safe(Coord2),
}

impl CellGrid {
    /// Uncovers `coords`, flooding through zero-count cells, and returns every cell uncovered in order.
    ///
    /// Out-of-range or already uncovered targets are ignored. Flags on uncovered cells are cleared.
    /// Mines are uncovered like any other cell but do not count towards [`CellGrid::uncovered_count`],
    /// telling a mine from a safe cell is up to the caller.
    pub fn uncover(&mut self, coords: Coord2) -> Vec<Coord2> {
        let mut uncovered = Vec::new();
        if !self.contains(coords) || !self[coords].is_covered() {
            return uncovered;
        }

        let mut to_visit = VecDeque::from([coords]);
        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = self.cell_mut(visit_coords);
            // queued twice through different neighbours
            if !cell.is_covered() {
                continue;
            }
            if cell.uncover() {
                self.flagged_count -= 1;
            }

            let cell = self[visit_coords];
            uncovered.push(visit_coords);
            if cell.is_mine() {
                continue;
            }
            self.uncovered_count += 1;
            log::trace!(
                "Uncovered cell at {:?}, mine count: {}",
                visit_coords,
                cell.adjacent_mines()
            );

            if cell.adjacent_mines() == 0 {
                to_visit.extend(
                    self.iter_neighbors(visit_coords)
                        .filter(|&pos| self[pos].is_covered()),
                );
            }
        }

        uncovered
    }

    /// Visits every cell except `detonated` once, telling mines from safe cells.
    pub fn uncover_all_other_mines(
        &self,
        detonated: Coord2,
    ) -> impl Iterator<Item = LossScan> + '_ {
        self.iter_coords()
            .filter(move |&coords| coords != detonated)
            .map(move |coords| {
                if self[coords].is_mine() {
                    LossScan::Mine(coords)
                } else {
                    LossScan::Safe(coords)
                }
            })
    }
}
