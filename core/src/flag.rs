use crate::*;

impl CellGrid {
    /// Flags or unflags a covered cell, returning the new flag state when something changed.
    ///
    /// Never lets the flag count go past the mine count.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Option<bool> {
        if !self.contains(coords) {
            return None;
        }

        let cell = self[coords];
        if !cell.is_covered() {
            return None;
        }

        if cell.is_flagged() {
            self.cell_mut(coords).set_flagged(false);
            self.flagged_count -= 1;
            Some(false)
        } else if self.flagged_count() < self.mine_count() {
            self.cell_mut(coords).set_flagged(true);
            self.flagged_count += 1;
            Some(true)
        } else {
            log::debug!("Flag limit of {} reached", self.mine_count());
            None
        }
    }
}
