use core::time::Duration;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - NotStarted -> OnGoing
/// - OnGoing -> Won
/// - OnGoing -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Nothing revealed yet, mines not placed
    #[default]
    NotStarted,
    OnGoing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_started(self) -> bool {
        !matches!(self, Self::NotStarted)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A single game from the first reveal to a win or loss.
///
/// Mines are placed on the first reveal, never under the revealed cell. Ended games ignore every
/// move, [`Game::restart`] hands out a fresh one.
#[derive(Clone, Debug)]
pub struct Game {
    board_size: BoardSize,
    grid: CellGrid,
    status: GameStatus,
    seed: u64,
    detonated: Option<Coord2>,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
}

impl Game {
    pub fn new(board_size: BoardSize) -> Self {
        Self::with_seed(board_size, rand::random())
    }

    /// Game whose mine placement is fully determined by `seed` and the first revealed cell.
    pub fn with_seed(board_size: BoardSize, seed: u64) -> Self {
        Self {
            board_size,
            grid: CellGrid::new(board_size.config()),
            status: Default::default(),
            seed,
            detonated: None,
            started_at: None,
            ended_at: None,
        }
    }

    /// Game over a known mine layout, the first reveal performs no placement.
    pub fn from_layout(board_size: BoardSize, mines: &[Coord2]) -> Result<Self> {
        let mut game = Self::with_seed(board_size, 0);
        game.grid.lay_mines(mines)?;
        Ok(game)
    }

    /// Fresh game on the same preset, discarding everything about this one.
    pub fn restart(&self) -> Self {
        self.restart_with_seed(rand::random())
    }

    pub fn restart_with_seed(&self, seed: u64) -> Self {
        log::debug!("Restarting {} game", self.board_size);
        Self::with_seed(self.board_size, seed)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn board_size(&self) -> BoardSize {
        self.board_size
    }

    pub fn config(&self) -> GameConfig {
        self.grid.config()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn rows(&self) -> Coord {
        self.grid.rows()
    }

    pub fn cols(&self) -> Coord {
        self.grid.cols()
    }

    pub fn num_mines(&self) -> CellCount {
        self.grid.mine_count()
    }

    pub fn flag_count(&self) -> CellCount {
        self.grid.flagged_count()
    }

    pub fn uncovered_count(&self) -> CellCount {
        self.grid.uncovered_count()
    }

    /// How many mines have not been flagged yet
    pub fn mines_left(&self) -> CellCount {
        self.num_mines() - self.flag_count()
    }

    /// The mine that ended the game, if it was lost
    pub fn detonated(&self) -> Option<Coord2> {
        self.detonated
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        self.grid.cell(coords)
    }

    pub fn is_mine(&self, coords: Coord2) -> Result<bool> {
        self.grid.is_mine(coords)
    }

    pub fn is_flagged(&self, coords: Coord2) -> Result<bool> {
        self.grid.is_flagged(coords)
    }

    pub fn is_covered(&self, coords: Coord2) -> Result<bool> {
        self.grid.is_covered(coords)
    }

    pub fn value(&self, coords: Coord2) -> Result<CellValue> {
        self.grid.value(coords)
    }

    /// Time since the first move, frozen once the game ends
    pub fn elapsed(&self) -> Duration {
        match (self.started_at, self.ended_at) {
            (Some(started_at), Some(ended_at)) => ended_at.duration_since(started_at),
            (Some(started_at), None) => started_at.elapsed(),
            (None, _) => Duration::ZERO,
        }
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed().as_secs()
    }

    /// Reveals a covered, unflagged cell.
    ///
    /// Out-of-range coordinates, flagged or uncovered cells and ended games leave the game untouched.
    pub fn reveal(&mut self, coords: Coord2) -> RevealReport {
        if self.status.is_finished() || !self.grid.contains(coords) {
            return RevealReport::unchanged(self.status);
        }

        if !self.grid.has_mines() {
            self.place_mines(coords);
        }
        // placement failures leave the game waiting for another first move
        if !self.grid.has_mines() {
            return RevealReport::unchanged(self.status);
        }
        self.mark_started();

        let cell = self.grid[coords];
        if !cell.is_covered() || cell.is_flagged() {
            return RevealReport::unchanged(self.status);
        }

        if cell.is_mine() {
            return self.detonate(coords);
        }

        let changes = self
            .grid
            .uncover(coords)
            .into_iter()
            .map(|pos| CellChange::Uncovered {
                coords: pos,
                value: self.grid[pos].adjacent_mines(),
            })
            .collect();

        if self.grid.is_cleared() {
            self.end_game(true);
        }

        RevealReport {
            changes,
            status: self.status,
        }
    }

    /// Flags or unflags a covered cell while the game has not ended.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Option<FlagChange> {
        if self.status.is_finished() {
            return None;
        }

        let flagged = self.grid.toggle_flag(coords)?;
        Some(FlagChange { coords, flagged })
    }

    fn place_mines(&mut self, excluded: Coord2) {
        let mines = RandomMinePlacer::new(self.seed).place(self.grid.config(), excluded);
        if let Err(err) = self.grid.lay_mines(&mines) {
            log::error!("Mine placement failed: {err}");
        }
    }

    fn detonate(&mut self, coords: Coord2) -> RevealReport {
        self.grid.uncover(coords);
        self.detonated = Some(coords);

        let mut changes = vec![CellChange::Detonated { coords }];
        changes.extend(
            self.grid
                .uncover_all_other_mines(coords)
                .filter_map(|scan| match scan {
                    LossScan::Mine(pos) if !self.grid[pos].is_flagged() => {
                        Some(CellChange::MineShown { coords: pos })
                    }
                    LossScan::Safe(pos) if self.grid[pos].is_flagged() => {
                        Some(CellChange::WrongFlag { coords: pos })
                    }
                    _ => None,
                }),
        );

        self.end_game(false);
        RevealReport {
            changes,
            status: self.status,
        }
    }

    /// Checks if the state is initial and changes to on-going recording the start time
    fn mark_started(&mut self) {
        if matches!(self.status, GameStatus::NotStarted) {
            self.started_at = Some(Instant::now());
            self.status = GameStatus::OnGoing;
            log::debug!("{} game started", self.board_size);
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.status.is_finished() {
            return;
        }

        self.status = if won {
            GameStatus::Won
        } else {
            GameStatus::Lost
        };
        self.ended_at = Some(Instant::now());
        log::debug!(
            "{} game ended {:?} after {:?}",
            self.board_size,
            self.status,
            self.elapsed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // the top-left corner (0, 0) is walled in by mines, everything else floods from the middle
    const MINES: [Coord2; 10] = [
        (0, 1),
        (1, 0),
        (1, 1),
        (8, 0),
        (8, 1),
        (8, 2),
        (8, 3),
        (8, 4),
        (8, 5),
        (8, 6),
    ];

    fn game() -> Game {
        Game::from_layout(BoardSize::Easy, &MINES).unwrap()
    }

    #[test]
    fn new_game_is_empty() {
        let game = Game::with_seed(BoardSize::Easy, 1);

        assert_eq!(game.status(), GameStatus::NotStarted);
        assert!(!game.grid().has_mines());
        assert_eq!(game.flag_count(), 0);
        assert_eq!(game.uncovered_count(), 0);
        assert_eq!(game.elapsed(), Duration::ZERO);
    }

    #[test]
    fn first_reveal_places_mines_away_from_it() {
        let mut game = Game::with_seed(BoardSize::Easy, 1);

        let report = game.reveal((4, 4));

        assert!(game.grid().has_mines());
        assert_eq!(game.is_mine((4, 4)), Ok(false));
        assert_eq!(game.flag_count(), 0);
        assert!(matches!(report.status, GameStatus::OnGoing | GameStatus::Won));
        assert_eq!(
            report.changes.first(),
            Some(&CellChange::Uncovered {
                coords: (4, 4),
                value: game.value((4, 4)).unwrap().count().unwrap(),
            })
        );
    }

    #[test]
    fn out_of_range_first_reveal_does_not_place() {
        let mut game = Game::with_seed(BoardSize::Easy, 1);

        assert!(!game.reveal((9, 4)).has_update());
        assert!(!game.grid().has_mines());
        assert_eq!(game.status(), GameStatus::NotStarted);
    }

    #[test]
    fn flagged_cell_cannot_be_revealed() {
        let mut game = Game::with_seed(BoardSize::Easy, 3);

        assert_eq!(
            game.toggle_flag((0, 0)),
            Some(FlagChange {
                coords: (0, 0),
                flagged: true
            })
        );
        assert_eq!(game.flag_count(), 1);

        let report = game.reveal((0, 0));

        assert!(!report.has_update());
        assert_eq!(game.is_flagged((0, 0)), Ok(true));
        assert_eq!(game.is_covered((0, 0)), Ok(true));
        // the first reveal still fixes the layout, keeping its target clear
        assert!(game.grid().has_mines());
        assert_eq!(game.is_mine((0, 0)), Ok(false));
        assert_eq!(game.status(), GameStatus::OnGoing);
    }

    #[test]
    fn mines_are_placed_only_once() {
        let mut game = Game::with_seed(BoardSize::Mid, 11);
        game.reveal((8, 8));
        let mines: Vec<_> = game
            .grid()
            .iter_coords()
            .filter(|&pos| game.grid()[pos].is_mine())
            .collect();

        let next = game
            .grid()
            .iter_coords()
            .find(|&pos| !game.grid()[pos].is_mine() && game.grid()[pos].is_covered());
        if let Some(next) = next {
            game.reveal(next);
        }

        let after: Vec<_> = game
            .grid()
            .iter_coords()
            .filter(|&pos| game.grid()[pos].is_mine())
            .collect();
        assert_eq!(mines, after);
        assert_eq!(mines.len(), 40);
    }

    #[test]
    fn last_safe_cell_wins() {
        let mut game = game();

        let report = game.reveal((4, 4));
        assert_eq!(report.status, GameStatus::OnGoing);
        assert_eq!(report.changes.len(), 70);
        assert_eq!(game.is_covered((0, 0)), Ok(true));

        let report = game.reveal((0, 0));

        assert_eq!(
            report.changes,
            [CellChange::Uncovered {
                coords: (0, 0),
                value: 3
            }]
        );
        assert_eq!(report.status, GameStatus::Won);
        assert_eq!(game.uncovered_count() + game.num_mines(), 81);
        assert!(MINES.iter().all(|&pos| game.is_covered(pos) == Ok(true)));
    }

    #[test]
    fn revealing_a_mine_loses() {
        let mut game = game();
        game.reveal((4, 4));
        game.toggle_flag((8, 0));
        game.toggle_flag((0, 0));

        let report = game.reveal((1, 1));

        assert_eq!(report.status, GameStatus::Lost);
        assert_eq!(game.detonated(), Some((1, 1)));
        assert_eq!(report.changes[0], CellChange::Detonated { coords: (1, 1) });
        let shown = report
            .changes
            .iter()
            .filter(|change| matches!(change, CellChange::MineShown { .. }))
            .count();
        // (8, 0) keeps its flag
        assert_eq!(shown, 8);
        assert!(report.changes.contains(&CellChange::WrongFlag { coords: (0, 0) }));
        assert_eq!(report.changes.len(), 10);
    }

    #[test]
    fn ended_game_ignores_moves() {
        let mut game = game();
        game.reveal((1, 0));
        assert_eq!(game.status(), GameStatus::Lost);
        assert!(game.status().is_started());
        let flags = game.flag_count();
        let elapsed = game.elapsed();

        assert!(!game.reveal((4, 4)).has_update());
        assert_eq!(game.toggle_flag((4, 4)), None);
        assert_eq!(game.flag_count(), flags);
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.elapsed(), elapsed);
    }

    #[test]
    fn detonation_does_not_count_as_uncovered() {
        let mut game = game();
        game.reveal((4, 4));
        let uncovered = game.uncovered_count();

        game.reveal((0, 1));

        assert_eq!(game.uncovered_count(), uncovered);
        assert_eq!(game.is_covered((0, 1)), Ok(false));
    }

    #[test]
    fn restart_discards_state() {
        let mut game = game();
        game.reveal((4, 4));
        game.toggle_flag((0, 0));

        let fresh = game.restart_with_seed(5);

        assert_eq!(fresh.status(), GameStatus::NotStarted);
        assert_eq!(fresh.board_size(), BoardSize::Easy);
        assert_eq!(fresh.flag_count(), 0);
        assert_eq!(fresh.uncovered_count(), 0);
        assert!(!fresh.grid().has_mines());
    }

    #[test]
    fn mines_left_tracks_flags() {
        let mut game = Game::with_seed(BoardSize::Hard, 9);

        game.toggle_flag((0, 0));
        game.toggle_flag((0, 1));

        assert_eq!(game.mines_left(), 97);
    }
}
