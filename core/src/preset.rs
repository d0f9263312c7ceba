use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Directive key the host looks for in embedded block source, e.g. `dif: hard`.
const DIRECTIVE_KEY: &str = "dif:";

/// Board shape and mine count, only ever one of the [`BoardSize`] presets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    pub(crate) size: Coord2,
    pub(crate) mines: CellCount,
}

#[derive(Deserialize)]
struct RawGameConfig {
    size: Coord2,
    mines: CellCount,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: RawGameConfig) -> Result<Self> {
        let config = Self::new_unchecked(raw.size, raw.mines);
        BoardSize::from_config(config)
            .map(BoardSize::config)
            .ok_or(GameError::InvalidBoardShape)
    }
}

impl GameConfig {
    pub(crate) const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

/// The fixed board presets, `(rows, cols, mines)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardSize {
    #[default]
    Easy,
    Mid,
    Hard,
}

impl BoardSize {
    pub const ALL: [BoardSize; 3] = [BoardSize::Easy, BoardSize::Mid, BoardSize::Hard];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new_unchecked((9, 9), 10),
            Self::Mid => GameConfig::new_unchecked((16, 16), 40),
            Self::Hard => GameConfig::new_unchecked((24, 24), 99),
        }
    }

    pub fn from_config(config: GameConfig) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.config() == config)
    }

    pub const fn rows(self) -> Coord {
        self.config().rows()
    }

    pub const fn cols(self) -> Coord {
        self.config().cols()
    }

    pub const fn mines(self) -> CellCount {
        self.config().mines
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Mid => "MID",
            Self::Hard => "HARD",
        }
    }

    /// Picks the preset named by the first `dif: <name>` directive in `source`.
    ///
    /// Missing or unknown directives fall back to [`BoardSize::Easy`].
    pub fn from_directive(source: &str) -> Self {
        let Some(name) = directive_value(source) else {
            return Self::default();
        };

        name.parse().unwrap_or_else(|err| {
            log::warn!("{err}, falling back to {}", Self::default());
            Self::default()
        })
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BoardSize {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|size| size.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GameError::UnknownBoardSize(s.to_owned()))
    }
}

/// Returns the word following the first directive key, if there is one.
fn directive_value(source: &str) -> Option<&str> {
    let start = source.find(DIRECTIVE_KEY)? + DIRECTIVE_KEY.len();
    let rest = source[start..].trim_start();
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());

    let word = &rest[..end];
    (!word.is_empty()).then_some(word)
}
