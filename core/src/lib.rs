//! Single-player minesweeper engine: preset boards, first-move-safe mine placement, flood-fill
//! reveals, capped flagging and the win/loss state machine.
//!
//! Hosts drive a [`Game`] with `(row, col)` coordinates and render from the returned events.

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use event::*;
pub use generator::*;
pub use grid::*;
pub use preset::*;
pub use reveal::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod event;
mod flag;
mod generator;
mod grid;
mod preset;
mod reveal;
mod types;
