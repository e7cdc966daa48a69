//! Board geometry and tetromino data.
//!
//! - [`Shape`] / [`PieceKind`] - the tetromino catalog and its rotation transform
//! - [`Board`] / [`Block`] - the 10×20 playfield
//! - [`Piece`] - a falling tetromino (kind, position, rotation index)
//! - [`placement`] - collision checks and locking a piece into a board

use std::time::Duration;

pub use self::{block::*, board::*, piece::*, placement::*, shape::*};

pub(crate) mod block;
pub(crate) mod board;
pub(crate) mod piece;
pub mod placement;
pub(crate) mod shape;

/// Number of columns in the playfield.
pub const BOARD_WIDTH: usize = 10;
/// Number of rows in the playfield.
pub const BOARD_HEIGHT: usize = 20;

/// Lines that must be cleared to advance one level.
pub const LINES_PER_LEVEL: usize = 10;
/// Points per cleared line at level 1; multiplied by the level.
pub const LINE_CLEAR_BASE_SCORE: usize = 100;

/// Gravity interval at level 1.
pub const INITIAL_DROP_INTERVAL: Duration = Duration::from_millis(1000);
/// Reduction of the gravity interval per level.
pub const DROP_INTERVAL_STEP: Duration = Duration::from_millis(100);
/// Floor of the gravity interval.
pub const MIN_DROP_INTERVAL: Duration = Duration::from_millis(100);
