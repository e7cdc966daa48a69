use std::num::ParseIntError;

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece colliding when setting falling piece")]
pub struct PieceCollisionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CompletePieceDropError {
    #[display("no falling piece to lock")]
    NoFallingPiece,
    #[display("new piece collides at its spawn position")]
    NewPieceCollision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("board has {found} rows, at most 20 allowed")]
    TooManyRows { found: usize },
    #[display("row {row} has {found} cells, expected 10")]
    RowWidth { row: usize, found: usize },
    #[display("row {row} has invalid cell {ch:?}")]
    InvalidCell { row: usize, ch: char },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    #[display("invalid seed: expected 32 hex digits, got {len}")]
    InvalidLength { len: usize },
    #[display("invalid seed: {source}")]
    InvalidDigits { source: ParseIntError },
}
