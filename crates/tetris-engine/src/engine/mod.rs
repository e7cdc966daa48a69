//! Game rules and session state.
//!
//! This module drives the [`core`](crate::core) data structures through a game
//! of Tetris:
//!
//! - [`GameField`] - Board, falling piece and queued next kind
//! - [`GameSession`] - Phase machine, statistics and gravity timer
//! - [`GameStats`] - Score, cleared lines, level and drop interval
//! - [`DropTimer`] - Cancellable gravity schedule
//! - [`PieceSource`] - Where new piece kinds come from
//! - [`SessionSnapshot`] - Read-only view for renderers
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] and [`start`](GameSession::start) it
//! 2. Move and rotate the falling piece; gravity ticks move it down
//! 3. A blocked downward move locks the piece, clears lines and scores
//! 4. The queued piece spawns; if it collides the game is over
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tetris_engine::{GameSession, MoveDirection, PieceSeed, RandomPieces};
//!
//! let seed = PieceSeed::from_bytes([42; 16]);
//! let mut session = GameSession::with_source(RandomPieces::with_seed(seed));
//! session.start();
//!
//! session.move_piece(MoveDirection::Left);
//! session.rotate();
//!
//! // Three seconds of wall time at level 1 is three gravity ticks
//! assert_eq!(session.advance(Duration::from_secs(3)), 3);
//!
//! let snapshot = session.snapshot();
//! assert_eq!(snapshot.score, 0);
//! ```

pub use self::{
    drop_timer::*, game_field::*, game_session::*, game_stats::*, piece_source::*, snapshot::*,
};

mod drop_timer;
mod game_field;
mod game_session;
mod game_stats;
mod piece_source;
mod snapshot;
