use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{
    board::Board,
    piece::{MoveDirection, Piece},
};

use super::{
    DropTimer, GameStats, ScoreGain, SessionSnapshot,
    game_field::GameField,
    piece_source::{PieceSource, RandomPieces},
};

/// Lifecycle phase of a session.
///
/// `NotStarted → Running ⇄ Paused`, `Running → GameOver`. Only `Running`
/// accepts moves, rotations and ticks; [`GameSession::reset`] returns to
/// `NotStarted` from any phase.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
pub enum SessionPhase {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// What a single session operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum StepOutcome {
    /// The session was not in a phase that accepts the operation. Nothing
    /// changed.
    Ignored,
    /// The falling piece moved or rotated.
    Moved,
    /// The move or rotation collided and was discarded.
    Blocked,
    /// A downward move collided and the piece locked.
    Locked(LockReport),
}

/// Summary of a lock event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LockReport {
    pub cleared_lines: usize,
    pub score_gained: usize,
    pub level_up: bool,
    pub game_over: bool,
}

/// A single game of Tetris, driven by discrete actions and gravity ticks.
///
/// The session owns the board, the falling piece, the statistics and the
/// gravity [`DropTimer`]. Every operation is synchronous and atomic; calling
/// one outside the phase it requires leaves the session untouched and returns
/// [`StepOutcome::Ignored`].
///
/// # Example
///
/// ```
/// use tetris_engine::{GameSession, MoveDirection, PieceKind, SequencePieces, SessionPhase};
///
/// let mut session = GameSession::with_source(SequencePieces::repeat(PieceKind::O));
/// assert!(session.move_piece(MoveDirection::Left).is_ignored());
///
/// session.start();
/// assert_eq!(session.phase(), SessionPhase::Running);
/// assert!(session.move_piece(MoveDirection::Left).is_moved());
///
/// // Gravity until the piece lands and locks
/// while !session.tick().is_locked() {}
/// assert_eq!(session.stats().completed_pieces(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession<S = RandomPieces> {
    field: GameField,
    stats: GameStats,
    phase: SessionPhase,
    timer: DropTimer,
    source: S,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Creates a session drawing pieces uniformly at random.
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(RandomPieces::new())
    }
}

impl<S> GameSession<S>
where
    S: PieceSource,
{
    #[must_use]
    pub fn with_source(source: S) -> Self {
        Self::with_board(Board::EMPTY, source)
    }

    /// Creates a `NotStarted` session on a pre-filled board.
    ///
    /// [`Self::reset`] still returns to an empty board.
    #[must_use]
    pub fn with_board(board: Board, source: S) -> Self {
        Self {
            field: GameField::with_board(board),
            stats: GameStats::new(),
            phase: SessionPhase::NotStarted,
            timer: DropTimer::disarmed(),
            source,
        }
    }

    #[must_use]
    pub fn field(&self) -> &GameField {
        &self.field
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.field.board()
    }

    #[must_use]
    pub fn falling_piece(&self) -> Option<&Piece> {
        self.field.falling_piece()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn timer(&self) -> &DropTimer {
        &self.timer
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns a read-only view for rendering.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(&self.field, &self.stats, self.phase)
    }

    /// Spawns the first piece and starts gravity.
    ///
    /// Returns `false`, changing nothing, unless the session is `NotStarted`.
    pub fn start(&mut self) -> bool {
        if !self.phase.is_not_started() {
            return false;
        }
        // A blocked spawn can only happen on a pre-filled board.
        self.phase = match self.field.spawn_first(&mut self.source) {
            Ok(()) => SessionPhase::Running,
            Err(_) => SessionPhase::GameOver,
        };
        self.sync_timer();
        true
    }

    /// Returns to the initial state. Valid from every phase.
    ///
    /// The piece source is kept, so a seeded source continues its sequence.
    pub fn reset(&mut self) {
        self.field = GameField::new();
        self.stats = GameStats::new();
        self.phase = SessionPhase::NotStarted;
        self.sync_timer();
    }

    /// Switches between `Running` and `Paused`.
    ///
    /// Returns `false` in the other phases.
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            SessionPhase::Running => SessionPhase::Paused,
            SessionPhase::Paused => SessionPhase::Running,
            SessionPhase::NotStarted | SessionPhase::GameOver => return false,
        };
        self.sync_timer();
        true
    }

    /// Shifts the falling piece by one cell.
    ///
    /// A blocked downward move locks the piece; blocked sideways moves are
    /// discarded.
    pub fn move_piece(&mut self, direction: MoveDirection) -> StepOutcome {
        let Some(piece) = self.running_piece() else {
            return StepOutcome::Ignored;
        };
        if self.field.set_falling_piece(piece.moved(direction)).is_ok() {
            return StepOutcome::Moved;
        }
        match direction {
            MoveDirection::Down => StepOutcome::Locked(self.lock_piece()),
            MoveDirection::Left | MoveDirection::Right => StepOutcome::Blocked,
        }
    }

    /// Rotates the falling piece a quarter turn clockwise.
    ///
    /// A colliding rotation is discarded; no wall kick is attempted.
    pub fn rotate(&mut self) -> StepOutcome {
        let Some(piece) = self.running_piece() else {
            return StepOutcome::Ignored;
        };
        match self.field.set_falling_piece(piece.rotated_right()) {
            Ok(()) => StepOutcome::Moved,
            Err(_) => StepOutcome::Blocked,
        }
    }

    /// One step of gravity; the same as a downward move.
    pub fn tick(&mut self) -> StepOutcome {
        self.move_piece(MoveDirection::Down)
    }

    /// Feeds wall time to the gravity timer and runs every tick that falls due.
    ///
    /// Returns the number of ticks run. Nothing happens unless the session is
    /// running.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        self.timer.accumulate(elapsed);
        let mut ticks = 0;
        while self.timer.take_due() {
            self.tick();
            ticks += 1;
        }
        ticks
    }

    fn running_piece(&self) -> Option<Piece> {
        if !self.phase.is_running() {
            return None;
        }
        self.field.falling_piece().copied()
    }

    fn lock_piece(&mut self) -> LockReport {
        let (cleared_lines, result) = self.field.complete_piece_drop(&mut self.source);
        let ScoreGain { points, level_up } = self.stats.complete_piece_drop(cleared_lines);
        let game_over = result.is_err();
        if game_over {
            self.phase = SessionPhase::GameOver;
        }
        if game_over || level_up {
            self.sync_timer();
        }
        LockReport {
            cleared_lines,
            score_gained: points,
            level_up,
            game_over,
        }
    }

    /// Re-arms gravity after a phase or speed change.
    fn sync_timer(&mut self) {
        if self.phase.is_running() {
            self.timer.arm(self.stats.drop_interval());
        } else {
            self.timer.disarm();
        }
    }
}
