use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{
    DROP_INTERVAL_STEP, INITIAL_DROP_INTERVAL, LINE_CLEAR_BASE_SCORE, LINES_PER_LEVEL,
    MIN_DROP_INTERVAL,
};

/// Returns the gravity interval for `level` (1-based).
///
/// Starts at 1000 ms and shrinks by 100 ms per level, never going below
/// 100 ms.
///
/// ```
/// use std::time::Duration;
/// use tetris_engine::engine::drop_interval;
///
/// assert_eq!(drop_interval(1), Duration::from_millis(1000));
/// assert_eq!(drop_interval(2), Duration::from_millis(900));
/// assert_eq!(drop_interval(10), Duration::from_millis(100));
/// assert_eq!(drop_interval(11), Duration::from_millis(100));
/// ```
#[must_use]
pub fn drop_interval(level: usize) -> Duration {
    let steps = u32::try_from(level.saturating_sub(1)).unwrap_or(u32::MAX);
    INITIAL_DROP_INTERVAL
        .saturating_sub(DROP_INTERVAL_STEP.saturating_mul(steps))
        .max(MIN_DROP_INTERVAL)
}

/// Points and level change produced by one lock event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreGain {
    pub points: usize,
    pub level_up: bool,
}

/// Score, cleared lines, level and gravity speed of a session.
///
/// # Scoring
///
/// A lock event that clears `n` lines is worth `n * 100 * level`, using the
/// level in effect before the event. The level is `lines / 10 + 1`; each
/// level-up shortens the drop interval by 100 ms down to 100 ms.
///
/// There are no combo, back-to-back, T-spin or drop bonuses.
///
/// # Example
///
/// ```
/// use tetris_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 400);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    level: usize,
    drop_interval: Duration,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates statistics for a fresh session: level 1, 1000 ms interval.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            drop_interval: INITIAL_DROP_INTERVAL,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Time between automatic gravity ticks.
    #[must_use]
    pub const fn drop_interval(&self) -> Duration {
        self.drop_interval
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of lock events by number of cleared lines.
    ///
    /// Index `n` counts the locks that cleared exactly `n` lines (0 to 4).
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece locks and `cleared_lines` rows clear.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> ScoreGain {
        self.completed_pieces += 1;
        if let Some(count) = self.line_cleared_counter.get_mut(cleared_lines) {
            *count += 1;
        }
        if cleared_lines == 0 {
            return ScoreGain::default();
        }

        let points = cleared_lines * LINE_CLEAR_BASE_SCORE * self.level;
        self.score += points;
        self.total_cleared_lines += cleared_lines;

        let level = self.total_cleared_lines / LINES_PER_LEVEL + 1;
        let level_up = level > self.level;
        if level_up {
            self.level = level;
            self.drop_interval = drop_interval(level);
        }
        ScoreGain { points, level_up }
    }
}
