//! Textual action scripts for headless sessions.
//!
//! Each character is one action: `<` left, `>` right, `v` down, `^` rotate,
//! `.` gravity tick and `p` pause toggle. Whitespace is ignored, so long
//! scripts can be wrapped.

use std::{fmt, str::FromStr};

use tetris_engine::{GameSession, MoveDirection, PieceSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Left,
    Right,
    Down,
    Rotate,
    Tick,
    TogglePause,
}

impl Action {
    /// Actions a random policy picks from. Pausing is left out.
    pub(crate) const PLAYABLE: [Self; 5] = [
        Action::Left,
        Action::Right,
        Action::Down,
        Action::Rotate,
        Action::Tick,
    ];

    pub(crate) const fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Action::Left),
            '>' => Some(Action::Right),
            'v' => Some(Action::Down),
            '^' => Some(Action::Rotate),
            '.' => Some(Action::Tick),
            'p' => Some(Action::TogglePause),
            _ => None,
        }
    }

    pub(crate) const fn as_char(self) -> char {
        match self {
            Action::Left => '<',
            Action::Right => '>',
            Action::Down => 'v',
            Action::Rotate => '^',
            Action::Tick => '.',
            Action::TogglePause => 'p',
        }
    }

    /// Performs the action on `session`.
    ///
    /// Returns `false` if the session was not in a phase that accepts it.
    pub(crate) fn apply<S>(self, session: &mut GameSession<S>) -> bool
    where
        S: PieceSource,
    {
        let outcome = match self {
            Action::Left => session.move_piece(MoveDirection::Left),
            Action::Right => session.move_piece(MoveDirection::Right),
            Action::Down => session.move_piece(MoveDirection::Down),
            Action::Rotate => session.rotate(),
            Action::Tick => session.tick(),
            Action::TogglePause => return session.toggle_pause(),
        };
        !outcome.is_ignored()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid action {ch:?} at position {pos}")]
pub(crate) struct ParseActionError {
    pos: usize,
    ch: char,
}

/// A parsed action string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Script(Vec<Action>);

impl Script {
    pub(crate) fn actions(&self) -> &[Action] {
        &self.0
    }
}

impl FromStr for Script {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .filter(|(_, ch)| !ch.is_whitespace())
            .map(|(pos, ch)| Action::from_char(ch).ok_or(ParseActionError { pos, ch }))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|action| write!(f, "{action}"))
    }
}
