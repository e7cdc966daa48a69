use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::{
    BOARD_WIDTH,
    shape::{PieceKind, Shape},
};

/// A falling tetromino: kind, position and rotation.
///
/// Only the rotation index is stored. The bitmap is recomputed from the
/// catalog on every query, so rotating forward four times always lands on the
/// original shape. Pieces are immutable; movement and rotation return new
/// `Piece` values.
///
/// # Coordinate System
///
/// - The position is the top-left corner of the rotated bitmap
/// - X increases rightward, Y increases downward
/// - Coordinates are signed: a pose may extend past the board edges and is
///   then rejected by the placement check
///
/// # Example
///
/// ```
/// use tetris_engine::{Piece, PieceKind};
///
/// let piece = Piece::new(PieceKind::T);
/// assert_eq!((piece.position().x(), piece.position().y()), (4, 0));
///
/// let moved = piece.right().rotated_right();
/// assert_eq!(moved.position().x(), 5);
/// assert_eq!(moved.rotation().turns(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    position: PiecePosition,
    rotation: PieceRotation,
    kind: PieceKind,
}

impl Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "kind#rotation@x,y" (e.g., "S#1@4,18")
        let s = format!(
            "{}#{}@{},{}",
            self.kind.as_char(),
            self.rotation.0,
            self.position.x,
            self.position.y
        );
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for Piece {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        let s = String::deserialize(deserializer)?;
        let malformed = || D::Error::custom(format!("expected 'kind#rotation@x,y', got '{s}'"));

        let (kind_str, rest) = s.split_once('#').ok_or_else(malformed)?;
        let (rotation_str, position_str) = rest.split_once('@').ok_or_else(malformed)?;
        let (x_str, y_str) = position_str.split_once(',').ok_or_else(malformed)?;

        let mut chars = kind_str.chars();
        let kind = match (chars.next(), chars.next()) {
            (Some(c), None) => PieceKind::from_char(c)
                .ok_or_else(|| D::Error::custom(format!("invalid piece kind: {c}")))?,
            _ => {
                return Err(D::Error::custom(format!(
                    "piece kind must be single character, got '{kind_str}'"
                )));
            }
        };

        let rotation = rotation_str.parse::<u8>().map_err(|e| {
            D::Error::custom(format!("invalid rotation: {rotation_str} ({e})"))
        })?;
        if rotation > 3 {
            return Err(D::Error::custom(format!(
                "rotation must be 0-3, got {rotation}"
            )));
        }

        let x = x_str
            .parse::<i16>()
            .map_err(|e| D::Error::custom(format!("invalid x position: {x_str} ({e})")))?;
        let y = y_str
            .parse::<i16>()
            .map_err(|e| D::Error::custom(format!("invalid y position: {y_str} ({e})")))?;

        Ok(Piece {
            position: PiecePosition::new(x, y),
            rotation: PieceRotation(rotation),
            kind,
        })
    }
}

impl Piece {
    /// Creates a piece at the spawn pose.
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        Self::with_pose(kind, PiecePosition::SPAWN_POSITION, PieceRotation::SPAWN)
    }

    #[must_use]
    pub const fn with_pose(kind: PieceKind, position: PiecePosition, rotation: PieceRotation) -> Self {
        Self {
            position,
            rotation,
            kind,
        }
    }

    #[must_use]
    pub const fn position(&self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub const fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the bitmap for the current rotation.
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.kind.shape(self.rotation.0)
    }

    /// Returns the absolute `(x, y)` of every filled cell.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i16, i16)> {
        let shape = self.shape();
        let PiecePosition { x, y } = self.position;
        let cells = shape.filled_cells().collect::<ArrayVec<_, 4>>();
        cells
            .into_iter()
            .map(move |(dx, dy)| {
                (
                    x.saturating_add(i16::from(dx)),
                    y.saturating_add(i16::from(dy)),
                )
            })
    }

    #[must_use]
    pub const fn left(&self) -> Self {
        self.moved(MoveDirection::Left)
    }

    #[must_use]
    pub const fn right(&self) -> Self {
        self.moved(MoveDirection::Right)
    }

    #[must_use]
    pub const fn down(&self) -> Self {
        self.moved(MoveDirection::Down)
    }

    #[must_use]
    pub const fn moved(&self, direction: MoveDirection) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            position: PiecePosition::new(
                self.position.x.saturating_add(dx),
                self.position.y.saturating_add(dy),
            ),
            rotation: self.rotation,
            kind: self.kind,
        }
    }

    #[must_use]
    pub const fn rotated_right(&self) -> Self {
        Self {
            position: self.position,
            rotation: self.rotation.rotated_right(),
            kind: self.kind,
        }
    }
}

/// Direction of a single-cell move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum MoveDirection {
    Left,
    Right,
    Down,
}

impl MoveDirection {
    /// Returns the `(dx, dy)` offset of one step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i16, i16) {
        match self {
            MoveDirection::Left => (-1, 0),
            MoveDirection::Right => (1, 0),
            MoveDirection::Down => (0, 1),
        }
    }
}

/// Board position of a piece's bitmap anchor (its top-left cell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PiecePosition {
    x: i16,
    y: i16,
}

impl PiecePosition {
    /// Spawn anchor: `x = width / 2 - 1`, `y = 0`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const SPAWN_POSITION: Self = Self::new((BOARD_WIDTH / 2) as i16 - 1, 0);

    #[must_use]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> i16 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i16 {
        self.y
    }
}

/// Rotation state of a piece.
///
/// Counts clockwise quarter turns from the spawn orientation and wraps
/// modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceRotation(u8);

impl PieceRotation {
    pub const SPAWN: Self = Self(0);

    #[must_use]
    pub const fn new(turns: u8) -> Self {
        Self(turns % 4)
    }

    #[must_use]
    pub const fn turns(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn rotated_right(self) -> Self {
        Self((self.0 + 1) % 4)
    }
}
