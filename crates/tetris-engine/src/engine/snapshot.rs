use serde::{Deserialize, Serialize};

use crate::core::{board::Board, piece::Piece, shape::PieceKind};

use super::{GameField, GameStats, SessionPhase};

/// Read-only view of a session for rendering or export.
///
/// `board` already has the falling piece drawn in; `falling_piece` is kept
/// separately so a renderer can style it differently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub board: Board,
    pub falling_piece: Option<Piece>,
    pub next_kind: Option<PieceKind>,
    pub score: usize,
    pub lines: usize,
    pub level: usize,
    pub drop_interval_ms: u64,
    pub completed_pieces: usize,
    pub phase: SessionPhase,
}

impl SessionSnapshot {
    pub(crate) fn capture(field: &GameField, stats: &GameStats, phase: SessionPhase) -> Self {
        Self {
            board: field.display_board(),
            falling_piece: field.falling_piece().copied(),
            next_kind: field.next_kind(),
            score: stats.score(),
            lines: stats.total_cleared_lines(),
            level: stats.level(),
            drop_interval_ms: u64::try_from(stats.drop_interval().as_millis()).unwrap_or(u64::MAX),
            completed_pieces: stats.completed_pieces(),
            phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{GameSession, SequencePieces};

    use super::*;

    #[test]
    fn test_snapshot_of_running_session() {
        let mut session = GameSession::with_source(SequencePieces::new([PieceKind::T, PieceKind::I]));
        session.start();
        let snapshot = session.snapshot();

        assert_eq!(snapshot.phase, SessionPhase::Running);
        assert_eq!(snapshot.falling_piece, Some(Piece::new(PieceKind::T)));
        assert_eq!(snapshot.next_kind, Some(PieceKind::I));
        assert_eq!(snapshot.board.occupied_count(), 4);
        assert_eq!(snapshot.level, 1);
        assert_eq!(snapshot.drop_interval_ms, 1000);
        assert_eq!(session.board().occupied_count(), 0);
    }

    #[test]
    fn test_snapshot_json() {
        let session = GameSession::with_source(SequencePieces::repeat(PieceKind::O));
        let value = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(value["phase"], "NotStarted");
        assert_eq!(value["score"], 0);
        assert_eq!(value["falling_piece"], serde_json::Value::Null);

        let back: SessionSnapshot = serde_json::from_value(value).unwrap();
        assert_eq!(back, session.snapshot());
    }
}
