//! Property tests for session invariants over random action sequences.

use std::time::Duration;

use proptest::prelude::*;
use tetris_engine::{
    Board, GameSession, MoveDirection, PieceSeed, RandomPieces, SessionPhase, StepOutcome,
    drop_interval,
};

#[derive(Debug, Clone, Copy)]
enum Action {
    Move(MoveDirection),
    Rotate,
    Tick,
    TogglePause,
    Advance(u64),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => Just(Action::Move(MoveDirection::Left)),
        3 => Just(Action::Move(MoveDirection::Right)),
        4 => Just(Action::Move(MoveDirection::Down)),
        3 => Just(Action::Rotate),
        3 => Just(Action::Tick),
        1 => Just(Action::TogglePause),
        2 => (0u64..3000).prop_map(Action::Advance),
    ]
}

/// What applying an [`Action`] returned.
#[derive(Debug, Clone, Copy)]
enum Applied {
    Step(StepOutcome),
    PauseToggled(bool),
    Ticks(usize),
}

fn apply(session: &mut GameSession, action: Action) -> Applied {
    match action {
        Action::Move(direction) => Applied::Step(session.move_piece(direction)),
        Action::Rotate => Applied::Step(session.rotate()),
        Action::Tick => Applied::Step(session.tick()),
        Action::TogglePause => Applied::PauseToggled(session.toggle_pause()),
        Action::Advance(ms) => Applied::Ticks(session.advance(Duration::from_millis(ms))),
    }
}

fn assert_piece_in_bounds(session: &GameSession) {
    let Some(piece) = session.falling_piece() else {
        return;
    };
    for (x, y) in piece.occupied_positions() {
        assert!((0..10).contains(&x), "x out of bounds: {piece:?}");
        assert!(y < 20, "y out of bounds: {piece:?}");
        if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) {
            assert!(!session.board().is_occupied(x, y), "overlap: {piece:?}");
        }
    }
}

fn assert_stats_consistent(session: &GameSession) {
    let stats = session.stats();
    assert_eq!(stats.level(), stats.total_cleared_lines() / 10 + 1);
    assert_eq!(stats.drop_interval(), drop_interval(stats.level()));
    assert!(stats.drop_interval() >= Duration::from_millis(100));
    assert_eq!(session.timer().is_armed(), session.phase().is_running());
}

fn assert_no_full_rows(board: &Board) {
    for y in 0..Board::HEIGHT {
        assert!(!board.is_row_filled(y), "row {y} left full");
    }
}

proptest! {
    #[test]
    fn random_actions_respect_invariants(
        seed in any::<[u8; 16]>(),
        actions in prop::collection::vec(action(), 1..400),
    ) {
        let mut session = GameSession::with_source(RandomPieces::with_seed(PieceSeed::from_bytes(seed)));
        let initial = session.snapshot();
        session.start();
        prop_assert_eq!(session.phase(), SessionPhase::Running);

        let mut prev_score = 0;
        let mut prev_lines = 0;
        for action in actions {
            let before = session.clone();
            match apply(&mut session, action) {
                Applied::Step(StepOutcome::Ignored | StepOutcome::Blocked) | Applied::Ticks(0) => {
                    prop_assert_eq!(session.field(), before.field());
                    prop_assert_eq!(session.stats(), before.stats());
                    prop_assert_eq!(session.phase(), before.phase());
                }
                Applied::Step(StepOutcome::Locked(report)) => {
                    prop_assert_eq!(
                        session.stats().score() - prev_score,
                        report.score_gained
                    );
                    prop_assert_eq!(report.game_over, session.phase().is_game_over());
                    assert_no_full_rows(session.board());
                }
                Applied::PauseToggled(toggled) => {
                    prop_assert_eq!(toggled, !before.phase().is_game_over());
                    prop_assert_eq!(session.field(), before.field());
                }
                Applied::Step(StepOutcome::Moved) | Applied::Ticks(_) => {}
            }
            if !before.phase().is_running() && !matches!(action, Action::TogglePause) {
                prop_assert_eq!(&session, &before);
            }

            assert_piece_in_bounds(&session);
            assert_stats_consistent(&session);
            prop_assert!(session.stats().score() >= prev_score);
            prop_assert!(session.stats().total_cleared_lines() >= prev_lines);
            prop_assert_eq!(session.falling_piece().is_none(), session.phase().is_game_over());
            prop_assert!(session.field().next_kind().is_some());
            prev_score = session.stats().score();
            prev_lines = session.stats().total_cleared_lines();
        }

        session.reset();
        prop_assert_eq!(session.snapshot(), initial);
    }
}
