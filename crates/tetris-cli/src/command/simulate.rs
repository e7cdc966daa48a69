use std::{fmt, io::Write as _, path::PathBuf, time::Duration, vec};

use anyhow::Context as _;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;
use tetris_engine::{GameSession, PieceSeed, PieceSource, RandomPieces, SessionSnapshot};

use crate::{
    script::{Action, Script},
    util::{self, Output},
};

const DEFAULT_MAX_STEPS: usize = 1000;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Seed for the piece sequence and the random policy (32 hex digits)
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// Actions to play instead of the random policy: `<` `>` `v` `^` `.` `p`
    #[arg(long)]
    script: Option<Script>,
    /// Maximum number of actions to play
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,
    /// Wall time in milliseconds fed to the gravity timer after each action
    #[arg(long, default_value_t = 0)]
    tick_ms: u64,
    /// Start from the board in this text file
    #[arg(long)]
    board: Option<PathBuf>,
    /// Print the final state as JSON
    #[arg(long)]
    json: bool,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Default for SimulateArg {
    fn default() -> Self {
        Self {
            seed: None,
            script: None,
            max_steps: DEFAULT_MAX_STEPS,
            tick_ms: 0,
            board: None,
            json: false,
            output: None,
        }
    }
}

/// Chooses the next action of a headless run.
#[derive(Debug, Clone)]
enum Policy {
    Script(vec::IntoIter<Action>),
    Random(Pcg32),
}

impl Policy {
    fn next_action(&mut self) -> Option<Action> {
        match self {
            Policy::Script(actions) => actions.next(),
            Policy::Random(rng) => {
                Some(Action::PLAYABLE[rng.random_range(0..Action::PLAYABLE.len())])
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct SimulationReport {
    seed: PieceSeed,
    steps: usize,
    snapshot: SessionSnapshot,
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            seed,
            steps,
            snapshot,
        } = self;
        writeln!(f, "seed:   {seed}")?;
        writeln!(f, "steps:  {steps}")?;
        writeln!(f, "phase:  {:?}", snapshot.phase)?;
        writeln!(f, "score:  {}", snapshot.score)?;
        writeln!(f, "lines:  {}", snapshot.lines)?;
        writeln!(
            f,
            "level:  {} ({} ms)",
            snapshot.level, snapshot.drop_interval_ms
        )?;
        writeln!(f, "pieces: {}", snapshot.completed_pieces)?;
        match snapshot.next_kind {
            Some(kind) => writeln!(f, "next:   {kind}")?,
            None => writeln!(f, "next:   -")?,
        }
        writeln!(f, "{}", snapshot.board)
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        seed,
        script,
        max_steps,
        tick_ms,
        board,
        json,
        output,
    } = arg;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = Pcg32::from_seed(seed.to_bytes());
    let pieces = RandomPieces::with_seed(rng.random());
    let board = board
        .as_ref()
        .map(util::read_board_file)
        .transpose()?
        .unwrap_or_default();

    let mut session = GameSession::with_board(board, pieces);
    let mut policy = match script {
        Some(script) => Policy::Script(script.actions().to_vec().into_iter()),
        None => Policy::Random(rng),
    };
    let steps = play(
        &mut session,
        &mut policy,
        *max_steps,
        Duration::from_millis(*tick_ms),
    );

    let report = SimulationReport {
        seed,
        steps,
        snapshot: session.snapshot(),
    };
    let mut output = Output::from_output_path(output.clone())?;
    if *json {
        output.write_json(&report)?;
    } else {
        write!(output, "{report}")
            .and_then(|()| output.flush())
            .with_context(|| format!("Failed to write report to {}", output.display_path()))?;
    }
    Ok(())
}

/// Starts `session` and plays actions until the policy runs dry, `max_steps`
/// is reached or the game is over. Returns the number of actions played.
fn play<S>(
    session: &mut GameSession<S>,
    policy: &mut Policy,
    max_steps: usize,
    tick: Duration,
) -> usize
where
    S: PieceSource,
{
    session.start();
    let mut steps = 0;
    while steps < max_steps && !session.phase().is_game_over() {
        let Some(action) = policy.next_action() else {
            break;
        };
        action.apply(session);
        session.advance(tick);
        steps += 1;
    }
    steps
}
