use std::io::{self, Write as _};

use tetris_engine::PieceKind;

const ROTATIONS: u8 = 4;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ShapesArg {}

pub(crate) fn run(arg: &ShapesArg) -> anyhow::Result<()> {
    let ShapesArg {} = arg;
    let mut stdout = io::stdout().lock();
    for kind in PieceKind::ALL {
        writeln!(stdout, "{kind}")?;
        for turns in 0..ROTATIONS {
            writeln!(stdout, "rotation {turns}:")?;
            writeln!(stdout, "{}", kind.shape(turns))?;
        }
        writeln!(stdout)?;
    }
    Ok(())
}
