use clap::{Parser, Subcommand};

use self::{shapes::ShapesArg, simulate::SimulateArg};

mod shapes;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Run a headless game session and print the final state
    Simulate(#[clap(flatten)] SimulateArg),
    /// Print every tetromino in all four rotations
    Shapes(#[clap(flatten)] ShapesArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Simulate(SimulateArg::default())) {
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Shapes(arg) => shapes::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_args() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_simulate() {
        let args = CommandArgs::try_parse_from([
            "tetris",
            "simulate",
            "--seed",
            "000102030405060708090a0b0c0d0e0f",
            "--script",
            "<<^v.",
            "--json",
        ])
        .unwrap();
        assert!(matches!(args.mode, Some(Mode::Simulate(_))));
    }

    #[test]
    fn test_rejects_bad_script() {
        let err = CommandArgs::try_parse_from(["tetris", "simulate", "--script", "<x"]).unwrap_err();
        assert!(err.to_string().contains("'x'"));
    }
}
