use clap::{Parser, Subcommand};

use self::{inspect::InspectArg, play::PlayArg, simulate::SimulateArg};

mod inspect;
mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a deck interactively in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Play a deck with a scripted player and print a JSON summary
    Simulate(#[clap(flatten)] SimulateArg),
    /// Print word counts and the section plan of a deck
    Inspect(#[clap(flatten)] InspectArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Inspect(arg) => inspect::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_cli_definition() {
        CommandArgs::command().debug_assert();
    }
}
