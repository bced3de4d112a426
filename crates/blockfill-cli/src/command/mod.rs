use clap::{Parser, Subcommand};

use self::{auto_play::AutoPlayArg, best_move::BestMoveArg, list_pieces::ListPiecesArg};

mod auto_play;
mod best_move;
mod list_pieces;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Let the AI play whole games and record the results
    AutoPlay(#[clap(flatten)] AutoPlayArg),
    /// Find the best placement of three pieces on a given board
    BestMove(#[clap(flatten)] BestMoveArg),
    /// Print every piece shape of the catalog
    ListPieces(#[clap(flatten)] ListPiecesArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::AutoPlay(arg) => auto_play::run(&arg)?,
        Mode::BestMove(arg) => best_move::run(&arg)?,
        Mode::ListPieces(arg) => list_pieces::run(&arg)?,
    }
    Ok(())
}
