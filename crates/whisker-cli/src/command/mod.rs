use clap::{Parser, Subcommand};
use log::LevelFilter;

use self::{calc::CalcArg, summary::SummaryArg};

mod calc;
mod summary;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log progress and per-trace diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Compute box records for every trace of a figure and write them as JSON
    Calc(#[clap(flatten)] CalcArg),
    /// Print a per-box summary table for every trace of a figure
    Summary(#[clap(flatten)] SummaryArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    simple_logger::SimpleLogger::new()
        .with_level(level)
        .without_timestamps()
        .init()?;

    match args.mode {
        Mode::Calc(arg) => calc::run(&arg)?,
        Mode::Summary(arg) => summary::run(&arg)?,
    }
    Ok(())
}
