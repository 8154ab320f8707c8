use std::path::PathBuf;

use anyhow::Context;

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct CalcArg {
    /// Path to the figure JSON file
    figure: PathBuf,
    /// Output file path (defaults to stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &CalcArg) -> anyhow::Result<()> {
    let CalcArg { figure, output } = arg;

    let figure = util::read_figure_file(figure)?;
    log::info!("computing {} traces", figure.traces.len());

    let outputs = figure
        .calc()
        .context("Failed to build the figure axes")?;
    let num_diagnostics = outputs.iter().map(|o| o.diagnostics.len()).sum::<usize>();
    if num_diagnostics > 0 {
        log::info!("{num_diagnostics} diagnostics raised");
    }

    Output::save_json(&outputs, output.clone())?;
    Ok(())
}
