//! Per-box summary tables
//!
//! Prints one table per trace with the five-number summary, the whisker
//! fences and the number of samples drawn as points.

use std::path::PathBuf;

use anyhow::Context;
use whisker_calc::{
    record::{BoxCalc, BoxRecord, CalcOutput},
    trace::BoxTrace,
};

use crate::util;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SummaryArg {
    /// Path to the figure JSON file
    figure: PathBuf,
}

pub(crate) fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let figure = util::read_figure_file(&arg.figure)?;
    let outputs = figure
        .calc()
        .context("Failed to build the figure axes")?;

    for (i, (trace, output)) in figure.traces.iter().zip(&outputs).enumerate() {
        print_trace_summary(&trace_label(i, trace), output);
        println!();
    }
    Ok(())
}

fn trace_label(index: usize, trace: &BoxTrace) -> String {
    match &trace.name {
        Some(name) => format!("trace {index} ({name})"),
        None => format!("trace {index}"),
    }
}

fn print_trace_summary(label: &str, output: &CalcOutput) {
    let BoxCalc::Boxes { records, range } = &output.calc else {
        println!("{label}: nothing to draw");
        return;
    };

    let slot = output.calc.meta().map_or(0, |meta| meta.num);
    println!("{label}, slot {slot}, {} boxes", records.len());
    println!("{}", table_header());
    println!("  {}", "-".repeat(TABLE_WIDTH));
    for record in records {
        println!("{}", table_row(record));
    }
    if let Some(range) = range {
        println!("  value range: [{:.3}, {:.3}]", range.min, range.max);
    }
    for diagnostic in &output.diagnostics {
        println!("  warning: {diagnostic}");
    }
}

// pos(10) + samples(8) + 7 stats(10 each) + points(7) + spaces(9)
const TABLE_WIDTH: usize = 104;

fn table_header() -> String {
    format!(
        "  {:>10} {:>8} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>7}",
        "Position", "Samples", "Min", "LF", "Q1", "Median", "Q3", "UF", "Max", "Points",
    )
}

fn table_row(record: &BoxRecord) -> String {
    format!(
        "  {:>10.3} {:>8} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>7}",
        record.pos,
        record.pts.len(),
        record.min,
        record.lf,
        record.q1,
        record.med,
        record.q3,
        record.uf,
        record.max,
        record.pts2.len(),
    )
}
