//! Trace-level entry points
//!
//! [`calc_box`] computes one trace given its group slot; [`calc_traces`]
//! walks an ordered list of traces sharing the same axes and hands out
//! slots in list order, one per trace that produced boxes.

use whisker_stats::binning::PositionBins;

use crate::{
    axis::{Axis, Datum},
    diagnostic::Diagnostic,
    precomputed, raw,
    record::{BoxCalc, CalcMeta, CalcOutput, Labels},
    selection,
    trace::{AxisLetter, BoxTrace, Orientation},
};

/// Inputs shared by the raw-sample and precomputed paths.
pub(crate) struct TraceFrame<'a> {
    pub(crate) trace: &'a BoxTrace,
    pub(crate) len: usize,
    pub(crate) pos_letter: AxisLetter,
    pub(crate) val_letter: AxisLetter,
    /// Position coordinate of each row.
    pub(crate) positions: Vec<Option<f64>>,
    pub(crate) bins: PositionBins,
    pub(crate) val_axis: &'a dyn Axis,
}

/// Position coordinate of every row.
///
/// Without a position array every row shares one fallback position: `x0`
/// (`y0`), else the trace name when the axis can place it, else the slot
/// number. Every fallback goes through the axis, so on a category axis the
/// slot must already be registered as a category.
fn position_coords(
    trace: &BoxTrace,
    letter: AxisLetter,
    axis: &dyn Axis,
    len: usize,
    slot: u32,
) -> Vec<Option<f64>> {
    if let Some(data) = trace.data(letter) {
        return axis.make_calcdata(data, len);
    }

    let coord = if let Some(pos0) = trace.pos0(letter) {
        axis.d2c(pos0)
    } else if let Some(name) = trace.name_as_position(axis.kind()) {
        axis.d2c(&Datum::from(name))
    } else {
        axis.d2c(&Datum::from(f64::from(slot)))
    };
    vec![coord; len]
}

/// Computes the boxes of one trace.
///
/// `xaxis` and `yaxis` convert the trace data; which of them holds the
/// positions depends on the trace orientation. `slot` is the trace's group
/// slot among the box traces sharing the axes; it is recorded in the
/// metadata and used as the position of a trace that has nothing better.
///
/// The computation never fails: unusable samples are dropped, invalid
/// precomputed rows are degraded and reported in
/// [`CalcOutput::diagnostics`], and a trace with nothing to draw yields
/// [`BoxCalc::Empty`].
///
/// # Examples
///
/// ```
/// use whisker_calc::{axis::LinearAxis, calc::calc_box, trace::BoxTrace};
///
/// let trace: BoxTrace = serde_json::from_value(serde_json::json!({
///     "y": [1, 2, 3, 4, 5, 40],
/// })).unwrap();
/// let output = calc_box(&trace, &LinearAxis, &LinearAxis, 0);
///
/// let records = output.calc.records();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].med, 3.5);
/// assert_eq!(records[0].uf, 5.0);
/// // only the outlier is drawn as a point
/// assert_eq!(records[0].plotted_points().map(|pt| pt.v).collect::<Vec<_>>(), [40.0]);
/// ```
#[must_use]
pub fn calc_box(trace: &BoxTrace, xaxis: &dyn Axis, yaxis: &dyn Axis, slot: u32) -> CalcOutput {
    let orientation = trace.orientation();
    let (pos_letter, val_letter) = orientation.letters();
    let (pos_axis, val_axis) = match orientation {
        Orientation::Vertical => (xaxis, yaxis),
        Orientation::Horizontal => (yaxis, xaxis),
    };

    let len = trace.len();
    if len == 0 {
        log::debug!("trace {:?} has no data", trace.name);
        return CalcOutput::empty();
    }

    let positions = position_coords(trace, pos_letter, pos_axis, len, slot);
    let bins = PositionBins::new(positions.iter().flatten().copied());
    let frame = TraceFrame {
        trace,
        len,
        pos_letter,
        val_letter,
        positions,
        bins,
        val_axis,
    };

    let mut diagnostics = Vec::<Diagnostic>::new();
    let (mut records, range) = if trace.has_precomputed_stats() {
        precomputed::adapt(&frame, &mut diagnostics)
    } else {
        let (mut records, range) = raw::aggregate(&frame);
        if let Some(selected) = trace.selected_indices() {
            selection::tag_selected(&mut records, &selected);
        }
        (records, range)
    };

    let Some(first) = records.first_mut() else {
        log::debug!("trace {:?} produced no boxes", trace.name);
        return CalcOutput {
            calc: BoxCalc::Empty,
            diagnostics,
        };
    };
    first.meta = Some(CalcMeta {
        num: slot,
        d_pos: frame.bins.half_width(),
        pos_letter,
        val_letter,
        labels: Labels::new(trace.box_mean()),
    });

    log::debug!(
        "trace {:?}: {} boxes in slot {slot}, {} diagnostics",
        trace.name,
        records.len(),
        diagnostics.len()
    );
    CalcOutput {
        calc: BoxCalc::Boxes { records, range },
        diagnostics,
    }
}

/// Computes every trace in order, assigning group slots as it goes.
///
/// Slots start at 0 and advance only past traces that produced boxes, so
/// the result depends only on the order of `traces`.
///
/// # Examples
///
/// ```
/// use whisker_calc::{axis::LinearAxis, calc::calc_traces, trace::BoxTrace};
///
/// let traces: Vec<BoxTrace> = serde_json::from_value(serde_json::json!([
///     { "y": [1, 2, 3] },
///     { "y": [] },
///     { "y": [4, 5, 6] },
/// ])).unwrap();
/// let outputs = calc_traces(&traces, &LinearAxis, &LinearAxis);
///
/// assert_eq!(outputs[0].calc.meta().unwrap().num, 0);
/// assert!(outputs[1].calc.is_empty());
/// assert_eq!(outputs[2].calc.meta().unwrap().num, 1);
/// // without positions, each trace is placed at its slot
/// assert_eq!(outputs[2].calc.records()[0].pos, 1.0);
/// ```
#[must_use]
pub fn calc_traces(traces: &[BoxTrace], xaxis: &dyn Axis, yaxis: &dyn Axis) -> Vec<CalcOutput> {
    let mut slot = 0;
    traces
        .iter()
        .map(|trace| {
            let output = calc_box(trace, xaxis, yaxis, slot);
            if output.consumes_slot() {
                slot += 1;
            }
            output
        })
        .collect()
}
