//! Figures: box traces sharing one pair of axes
//!
//! A [`Figure`] is what the command-line front end reads from disk:
//!
//! ```json
//! {
//!   "xaxis": { "type": "category", "categories": ["a", "b"] },
//!   "yaxis": { "type": "linear" },
//!   "traces": [{ "x": ["a", "b", "a"], "y": [1, 2, 3] }]
//! }
//! ```
//!
//! Category axes without an explicit `categories` list collect their
//! categories from the trace data in first-seen order.

use serde::{Deserialize, Serialize};

use crate::{
    axis::{Axis, AxisError, AxisKind, CategoryAxis, Datum, LinearAxis},
    calc,
    record::CalcOutput,
    trace::{AxisLetter, BoxTrace},
};

/// Axis settings of a figure.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisSpec {
    #[serde(rename = "type")]
    pub kind: AxisKind,
    /// Preset category order; only used by category axes.
    pub categories: Option<Vec<String>>,
}

/// A concrete axis built from an [`AxisSpec`].
#[derive(Debug, Clone)]
pub enum FigureAxis {
    Linear(LinearAxis),
    Category(CategoryAxis),
}

impl Axis for FigureAxis {
    fn kind(&self) -> AxisKind {
        match self {
            FigureAxis::Linear(axis) => axis.kind(),
            FigureAxis::Category(axis) => axis.kind(),
        }
    }

    fn d2c(&self, datum: &Datum) -> Option<f64> {
        match self {
            FigureAxis::Linear(axis) => axis.d2c(datum),
            FigureAxis::Category(axis) => axis.d2c(datum),
        }
    }
}

/// Box traces and the axes they share.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Figure {
    pub xaxis: AxisSpec,
    pub yaxis: AxisSpec,
    pub traces: Vec<BoxTrace>,
}

impl Figure {
    /// Data bound to `letter` that a category axis must know about.
    fn category_data(&self, letter: AxisLetter) -> Vec<Datum> {
        let mut data = vec![];
        for trace in &self.traces {
            let (pos_letter, _) = trace.orientation().letters();
            if let Some(values) = trace.data(letter) {
                data.extend(values.iter().cloned());
            } else if letter == pos_letter {
                if let Some(pos0) = trace.pos0(letter) {
                    data.push(pos0.clone());
                } else if let Some(name) = trace.name_as_position(AxisKind::Category) {
                    data.push(Datum::from(name));
                }
            }
        }
        data
    }

    fn build_axis(&self, letter: AxisLetter) -> Result<FigureAxis, AxisError> {
        let spec = match letter {
            AxisLetter::X => &self.xaxis,
            AxisLetter::Y => &self.yaxis,
        };
        Ok(match spec.kind {
            AxisKind::Linear => FigureAxis::Linear(LinearAxis),
            AxisKind::Category => {
                let mut axis = CategoryAxis::new(spec.categories.iter().flatten().cloned())?;
                axis.extend_from_data(&self.category_data(letter));
                FigureAxis::Category(axis)
            }
        })
    }

    /// Builds the x and y axes.
    pub fn axes(&self) -> Result<(FigureAxis, FigureAxis), AxisError> {
        Ok((self.build_axis(AxisLetter::X)?, self.build_axis(AxisLetter::Y)?))
    }

    /// Computes every trace of the figure, assigning group slots in order
    /// like [`calc::calc_traces`].
    ///
    /// # Examples
    ///
    /// ```
    /// use whisker_calc::figure::Figure;
    ///
    /// let figure: Figure = serde_json::from_value(serde_json::json!({
    ///     "xaxis": { "type": "category" },
    ///     "traces": [
    ///         { "x": ["b", "a", "b"], "y": [1, 2, 3] },
    ///         { "name": "a", "y": [10, 20] },
    ///     ],
    /// })).unwrap();
    ///
    /// let outputs = figure.calc().unwrap();
    /// let positions = outputs[0].calc.records().iter().map(|r| r.pos).collect::<Vec<_>>();
    /// assert_eq!(positions, [0.0, 1.0]); // "b", "a"
    /// // the second trace is placed at its name's category
    /// assert_eq!(outputs[1].calc.records()[0].pos, 1.0);
    /// ```
    pub fn calc(&self) -> Result<Vec<CalcOutput>, AxisError> {
        let (mut xaxis, mut yaxis) = self.axes()?;

        let mut slot = 0;
        let mut outputs = Vec::with_capacity(self.traces.len());
        for trace in &self.traces {
            let pos_axis = match trace.orientation().letters().0 {
                AxisLetter::X => &mut xaxis,
                AxisLetter::Y => &mut yaxis,
            };
            // a trace placed by its slot adds the slot as a category of its own
            if let FigureAxis::Category(axis) = pos_axis
                && !trace.is_empty()
                && trace.positioned_by_slot(AxisKind::Category)
            {
                axis.extend_from_data([&Datum::from(f64::from(slot))]);
            }

            let output = calc::calc_box(trace, &xaxis, &yaxis, slot);
            if output.consumes_slot() {
                slot += 1;
            }
            outputs.push(output);
        }
        Ok(outputs)
    }
}
