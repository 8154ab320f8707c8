//! Output records handed to rendering
//!
//! A computed trace is a [`BoxCalc`]: either an ordered list of
//! [`BoxRecord`]s with the value range for autoranging, or
//! [`BoxCalc::Empty`] when nothing can be drawn. The first record carries
//! the [`CalcMeta`] shared by the whole trace.
//!
//! ```text
//! CalcOutput
//! ├─ calc: BoxCalc
//! │   ├─ Boxes
//! │   │   ├─ records: Vec<BoxRecord>
//! │   │   │   ├─ pos, five-number summary, fences, notches, mean/sd
//! │   │   │   ├─ pts:  every sample (hover/selection)
//! │   │   │   ├─ pts2: indices into pts of the samples drawn as points
//! │   │   │   └─ meta: Some(CalcMeta) on the first record only
//! │   │   └─ range: value range for autorange
//! │   └─ Empty
//! └─ diagnostics: Vec<Diagnostic>
//! ```

use serde::Serialize;

use crate::{
    diagnostic::Diagnostic,
    trace::{AxisLetter, BoxMean},
};

/// One sample point inside a box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    /// Value coordinate.
    pub v: f64,
    /// Index of the sample in the trace's data arrays.
    pub i: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub htx: Option<String>,
    /// Set by selection tagging.
    pub selected: bool,
}

impl Sample {
    #[must_use]
    pub fn new(v: f64, i: usize) -> Self {
        Self {
            v,
            i,
            tx: None,
            htx: None,
            selected: false,
        }
    }
}

/// Statistics for one box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxRecord {
    /// Position coordinate of the box.
    pub pos: f64,
    /// Axis the position binds to.
    pub pos_letter: AxisLetter,
    pub min: f64,
    pub q1: f64,
    pub med: f64,
    pub q3: f64,
    pub max: f64,
    /// Lower fence.
    pub lf: f64,
    /// Upper fence.
    pub uf: f64,
    /// Lower suspected-outlier threshold (raw samples only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lo: Option<f64>,
    /// Upper suspected-outlier threshold (raw samples only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uo: Option<f64>,
    /// Lower notch bound.
    pub ln: f64,
    /// Upper notch bound.
    pub un: f64,
    pub mean: Option<f64>,
    pub sd: Option<f64>,
    /// All samples, sorted by value.
    pub pts: Vec<Sample>,
    /// Indices into `pts` of the samples drawn as points, ascending.
    pub pts2: Vec<usize>,
    /// Trace-wide metadata, present on the first record only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<CalcMeta>,
}

impl BoxRecord {
    /// The samples drawn as points.
    pub fn plotted_points(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.pts2.iter().filter_map(|&k| self.pts.get(k))
    }

    /// The samples flagged as selected.
    pub fn selected_points(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.pts.iter().filter(|pt| pt.selected)
    }

    /// Whether every summary field collapsed to one value.
    #[must_use]
    pub fn is_flat(&self) -> bool {
        [self.min, self.lf, self.q1, self.q3, self.uf, self.max]
            .iter()
            .all(|&v| v == self.med)
    }
}

/// Metadata shared by all boxes of a trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalcMeta {
    /// Group slot of the trace among the box traces sharing the axes.
    pub num: u32,
    /// Half the minimum distance between box positions.
    pub d_pos: f64,
    pub pos_letter: AxisLetter,
    pub val_letter: AxisLetter,
    pub labels: Labels,
}

/// Hover label prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Labels {
    pub med: String,
    pub min: String,
    pub q1: String,
    pub q3: String,
    pub max: String,
    pub mean: String,
    pub lf: String,
    pub uf: String,
}

impl Labels {
    #[must_use]
    pub fn new(box_mean: BoxMean) -> Self {
        let mean = if box_mean.is_sd() {
            "mean ± σ:"
        } else {
            "mean:"
        };
        Self {
            med: "median:".to_owned(),
            min: "min:".to_owned(),
            q1: "q1:".to_owned(),
            q3: "q3:".to_owned(),
            max: "max:".to_owned(),
            mean: mean.to_owned(),
            lf: "lower fence:".to_owned(),
            uf: "upper fence:".to_owned(),
        }
    }
}

/// Value extent of a trace, for the value axis autorange.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
    /// Whether the axis should add padding around the extent.
    pub padded: bool,
}

impl ValueRange {
    /// The padded extent of the finite values, or `None` if there are none.
    ///
    /// # Examples
    ///
    /// ```
    /// use whisker_calc::record::ValueRange;
    ///
    /// let range = ValueRange::padded_from([3.0, f64::NAN, -1.0, 2.0]).unwrap();
    /// assert_eq!((range.min, range.max), (-1.0, 3.0));
    /// assert!(ValueRange::padded_from([f64::INFINITY]).is_none());
    /// ```
    #[must_use]
    pub fn padded_from<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
            .map(|(min, max)| Self {
                min,
                max,
                padded: true,
            })
    }
}

/// The computed boxes of one trace.
#[derive(Debug, Clone, PartialEq, Serialize, derive_more::IsVariant)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoxCalc {
    Boxes {
        records: Vec<BoxRecord>,
        range: Option<ValueRange>,
    },
    /// Nothing to draw.
    Empty,
}

impl BoxCalc {
    #[must_use]
    pub fn records(&self) -> &[BoxRecord] {
        match self {
            BoxCalc::Boxes { records, .. } => records,
            BoxCalc::Empty => &[],
        }
    }

    #[must_use]
    pub fn range(&self) -> Option<ValueRange> {
        match self {
            BoxCalc::Boxes { range, .. } => *range,
            BoxCalc::Empty => None,
        }
    }

    #[must_use]
    pub fn meta(&self) -> Option<&CalcMeta> {
        self.records().first().and_then(|r| r.meta.as_ref())
    }
}

/// Result of computing one trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalcOutput {
    pub calc: BoxCalc,
    pub diagnostics: Vec<Diagnostic>,
}

impl CalcOutput {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            calc: BoxCalc::Empty,
            diagnostics: vec![],
        }
    }

    /// Whether the trace took a group slot; only traces with boxes do.
    #[must_use]
    pub fn consumes_slot(&self) -> bool {
        self.calc.is_boxes()
    }
}
