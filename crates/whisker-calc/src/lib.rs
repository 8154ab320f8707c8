//! Box-plot statistics for chart traces
//!
//! This crate turns the data of a box trace into the per-box records a
//! renderer draws: quartiles, whisker fences, outlier points, notches, and
//! the value range used to autorange the value axis.
//!
//! # Overview
//!
//! A trace carries either raw samples or precomputed statistics:
//!
//! ## Raw samples
//!
//! 1. **Position binning** ([`whisker_stats::binning::PositionBins`]): distinct
//!    positions are found and every sample is assigned to the nearest one
//! 2. **Aggregation**: each non-empty group gets its five-number summary,
//!    mean and standard deviation, fences, outlier thresholds and notches
//! 3. **Point filtering**: samples beyond the fences (or all samples, per
//!    [`trace::PointsMode`]) are marked for drawing
//! 4. **Selection** ([`selection::tag_selected`]): samples listed in
//!    `selectedpoints` are flagged
//!
//! ## Precomputed statistics
//!
//! One box per row, read from the `q1`, `median` and `q3` arrays plus the
//! optional fences, mean, sd, notch spans and outliers. Rows whose
//! quartiles are missing or out of order are drawn as a flat line and
//! reported as a [`diagnostic::Diagnostic`].
//!
//! # Axes
//!
//! Raw data is converted to coordinates by an [`axis::Axis`]. The crate
//! ships [`axis::LinearAxis`] and [`axis::CategoryAxis`]; a
//! [`figure::Figure`] builds them from its axis settings.
//!
//! # Examples
//!
//! ```
//! use whisker_calc::{axis::LinearAxis, calc::calc_box, trace::BoxTrace};
//!
//! let trace: BoxTrace = serde_json::from_value(serde_json::json!({
//!     "x": [1, 1, 1, 2, 2, 2],
//!     "y": [1.0, 2.0, 3.0, 10.0, 20.0, 30.0],
//! })).unwrap();
//!
//! let output = calc_box(&trace, &LinearAxis, &LinearAxis, 0);
//! let records = output.calc.records();
//! assert_eq!(records.len(), 2);
//! assert_eq!((records[0].pos, records[0].med), (1.0, 2.0));
//! assert_eq!((records[1].pos, records[1].med), (2.0, 20.0));
//!
//! let meta = output.calc.meta().unwrap();
//! assert_eq!(meta.d_pos, 0.5);
//! ```

pub mod axis;
pub mod calc;
pub mod diagnostic;
pub mod figure;
mod precomputed;
mod raw;
pub mod record;
pub mod selection;
pub mod trace;
