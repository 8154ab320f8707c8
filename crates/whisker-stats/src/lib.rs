//! Numeric building blocks for box-plot statistics.
//!
//! This crate provides the pure, allocation-light pieces used to turn a group
//! of samples into the numbers a box plot draws:
//!
//! - **Descriptive statistics**: min, max, mean, population variance and standard deviation
//! - **Percentiles**: interpolated quantiles and the quartile conventions
//! - **Binning**: distinct positions and the bin search used to group samples
//! - **Box summary**: quartiles, whisker fences, outlier thresholds and notches
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing a group
//! - [`percentiles`]: Interpolated quantiles and [`percentiles::QuartileMethod`]
//! - [`binning`]: Distinct values, bin edges and bin search
//! - [`summary`]: The full per-box statistics record
//!
//! # Examples
//!
//! ## Computing a box summary
//!
//! ```
//! use whisker_stats::{percentiles::QuartileMethod, summary::BoxSummary};
//!
//! let summary = BoxSummary::from_sorted(&[1.0, 2.0, 3.0, 4.0, 5.0], QuartileMethod::Linear).unwrap();
//! assert_eq!(summary.med, 3.0);
//! assert_eq!((summary.q1, summary.q3), (1.75, 4.25));
//! ```
//!
//! ## Grouping positions
//!
//! ```
//! use whisker_stats::binning::PositionBins;
//!
//! let bins = PositionBins::new([0.0, 0.0, 1.0, 3.0]);
//! assert_eq!(bins.distinct(), &[0.0, 1.0, 3.0]);
//! assert_eq!(bins.bin_of(1.2), Some(1));
//! ```

pub mod binning;
pub mod descriptive;
pub mod percentiles;
pub mod summary;
