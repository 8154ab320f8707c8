//! Position binning for grouped samples
//!
//! Samples arrive with a position coordinate (the category or numeric slot
//! their box is drawn at) in no particular order. Grouping works in two
//! steps:
//!
//! 1. [`DistinctValues`] sorts the positions and merges values that only
//!    differ by floating-point noise, recording the smallest gap between
//!    neighbours.
//! 2. [`PositionBins`] turns the distinct positions into half-open
//!    intervals of half that gap on each side, and [`PositionBins::bin_of`]
//!    finds the interval a coordinate falls into.
//!
//! # Examples
//!
//! ```
//! use whisker_stats::binning::PositionBins;
//!
//! let bins = PositionBins::new([1.0, 1.0, 2.0, 2.0, 5.0]);
//! assert_eq!(bins.distinct(), &[1.0, 2.0, 5.0]);
//! assert_eq!(bins.half_width(), 0.5);
//! assert_eq!(bins.bin_of(2.0), Some(1));
//! assert_eq!(bins.bin_of(0.0), None);
//! ```

/// Relative allowance applied to a searched value so that values sitting on
/// an edge up to rounding noise land on the intended side.
const ROUNDING_ERROR: f64 = 1e-9;

/// Which bin receives a value that lies exactly on an edge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EdgeTie {
    /// The value belongs to the bin that starts at the edge.
    #[default]
    Upper,
    /// The value belongs to the bin that ends at the edge.
    Lower,
}

/// Finds the bin containing `value` given ascending bin `edges`.
///
/// Bin `k` spans `edges[k]..edges[k + 1]`. The last edge opens an unbounded
/// bin `edges.len() - 1`, so callers that only want bounded bins must check
/// the index against their own bin count.
///
/// # Returns
///
/// `None` if `value` lies before the first edge (or `edges` is empty).
///
/// # Examples
///
/// ```
/// use whisker_stats::binning::{EdgeTie, find_bin};
///
/// let edges = [0.0, 1.0, 2.0];
/// assert_eq!(find_bin(0.5, &edges, EdgeTie::Upper), Some(0));
/// assert_eq!(find_bin(1.0, &edges, EdgeTie::Upper), Some(1));
/// assert_eq!(find_bin(1.0, &edges, EdgeTie::Lower), Some(0));
/// assert_eq!(find_bin(9.0, &edges, EdgeTie::Upper), Some(2));
/// assert_eq!(find_bin(-1.0, &edges, EdgeTie::Upper), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn find_bin(value: f64, edges: &[f64], tie: EdgeTie) -> Option<usize> {
    let bin_size = match edges {
        [first, .., last] => (last - first) / (edges.len() - 1) as f64,
        _ => 1.0,
    };
    let count = match tie {
        EdgeTie::Upper => {
            let value = value + bin_size * ROUNDING_ERROR;
            edges.partition_point(|&edge| edge <= value)
        }
        EdgeTie::Lower => {
            let value = value - bin_size * ROUNDING_ERROR;
            edges.partition_point(|&edge| edge < value)
        }
    };
    count.checked_sub(1)
}

/// Sorted, de-duplicated set of values with the smallest gap between them.
#[derive(Debug, Clone, PartialEq)]
pub struct DistinctValues {
    /// Distinct values in ascending order.
    pub values: Vec<f64>,
    /// Smallest difference between consecutive distinct values.
    ///
    /// With fewer than two distinct values this is the span of the input,
    /// or `1.0` if that span is zero.
    pub min_diff: f64,
}

impl DistinctValues {
    /// Collects the distinct finite values of `values`.
    ///
    /// Two sorted neighbours closer than `span / (n - 1) / 10000` are
    /// considered the same value; the first of them is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use whisker_stats::binning::DistinctValues;
    ///
    /// let dv = DistinctValues::new([3.0, 1.0, f64::NAN, 3.0, 1.5]);
    /// assert_eq!(dv.values, vec![1.0, 1.5, 3.0]);
    /// assert_eq!(dv.min_diff, 0.5);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values
            .into_iter()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);

        let (Some(&first), Some(&last)) = (sorted.first(), sorted.last()) else {
            return Self {
                values: vec![],
                min_diff: 1.0,
            };
        };

        let span = last - first;
        let mut min_diff = if span == 0.0 { 1.0 } else { span };
        let err_diff = min_diff / (sorted.len() - 1).max(1) as f64 / 10000.0;

        let mut values = Vec::<f64>::new();
        for v in sorted {
            match values.last() {
                None => values.push(v),
                Some(&prev) if v - prev > err_diff => {
                    min_diff = min_diff.min(v - prev);
                    values.push(v);
                }
                Some(_) => {}
            }
        }

        Self { values, min_diff }
    }
}

/// Half-open intervals centred on each distinct position.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionBins {
    distinct: Vec<f64>,
    half_width: f64,
    edges: Vec<f64>,
}

impl PositionBins {
    /// Builds bins for the given position coordinates.
    ///
    /// Non-finite coordinates are ignored.
    #[must_use]
    pub fn new<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let DistinctValues { values, min_diff } = DistinctValues::new(positions);
        let half_width = min_diff / 2.0;

        let mut edges = values.iter().map(|v| v - half_width).collect::<Vec<_>>();
        if let Some(last) = values.last() {
            edges.push(last + half_width);
        }

        Self {
            distinct: values,
            half_width,
            edges,
        }
    }

    /// Distinct positions in ascending order; bin `k` is centred on `distinct()[k]`.
    #[must_use]
    pub fn distinct(&self) -> &[f64] {
        &self.distinct
    }

    /// Half the minimum spacing between distinct positions.
    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    /// Number of bins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.distinct.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distinct.is_empty()
    }

    /// Index of the bin containing `coord`, or `None` if it falls outside
    /// every bin.
    #[must_use]
    pub fn bin_of(&self, coord: f64) -> Option<usize> {
        if !coord.is_finite() {
            return None;
        }
        find_bin(coord, &self.edges, EdgeTie::Upper).filter(|&k| k < self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_empty() {
        let dv = DistinctValues::new([]);
        assert!(dv.values.is_empty());
        assert_eq!(dv.min_diff, 1.0);
    }

    #[test]
    fn test_distinct_single_value_defaults_gap_to_one() {
        let dv = DistinctValues::new([4.0, 4.0, 4.0]);
        assert_eq!(dv.values, vec![4.0]);
        assert_eq!(dv.min_diff, 1.0);
    }

    #[test]
    fn test_distinct_merges_rounding_noise() {
        let dv = DistinctValues::new([0.1 + 0.2, 0.3, 1.0]);
        assert_eq!(dv.values.len(), 2);
        assert_eq!(dv.values[1], 1.0);
    }

    #[test]
    fn test_distinct_ignores_non_finite() {
        let dv = DistinctValues::new([f64::INFINITY, 2.0, f64::NAN, 6.0]);
        assert_eq!(dv.values, vec![2.0, 6.0]);
        assert_eq!(dv.min_diff, 4.0);
    }

    #[test]
    fn test_position_bins_edges() {
        let bins = PositionBins::new([5.0, 1.0, 2.0]);
        assert_eq!(bins.edges, [0.5, 1.5, 4.5, 5.5]);
        assert_eq!(bins.len(), 3);
    }

    #[test]
    fn test_position_bins_counts() {
        let positions = [1.0, 1.0, 2.0, 2.0, 5.0];
        let bins = PositionBins::new(positions);
        let mut counts = vec![0; bins.len()];
        for p in positions {
            counts[bins.bin_of(p).unwrap()] += 1;
        }
        assert_eq!(counts, vec![2, 2, 1]);
        assert_eq!(bins.half_width(), 0.5);
    }

    #[test]
    fn test_position_bins_reject_outside_and_nan() {
        let bins = PositionBins::new([0.0, 10.0]);
        assert_eq!(bins.half_width(), 5.0);
        assert_eq!(bins.bin_of(-5.1), None);
        assert_eq!(bins.bin_of(15.0), None);
        assert_eq!(bins.bin_of(14.9), Some(1));
        assert_eq!(bins.bin_of(f64::NAN), None);
    }

    #[test]
    fn test_position_bins_empty() {
        let bins = PositionBins::new([f64::NAN]);
        assert!(bins.is_empty());
        assert_eq!(bins.bin_of(0.0), None);
    }

    #[test]
    fn test_find_bin_on_sample_values() {
        let values = [1.0, 2.0, 2.0, 3.0];
        // last value <= threshold
        assert_eq!(find_bin(2.0, &values, EdgeTie::Upper), Some(2));
        // last value < threshold
        assert_eq!(find_bin(2.0, &values, EdgeTie::Lower), Some(0));
        assert_eq!(find_bin(0.5, &values, EdgeTie::Lower), None);
    }

    #[test]
    fn test_find_bin_single_edge() {
        assert_eq!(find_bin(3.0, &[3.0], EdgeTie::Upper), Some(0));
        assert_eq!(find_bin(3.0, &[3.0], EdgeTie::Lower), None);
        assert_eq!(find_bin(3.0, &[], EdgeTie::Upper), None);
    }
}
