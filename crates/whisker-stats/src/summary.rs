use crate::{
    binning::{EdgeTie, find_bin},
    descriptive::DescriptiveStats,
    percentiles::{QuartileMethod, Quartiles},
};

/// Multiplier of the interquartile range used for the notch half-width.
///
/// `1.57 * IQR / sqrt(N)` approximates a 95% confidence interval for the
/// median.
pub const NOTCH_FACTOR: f64 = 1.57;

/// Statistics drawn by one box of a box plot.
///
/// Combines:
/// - the five-number summary (`min`, `q1`, `med`, `q3`, `max`)
/// - the whisker fences `lf`/`uf`: the most extreme samples still within
///   1.5 IQR of the quartiles
/// - the suspected-outlier thresholds `lo`/`uo` at 3 IQR from the quartiles
/// - the notch bounds `ln`/`un` around the median
/// - mean and population standard deviation
///
/// # Examples
///
/// ```
/// use whisker_stats::{percentiles::QuartileMethod, summary::BoxSummary};
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0];
/// let summary = BoxSummary::from_sorted(&values, QuartileMethod::Linear).unwrap();
///
/// assert_eq!(summary.med, 5.5);
/// assert_eq!(summary.q1, 3.0);
/// assert_eq!(summary.q3, 8.0);
/// // 100 is beyond q3 + 1.5 * IQR, so the upper whisker stops at 9
/// assert_eq!(summary.uf, 9.0);
/// assert_eq!(summary.lf, 1.0);
/// assert!(summary.is_outside_fences(100.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSummary {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub med: f64,
    pub q3: f64,
    pub max: f64,
    /// Lower fence.
    pub lf: f64,
    /// Upper fence.
    pub uf: f64,
    /// Lower suspected-outlier threshold.
    pub lo: f64,
    /// Upper suspected-outlier threshold.
    pub uo: f64,
    /// Lower notch bound.
    pub ln: f64,
    /// Upper notch bound.
    pub un: f64,
    pub mean: f64,
    pub sd: f64,
}

impl BoxSummary {
    /// Computes the box statistics from pre-sorted values.
    ///
    /// # Returns
    ///
    /// * `Some(BoxSummary)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], method: QuartileMethod) -> Option<Self> {
        let stats = DescriptiveStats::from_sorted(sorted_values)?;
        let quartiles = Quartiles::from_sorted(sorted_values, method)?;
        let Quartiles { q1, med, q3 } = quartiles;
        let n = sorted_values.len();

        // first sample at or above q1 - 1.5 IQR, never above q1
        let lower_idx = find_bin(2.5 * q1 - 1.5 * q3, sorted_values, EdgeTie::Lower)
            .map_or(0, |k| k + 1)
            .min(n - 1);
        let lf = q1.min(sorted_values[lower_idx]);

        // last sample at or below q3 + 1.5 IQR, never below q3
        let upper_idx = find_bin(2.5 * q3 - 1.5 * q1, sorted_values, EdgeTie::Upper).unwrap_or(0);
        let uf = q3.max(sorted_values[upper_idx]);

        let mci = NOTCH_FACTOR * quartiles.iqr() / (n as f64).sqrt();

        Some(Self {
            count: n,
            min: stats.min,
            q1,
            med,
            q3,
            max: stats.max,
            lf,
            uf,
            lo: 4.0 * q1 - 3.0 * q3,
            uo: 4.0 * q3 - 3.0 * q1,
            ln: med - mci,
            un: med + mci,
            mean: stats.mean,
            sd: stats.std_dev,
        })
    }

    /// Whether `value` lies beyond the whisker fences.
    #[must_use]
    pub fn is_outside_fences(&self, value: f64) -> bool {
        value < self.lf || value > self.uf
    }
}
