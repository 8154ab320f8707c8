/// Descriptive statistics summarizing one group of samples.
///
/// Variance and standard deviation are the population forms (divided by
/// `count`, not `count - 1`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptiveStats {
    /// Number of values in the group.
    pub count: usize,
    /// The smallest value.
    pub min: f64,
    /// The largest value.
    pub max: f64,
    /// The arithmetic mean.
    pub mean: f64,
    /// The population variance.
    pub variance: f64,
    /// The population standard deviation.
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// Returns `None` if the dataset is empty.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use whisker_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::from_sorted(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
    /// assert_eq!(stats.mean, 5.0);
    /// assert_eq!(stats.std_dev, 2.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let n = count as f64;
        let mean = sorted_values.iter().sum::<f64>() / n;
        let variance = sorted_values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / n;

        Some(Self {
            count,
            min,
            max,
            mean,
            variance,
            std_dev: variance.sqrt(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(DescriptiveStats::from_sorted(&[]).is_none());
    }

    #[test]
    fn test_single_value_has_zero_spread() {
        let stats = DescriptiveStats::from_sorted(&[42.5]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.min, 42.5);
        assert_eq!(stats.max, 42.5);
        assert_eq!(stats.mean, 42.5);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_population_standard_deviation() {
        // sample sd would be sqrt(2.5); population sd is sqrt(2)
        let stats = DescriptiveStats::from_sorted(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!((stats.std_dev - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "values must be sorted")]
    fn test_unsorted_input_panics() {
        let _ = DescriptiveStats::from_sorted(&[3.0, 1.0]);
    }
}
