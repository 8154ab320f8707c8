/// Convention used to compute the lower and upper quartiles.
///
/// The median is always computed with [`interp`]; only `q1` and `q3`
/// depend on the method.
///
/// # Examples
///
/// ```
/// use whisker_stats::percentiles::QuartileMethod;
///
/// let method: QuartileMethod = serde_json::from_str("\"exclusive\"").unwrap();
/// assert_eq!(method, QuartileMethod::Exclusive);
/// assert_eq!(QuartileMethod::default(), QuartileMethod::Linear);
/// ```
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum QuartileMethod {
    /// Interpolate at ranks 0.25 and 0.75 over the whole sample.
    #[default]
    Linear,
    /// For odd sample sizes, take the median of each half, excluding the
    /// middle element from both halves.
    Exclusive,
    /// For odd sample sizes, take the median of each half, including the
    /// middle element in both halves.
    Inclusive,
}

/// Lower quartile, median and upper quartile of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub q1: f64,
    pub med: f64,
    pub q3: f64,
}

impl Quartiles {
    /// Computes quartiles from pre-sorted values.
    ///
    /// `Exclusive` and `Inclusive` only differ from `Linear` when the sample
    /// size is odd; with an even size (or a single value, where the halves
    /// would be empty) they fall back to `Linear`.
    ///
    /// # Returns
    ///
    /// `None` if `sorted_values` is empty.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use whisker_stats::percentiles::{QuartileMethod, Quartiles};
    ///
    /// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
    ///
    /// let linear = Quartiles::from_sorted(&values, QuartileMethod::Linear).unwrap();
    /// assert_eq!((linear.q1, linear.med, linear.q3), (1.75, 3.0, 4.25));
    ///
    /// let exclusive = Quartiles::from_sorted(&values, QuartileMethod::Exclusive).unwrap();
    /// assert_eq!((exclusive.q1, exclusive.q3), (1.5, 4.5));
    ///
    /// let inclusive = Quartiles::from_sorted(&values, QuartileMethod::Inclusive).unwrap();
    /// assert_eq!((inclusive.q1, inclusive.q3), (2.0, 4.0));
    /// ```
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], method: QuartileMethod) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        if sorted_values.is_empty() {
            return None;
        }

        let n = sorted_values.len();
        let half = n / 2;
        let med = interp(sorted_values, 0.5);
        let (q1, q3) = match method {
            QuartileMethod::Exclusive if n % 2 == 1 && n > 1 => (
                interp(&sorted_values[..half], 0.5),
                interp(&sorted_values[half + 1..], 0.5),
            ),
            QuartileMethod::Inclusive if n % 2 == 1 => (
                interp(&sorted_values[..=half], 0.5),
                interp(&sorted_values[half..], 0.5),
            ),
            _ => (interp(sorted_values, 0.25), interp(sorted_values, 0.75)),
        };

        Some(Self { q1, med, q3 })
    }

    /// The interquartile range, `q3 - q1`.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Linearly interpolated quantile of sorted data.
///
/// The fractional rank is `fraction * len - 0.5`, so every sorted value sits
/// at the centre of an equal share of the unit interval. Ranks before the
/// first value clamp to the first value and ranks past the last value clamp
/// to the last; in between, the two bracketing values are blended by the
/// fractional part of the rank.
///
/// Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use whisker_stats::percentiles::interp;
///
/// let values = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(interp(&values, 0.5), 2.5);
/// assert_eq!(interp(&values, 0.25), 1.5);
/// assert_eq!(interp(&values, 0.0), 1.0);
/// assert_eq!(interp(&values, 1.0), 4.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn interp(sorted_values: &[f64], fraction: f64) -> f64 {
    let (Some(&first), Some(&last)) = (sorted_values.first(), sorted_values.last()) else {
        return f64::NAN;
    };
    let rank = fraction * sorted_values.len() as f64 - 0.5;
    if rank < 0.0 {
        return first;
    }
    if rank > (sorted_values.len() - 1) as f64 {
        return last;
    }
    let frac = rank.fract();
    let lo = sorted_values[rank.floor() as usize];
    let hi = sorted_values[rank.ceil() as usize];
    frac * hi + (1.0 - frac) * lo
}
