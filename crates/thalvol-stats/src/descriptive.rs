/// Descriptive statistics summarizing a sample.
///
/// Missing observations (`NaN`) are skipped, so `count` is the number of
/// observed values. Dispersion uses the sample (n − 1) denominator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSummary {
    /// The number of observed (non-`NaN`) values.
    pub count: usize,
    /// The minimum observed value.
    pub min: f64,
    /// The maximum observed value.
    pub max: f64,
    /// The arithmetic mean of the observed values.
    pub mean: f64,
    /// The sample variance (denominator `count - 1`).
    ///
    /// `NaN` when fewer than two values were observed.
    pub variance: f64,
    /// The sample standard deviation, `variance.sqrt()`.
    pub std_dev: f64,
}

impl SampleSummary {
    /// Computes descriptive statistics from a sample, skipping `NaN` values.
    ///
    /// # Returns
    ///
    /// * `Some(SampleSummary)` - if at least one value was observed
    /// * `None` - if the sample is empty or contains only `NaN`
    ///
    /// # Examples
    ///
    /// ```
    /// # use thalvol_stats::descriptive::SampleSummary;
    /// let stats = SampleSummary::new([2.0, 4.0, f64::NAN, 6.0]).unwrap();
    /// assert_eq!(stats.count, 3);
    /// assert_eq!(stats.mean, 4.0);
    /// assert_eq!(stats.variance, 4.0);
    /// assert_eq!(stats.std_dev, 2.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values
            .into_iter()
            .filter(|v| !v.is_nan())
            .collect::<Vec<_>>();
        let count = values.len();
        if count == 0 {
            return None;
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let n = count as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = if count < 2 {
            f64::NAN
        } else {
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)
        };

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
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_empty_sample() {
        assert!(SampleSummary::new([]).is_none());
        assert!(SampleSummary::new([f64::NAN, f64::NAN]).is_none());
    }

    #[test]
    fn test_single_value_has_undefined_variance() {
        let stats = SampleSummary::new([3.5]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 3.5);
        assert_eq!(stats.min, 3.5);
        assert_eq!(stats.max, 3.5);
        assert!(stats.variance.is_nan());
        assert!(stats.std_dev.is_nan());
    }

    #[test]
    fn test_sample_denominator() {
        let stats = SampleSummary::new([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(stats.mean, 3.0);
        // Sum of squared deviations is 10, divided by n - 1 = 4
        assert_relative_eq!(stats.variance, 2.5);
        assert_relative_eq!(stats.std_dev, 2.5_f64.sqrt());
    }

    #[test]
    fn test_nan_values_are_skipped() {
        let stats = SampleSummary::new([f64::NAN, 10.0, 20.0, f64::NAN]).unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 20.0);
        assert_eq!(stats.mean, 15.0);
        assert_relative_eq!(stats.variance, 50.0);
    }
}
