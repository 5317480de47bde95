//! Standardized effect sizes for two-group comparisons.

use crate::descriptive::SampleSummary;

/// Cohen's d between two samples together with the summaries it was computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CohensD {
    /// Standardized mean difference, `(first.mean - second.mean) / pooled_std`.
    pub d: f64,
    /// Pooled sample standard deviation of the two groups.
    pub pooled_std: f64,
    /// Summary of the first sample.
    pub first: SampleSummary,
    /// Summary of the second sample.
    pub second: SampleSummary,
}

/// Computes Cohen's d with a pooled standard deviation.
///
/// ```text
/// pooled_std = sqrt(((n1 - 1) * s1^2 + (n2 - 1) * s2^2) / (n1 + n2 - 2))
/// d = (mean1 - mean2) / pooled_std
/// ```
///
/// `NaN` observations are skipped before counting. When both samples have
/// zero variance the pooled standard deviation is zero and `d` follows IEEE
/// division (infinite, or `NaN` for equal means).
///
/// # Returns
///
/// `None` if either sample has fewer than two observed values.
///
/// # Examples
///
/// ```
/// # use thalvol_stats::effect_size::cohens_d;
/// let first = [1.0, 2.0, 3.0];
/// let second = [3.0, 4.0, 5.0];
/// let effect = cohens_d(&first, &second).unwrap();
/// assert_eq!(effect.d, -2.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn cohens_d(first: &[f64], second: &[f64]) -> Option<CohensD> {
    let first = SampleSummary::new(first.iter().copied())?;
    let second = SampleSummary::new(second.iter().copied())?;
    if first.count < 2 || second.count < 2 {
        return None;
    }

    let n1 = first.count as f64;
    let n2 = second.count as f64;
    let pooled_std =
        (((n1 - 1.0) * first.variance + (n2 - 1.0) * second.variance) / (n1 + n2 - 2.0)).sqrt();
    let d = (first.mean - second.mean) / pooled_std;

    Some(CohensD {
        d,
        pooled_std,
        first,
        second,
    })
}
