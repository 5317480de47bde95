//! Multiple-comparison correction of p-values.

/// Default false-discovery-rate level for [`fdr_correction`].
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Result of a Benjamini–Hochberg correction.
///
/// Both vectors are positionally aligned with the input p-values.
#[derive(Debug, Clone, PartialEq)]
pub struct FdrCorrection {
    /// Whether each hypothesis is rejected at the requested level.
    pub rejected: Vec<bool>,
    /// Adjusted p-values (`q`-values), capped at 1.
    pub corrected: Vec<f64>,
}

/// Applies the Benjamini–Hochberg false-discovery-rate correction.
///
/// For the ascending ranks `i = 1..=m` the adjusted value is
/// `p_(i) * m / i`, made monotone with a running minimum taken from the
/// largest rank downward. `NaN` p-values do not take part in the ranking
/// (`m` counts only the others) and stay `NaN` and unrejected.
///
/// # Examples
///
/// ```
/// # use thalvol_stats::multitest::fdr_correction;
/// let fdr = fdr_correction(&[0.125, 0.5, 0.25], 0.4);
/// assert_eq!(fdr.corrected, vec![0.375, 0.5, 0.375]);
/// assert_eq!(fdr.rejected, vec![true, false, true]);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn fdr_correction(p_values: &[f64], alpha: f64) -> FdrCorrection {
    let mut order = (0..p_values.len())
        .filter(|&i| !p_values[i].is_nan())
        .collect::<Vec<_>>();
    order.sort_by(|&a, &b| p_values[a].total_cmp(&p_values[b]));

    let m = order.len() as f64;
    let mut corrected = vec![f64::NAN; p_values.len()];
    let mut running_min = f64::INFINITY;
    for (rank0, &index) in order.iter().enumerate().rev() {
        let rank = (rank0 + 1) as f64;
        let p = p_values[index];
        // `p * m / m` may round below `p`
        let adjusted = (p * m / rank).max(p).min(1.0);
        running_min = running_min.min(adjusted);
        corrected[index] = running_min;
    }

    let rejected = corrected.iter().map(|&q| q <= alpha).collect();
    FdrCorrection {
        rejected,
        corrected,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_empty_input() {
        let fdr = fdr_correction(&[], DEFAULT_ALPHA);
        assert!(fdr.corrected.is_empty());
        assert!(fdr.rejected.is_empty());
    }

    #[test]
    fn test_single_p_value_is_unchanged() {
        let fdr = fdr_correction(&[0.0321], DEFAULT_ALPHA);
        assert_eq!(fdr.corrected, vec![0.0321]);
        assert_eq!(fdr.rejected, vec![true]);
    }

    #[test]
    fn test_reference_values() {
        // Reference values computed by hand: p * m / rank with step-up minimum
        let p = [0.005, 0.2, 0.01, 0.04, 0.03];
        let fdr = fdr_correction(&p, 0.03);
        let expected = [0.025, 0.2, 0.025, 0.05, 0.05];
        for (got, want) in fdr.corrected.iter().zip(expected) {
            assert_relative_eq!(*got, want, epsilon = 1e-12);
        }
        assert_eq!(fdr.rejected, vec![true, false, true, false, false]);
    }

    #[test]
    fn test_identical_p_values_preserve_order() {
        let p = [0.02; 4];
        let fdr = fdr_correction(&p, DEFAULT_ALPHA);
        assert_eq!(fdr.corrected.len(), p.len());
        for (q, p) in fdr.corrected.iter().zip(p) {
            assert!(*q >= p);
            assert_relative_eq!(*q, 0.02, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_corrected_never_below_uncorrected() {
        let p = [0.9, 0.001, 0.3, 0.049, 0.5, 0.012];
        let fdr = fdr_correction(&p, DEFAULT_ALPHA);
        for (q, p) in fdr.corrected.iter().zip(p) {
            assert!(*q >= p, "{q} < {p}");
            assert!(*q <= 1.0);
        }
    }

    #[test]
    fn test_capped_at_one() {
        let fdr = fdr_correction(&[0.8, 0.9, 0.95], DEFAULT_ALPHA);
        assert!(fdr.corrected.iter().all(|&q| q <= 1.0));
        assert_relative_eq!(fdr.corrected[2], 0.95);
    }

    #[test]
    fn test_nan_is_excluded_from_ranking() {
        let fdr = fdr_correction(&[0.01, f64::NAN, 0.04], DEFAULT_ALPHA);
        assert_relative_eq!(fdr.corrected[0], 0.02);
        assert!(fdr.corrected[1].is_nan());
        assert_relative_eq!(fdr.corrected[2], 0.04);
        assert_eq!(fdr.rejected, vec![true, false, true]);
    }
}
