//! Cohen's d between the two clinical groups

use thalvol_stats::effect_size::CohensD;

use crate::{AnalysisError, dataset::Dataset, group::GroupSpec};

/// Computes Cohen's d of `variable` between the first and second group.
///
/// Missing values are skipped per group. Each group needs at least two
/// observed values. A zero pooled standard deviation is not an error: `d`
/// is then infinite, or `NaN` when the group means are equal.
///
/// # Examples
///
/// ```
/// use thalvol_analysis::{dataset::Dataset, effect::calculate_cohens_d, group::GroupSpec};
///
/// let dataset = Dataset::from_columns([
///     ("blsgroup", vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0]),
///     ("Medial", vec![1.0, 2.0, 3.0, 3.0, 4.0, 5.0]),
/// ])?;
/// let effect = calculate_cohens_d(&dataset, &GroupSpec::default(), "Medial")?;
/// assert_eq!(effect.d, -2.0);
/// assert_eq!(effect.first.mean, 2.0);
/// assert_eq!(effect.second.count, 3);
/// # Ok::<(), thalvol_analysis::AnalysisError>(())
/// ```
pub fn calculate_cohens_d(
    dataset: &Dataset,
    group: &GroupSpec,
    variable: &str,
) -> Result<CohensD, AnalysisError> {
    let (first, second) = group.split(dataset, variable)?;
    if let Some(effect) = thalvol_stats::effect_size::cohens_d(&first, &second) {
        return Ok(effect);
    }

    let observed = |values: &[f64]| values.iter().filter(|v| !v.is_nan()).count();
    let (label, count) = if observed(&first) < 2 {
        (group.first, observed(&first))
    } else {
        (group.second, observed(&second))
    };
    Err(AnalysisError::TooFewObservations {
        column: group.column.clone(),
        label,
        variable: variable.to_string(),
        count,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::SeedableRng as _;
    use rand_distr::{Distribution as _, Normal};
    use rand_pcg::Pcg64;

    use super::*;

    fn synthetic_dataset(seed: u64) -> Dataset {
        let mut rng = Pcg64::seed_from_u64(seed);
        let preterm = Normal::new(10.0, 2.0).unwrap();
        let fullterm = Normal::new(12.0, 2.0).unwrap();
        let mut group = vec![];
        let mut volume = vec![];
        for _ in 0..30 {
            group.push(1.0);
            volume.push(preterm.sample(&mut rng));
            group.push(2.0);
            volume.push(fullterm.sample(&mut rng));
        }
        Dataset::from_columns([("blsgroup", group), ("Medial", volume)]).unwrap()
    }

    #[test]
    fn test_antisymmetric_under_label_swap() {
        let dataset = synthetic_dataset(1);
        let group = GroupSpec::default();
        let forward = calculate_cohens_d(&dataset, &group, "Medial").unwrap();
        let backward = calculate_cohens_d(&dataset, &group.swapped(), "Medial").unwrap();
        assert_relative_eq!(forward.d, -backward.d);
        assert_eq!(forward.first, backward.second);
        assert!(forward.d < 0.0);
    }

    #[test]
    fn test_skips_missing_values() {
        let dataset = Dataset::from_columns([
            ("blsgroup", vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0]),
            ("Medial", vec![1.0, f64::NAN, 3.0, 3.0, 5.0, f64::NAN]),
        ])
        .unwrap();
        let effect = calculate_cohens_d(&dataset, &GroupSpec::default(), "Medial").unwrap();
        assert_eq!(effect.first.count, 2);
        assert_eq!(effect.second.count, 2);
        // Both groups have variance 2
        assert_relative_eq!(effect.d, (2.0 - 4.0) / 2.0_f64.sqrt());
    }

    #[test]
    fn test_too_few_observations_names_group() {
        let dataset = Dataset::from_columns([
            ("blsgroup", vec![1.0, 1.0, 2.0, 2.0]),
            ("Medial", vec![1.0, 2.0, 3.0, f64::NAN]),
        ])
        .unwrap();
        let err = calculate_cohens_d(&dataset, &GroupSpec::default(), "Medial").unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::TooFewObservations { label, count: 1, .. } if label == 2.0
        ));
    }

    #[test]
    fn test_missing_variable() {
        let dataset = synthetic_dataset(2);
        assert!(matches!(
            calculate_cohens_d(&dataset, &GroupSpec::default(), "Lateral"),
            Err(AnalysisError::MissingColumn { name }) if name == "Lateral"
        ));
    }

    #[test]
    fn test_zero_variance_is_not_an_error() {
        let dataset = Dataset::from_columns([
            ("blsgroup", vec![1.0, 1.0, 2.0, 2.0]),
            ("Medial", vec![5.0, 5.0, 7.0, 7.0]),
        ])
        .unwrap();
        let effect = calculate_cohens_d(&dataset, &GroupSpec::default(), "Medial").unwrap();
        assert!(effect.d.is_infinite());
    }
}
