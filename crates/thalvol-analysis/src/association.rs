//! Covariate-adjusted association between a predictor and an outcome

use serde::Serialize;
use thalvol_stats::linear_model::{OlsFit, Regressor};

use crate::{AnalysisError, dataset::Dataset};

/// Covariates adjusted for by [`association_with_volume`].
pub const DEFAULT_COVARIATES: [&str; 3] = ["sex", "Age_at_scan", "TIV_corrected"];

/// Association of one predictor with one outcome, serialized with the
/// published column names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationRow {
    /// The predictor.
    pub variable: String,
    /// The outcome.
    pub nucleus: String,
    #[serde(rename = "Tstatistic")]
    pub t_statistic: f64,
    pub coef: f64,
    #[serde(rename = "R2")]
    pub r_squared: f64,
    pub pvalue: f64,
}

/// Fits `nucleus ~ variable + sex + Age_at_scan + TIV_corrected`.
///
/// See [`association_with_covariates`].
pub fn association_with_volume(
    dataset: &Dataset,
    nucleus: &str,
    variable: &str,
) -> Result<AssociationRow, AnalysisError> {
    association_with_covariates(dataset, nucleus, variable, &DEFAULT_COVARIATES)
}

/// Fits `nucleus ~ variable + covariates` by ordinary least squares on the
/// complete cases of those columns and reports the predictor's term.
///
/// A predictor that is also listed as a covariate enters the model once.
///
/// # Examples
///
/// ```
/// use thalvol_analysis::{association::association_with_covariates, dataset::Dataset};
///
/// let dataset = Dataset::from_columns([
///     ("Medial", vec![3.1, 4.9, 7.2, 8.8, 11.1, 13.0]),
///     ("Bayley", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
///     ("sex", vec![0.0, 1.0, 1.0, 0.0, 1.0, 0.0]),
/// ])?;
/// let row = association_with_covariates(&dataset, "Medial", "Bayley", &["sex"])?;
/// assert_eq!(row.variable, "Bayley");
/// assert_eq!(row.nucleus, "Medial");
/// assert!((row.coef - 2.0).abs() < 0.1);
/// assert!(row.r_squared > 0.99);
/// # Ok::<(), thalvol_analysis::AnalysisError>(())
/// ```
pub fn association_with_covariates<S>(
    dataset: &Dataset,
    nucleus: &str,
    variable: &str,
    covariates: &[S],
) -> Result<AssociationRow, AnalysisError>
where
    S: AsRef<str>,
{
    let mut predictors = vec![variable];
    for covariate in covariates {
        let covariate = covariate.as_ref();
        if !predictors.contains(&covariate) {
            predictors.push(covariate);
        }
    }
    if predictors.contains(&nucleus) {
        return Err(AnalysisError::InvalidCovariate {
            name: nucleus.to_string(),
        });
    }

    let mut columns = vec![nucleus];
    columns.extend(&predictors);
    let complete = dataset.complete_cases(&columns)?;

    let regressors = predictors
        .iter()
        .map(|&name| Ok(Regressor::new(name, complete.column(name)?)))
        .collect::<Result<Vec<_>, AnalysisError>>()?;
    let fit = OlsFit::fit(complete.column(nucleus)?, &regressors).map_err(|source| {
        AnalysisError::Model {
            variable: nucleus.to_string(),
            source,
        }
    })?;

    let coefficient = fit
        .coefficient(variable)
        .ok_or_else(|| AnalysisError::MissingTerm {
            term: variable.to_string(),
        })?;
    Ok(AssociationRow {
        variable: variable.to_string(),
        nucleus: nucleus.to_string(),
        t_statistic: coefficient.t_value,
        coef: coefficient.estimate,
        r_squared: fit.r_squared,
        pvalue: coefficient.p_value,
    })
}
