//! ANCOVA comparisons of the clinical groups across many outcome variables
//!
//! Each outcome is tested with the group indicator as a treatment-coded
//! between-subject factor and the covariates as continuous adjustors. The
//! group effect is read from the ANCOVA table by the group column's name,
//! Cohen's d is attached, and the group p-values of all outcomes are
//! corrected together with the Benjamini–Hochberg procedure.
//!
//! # Example
//!
//! ```
//! use thalvol_analysis::{ancova, dataset::Dataset, group::GroupSpec};
//!
//! let dataset = Dataset::from_columns([
//!     ("blsgroup", vec![1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0]),
//!     ("sex", vec![0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0]),
//!     ("Medial", vec![10.2, 9.8, 10.5, 10.1, 11.9, 12.4, 12.0, 12.2]),
//!     ("Lateral", vec![5.1, 5.3, 4.9, 5.2, 5.0, 5.2, 5.1, 4.8]),
//! ])?;
//!
//! let summary = ancova::ancova_summary(
//!     &dataset,
//!     &GroupSpec::default(),
//!     &["Medial", "Lateral"],
//!     &["sex"],
//! )?;
//!
//! assert_eq!(summary.rows[0].roi, "Medial");
//! assert_eq!(summary.rows[1].roi, "Lateral");
//! for row in &summary.rows {
//!     assert!(row.p_fdr >= row.p_value);
//! }
//! # Ok::<(), thalvol_analysis::AnalysisError>(())
//! ```

use serde::Serialize;
use thalvol_stats::{
    anova::{self, Factor, Term},
    multitest,
};

use crate::{AnalysisError, dataset::Dataset, effect, group::GroupSpec};

/// One row of a full ANCOVA table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AncovaTableRow {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "SS")]
    pub ss: f64,
    #[serde(rename = "DF")]
    pub df: usize,
    #[serde(rename = "F")]
    pub f: Option<f64>,
    #[serde(rename = "p-unc")]
    pub p_unc: Option<f64>,
    /// Partial eta-squared.
    pub np2: Option<f64>,
}

/// Full ANCOVA table of one outcome variable.
///
/// Rows are the group factor, each covariate in the order given, then
/// `Residual`.
#[derive(Debug, Clone, Serialize)]
pub struct AncovaTable {
    pub dv: String,
    pub between: String,
    /// Number of complete cases the model was fitted on.
    pub n_obs: usize,
    pub rows: Vec<AncovaTableRow>,
}

impl AncovaTable {
    #[must_use]
    pub fn row(&self, source: &str) -> Option<&AncovaTableRow> {
        self.rows.iter().find(|row| row.source == source)
    }

    /// The row of the between-subject group factor.
    pub fn between_row(&self) -> Result<&AncovaTableRow, AnalysisError> {
        self.row(&self.between)
            .ok_or_else(|| AnalysisError::MissingTerm {
                term: self.between.clone(),
            })
    }
}

/// Summary of one outcome variable, serialized with the published column names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AncovaSummaryRow {
    pub roi: String,
    #[serde(rename = "F-value")]
    pub f_value: f64,
    #[serde(rename = "p-value")]
    pub p_value: f64,
    #[serde(rename = "p-fdr")]
    pub p_fdr: f64,
    #[serde(rename = "Cohens d")]
    pub cohens_d: f64,
}

/// Result of [`ancova_summary`].
#[derive(Debug, Clone)]
pub struct AncovaSummary {
    /// One row per outcome variable, in input order.
    pub rows: Vec<AncovaSummaryRow>,
    /// The full ANCOVA table of each outcome, aligned with `rows`.
    pub tables: Vec<AncovaTable>,
}

impl AncovaSummary {
    /// Rows whose FDR-corrected p-value is at most `alpha`.
    pub fn significant(&self, alpha: f64) -> impl Iterator<Item = &AncovaSummaryRow> {
        self.rows.iter().filter(move |row| row.p_fdr <= alpha)
    }
}

/// Runs an ANCOVA of `dv` with the group factor and the covariates.
///
/// The model is fitted on the complete cases of `dv`, the group column and
/// the covariates. Sums of squares are Type II.
pub fn ancova<S>(
    dataset: &Dataset,
    group: &GroupSpec,
    dv: &str,
    covariates: &[S],
) -> Result<AncovaTable, AnalysisError>
where
    S: AsRef<str>,
{
    let covariates = covariates.iter().map(AsRef::as_ref).collect::<Vec<_>>();
    if let Some(&name) = covariates
        .iter()
        .find(|&&name| name == dv || name == group.column)
    {
        return Err(AnalysisError::InvalidCovariate {
            name: name.to_string(),
        });
    }

    let mut columns = vec![dv, group.column.as_str()];
    columns.extend(&covariates);
    let complete = dataset.complete_cases(&columns)?;

    let factor = Factor::treatment(&group.column, complete.column(&group.column)?);
    if factor.levels.len() < 2 {
        return Err(AnalysisError::TooFewLevels {
            column: group.column.clone(),
            levels: factor.levels.len(),
        });
    }

    let mut terms = vec![factor.term()];
    for &name in &covariates {
        terms.push(Term::continuous(name, complete.column(name)?));
    }

    let table = anova::type2_anova(complete.column(dv)?, &terms).map_err(|source| {
        AnalysisError::Model {
            variable: dv.to_string(),
            source,
        }
    })?;

    let rows = table
        .rows
        .into_iter()
        .map(|row| AncovaTableRow {
            source: row.source,
            ss: row.ss,
            df: row.df,
            f: row.f,
            p_unc: row.p_unc,
            np2: row.np2,
        })
        .collect();
    Ok(AncovaTable {
        dv: dv.to_string(),
        between: group.column.clone(),
        n_obs: complete.n_rows(),
        rows,
    })
}

/// Compares the groups on every variable in `rois`.
///
/// For each variable an ANCOVA ([`ancova`]) supplies the group F statistic
/// and uncorrected p-value, and [`effect::calculate_cohens_d`] supplies the
/// effect size. The p-values are then corrected across all variables with
/// the Benjamini–Hochberg procedure. Rows keep the order of `rois`.
pub fn ancova_summary<R, C>(
    dataset: &Dataset,
    group: &GroupSpec,
    rois: &[R],
    covariates: &[C],
) -> Result<AncovaSummary, AnalysisError>
where
    R: AsRef<str>,
    C: AsRef<str>,
{
    if rois.is_empty() {
        return Err(AnalysisError::EmptyVariableList);
    }

    let mut f_values = Vec::with_capacity(rois.len());
    let mut p_values = Vec::with_capacity(rois.len());
    let mut cohens_d = Vec::with_capacity(rois.len());
    let mut tables = Vec::with_capacity(rois.len());
    for roi in rois {
        let roi = roi.as_ref();
        let table = ancova(dataset, group, roi, covariates)?;
        let between = table.between_row()?;
        f_values.push(between.f.unwrap_or(f64::NAN));
        p_values.push(between.p_unc.unwrap_or(f64::NAN));
        cohens_d.push(effect::calculate_cohens_d(dataset, group, roi)?.d);
        tables.push(table);
    }

    let fdr = multitest::fdr_correction(&p_values, multitest::DEFAULT_ALPHA);
    let rows = rois
        .iter()
        .zip(f_values)
        .zip(p_values)
        .zip(fdr.corrected)
        .zip(cohens_d)
        .map(|((((roi, f_value), p_value), p_fdr), cohens_d)| AncovaSummaryRow {
            roi: roi.as_ref().to_string(),
            f_value,
            p_value,
            p_fdr,
            cohens_d,
        })
        .collect();

    Ok(AncovaSummary { rows, tables })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::{Rng as _, SeedableRng as _};
    use rand_distr::Normal;
    use rand_pcg::Pcg64;

    use super::*;

    const COVARIATES: [&str; 3] = ["sex", "Age_at_scan", "TIV_corrected"];

    /// Two groups of 40 subjects with three volumes: `Medial` differs by group,
    /// `Lateral` depends only on the covariates, `Pulvinar` has a weak group effect.
    fn synthetic_dataset(seed: u64) -> Dataset {
        let mut rng = Pcg64::seed_from_u64(seed);
        let noise = Normal::new(0.0, 1.0).unwrap();
        let n = 80;
        let mut columns = vec![
            ("blsgroup", vec![]),
            ("sex", vec![]),
            ("Age_at_scan", vec![]),
            ("TIV_corrected", vec![]),
            ("Medial", vec![]),
            ("Lateral", vec![]),
            ("Pulvinar", vec![]),
        ];
        for i in 0..n {
            let group = if i % 2 == 0 { 1.0 } else { 2.0 };
            let sex = f64::from(u8::from(rng.random_bool(0.5)));
            let age = rng.random_range(25.0..29.0);
            let tiv = rng.random_range(1300.0..1700.0);
            let covariate_part = 0.5 * sex + 0.1 * age + 0.01 * tiv;
            let row = [
                group,
                sex,
                age,
                tiv,
                covariate_part + 3.0 * (group - 1.0) + rng.sample(noise),
                covariate_part + rng.sample(noise),
                covariate_part + 0.3 * (group - 1.0) + rng.sample(noise),
            ];
            for ((_, column), value) in columns.iter_mut().zip(row) {
                column.push(value);
            }
        }
        Dataset::from_columns(columns).unwrap()
    }

    #[test]
    fn test_single_roi_summary_shape() {
        let dataset = synthetic_dataset(3);
        let summary =
            ancova_summary(&dataset, &GroupSpec::default(), &["Medial"], &COVARIATES).unwrap();
        assert_eq!(summary.rows.len(), 1);
        assert_eq!(summary.tables.len(), 1);

        let row = &summary.rows[0];
        assert_eq!(row.roi, "Medial");
        assert_eq!(row.p_fdr, row.p_value);
        assert!(row.p_value < 1e-6);
        assert!(row.f_value > 20.0);

        let json = serde_json::to_string(row).unwrap();
        let positions = ["\"roi\"", "\"F-value\"", "\"p-value\"", "\"p-fdr\"", "\"Cohens d\""]
            .map(|key| json.find(key).unwrap());
        assert!(positions.is_sorted(), "{json}");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_rows_follow_input_order() {
        let dataset = synthetic_dataset(4);
        let rois = ["Pulvinar", "Lateral", "Medial"];
        let summary = ancova_summary(&dataset, &GroupSpec::default(), &rois, &COVARIATES).unwrap();
        let names = summary.rows.iter().map(|r| r.roi.as_str()).collect::<Vec<_>>();
        assert_eq!(names, rois);
        for (row, table) in summary.rows.iter().zip(&summary.tables) {
            assert_eq!(row.roi, table.dv);
            assert!(row.p_fdr >= row.p_value);
            assert!(row.p_fdr <= 1.0);
        }
        // Medial has the strongest group effect and the largest |d|
        assert!(summary.rows[2].p_value < summary.rows[1].p_value);
        assert!(summary.rows[2].cohens_d < 0.0);
        assert!(summary.significant(0.05).any(|row| row.roi == "Medial"));
    }

    #[test]
    fn test_identical_variables_share_corrected_p_value() {
        let dataset = synthetic_dataset(5);
        let rois = ["Lateral", "Lateral", "Lateral"];
        let summary = ancova_summary(&dataset, &GroupSpec::default(), &rois, &COVARIATES).unwrap();
        let p = summary.rows[0].p_value;
        for row in &summary.rows {
            assert_eq!(row.p_value, p);
            assert_relative_eq!(row.p_fdr, p, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_full_table_layout() {
        let dataset = synthetic_dataset(6);
        let table = ancova(&dataset, &GroupSpec::default(), "Medial", &COVARIATES).unwrap();
        let sources = table.rows.iter().map(|r| r.source.as_str()).collect::<Vec<_>>();
        assert_eq!(
            sources,
            ["blsgroup", "sex", "Age_at_scan", "TIV_corrected", "Residual"]
        );
        assert_eq!(table.n_obs, 80);
        let residual = table.row("Residual").unwrap();
        assert_eq!(residual.df, 80 - 5);
        let between = table.between_row().unwrap();
        assert_eq!(between.df, 1);
        let np2 = between.np2.unwrap();
        assert!(np2 > 0.0 && np2 < 1.0);
    }

    #[test]
    fn test_without_covariates_matches_one_way_anova() {
        let dataset = Dataset::from_columns([
            ("blsgroup", vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0]),
            ("Medial", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
        ])
        .unwrap();
        let table = ancova::<&str>(&dataset, &GroupSpec::default(), "Medial", &[]).unwrap();
        let between = table.between_row().unwrap();
        assert_relative_eq!(between.ss, 13.5, epsilon = 1e-9);
        assert_relative_eq!(between.f.unwrap(), 13.5, epsilon = 1e-9);
    }

    #[test]
    fn test_missing_values_use_complete_cases() {
        let mut dataset_columns = vec![
            ("blsgroup", vec![1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0]),
            ("Age_at_scan", vec![26.0, 27.0, f64::NAN, 28.0, 26.5, 27.5, 28.5, 26.0]),
            ("Medial", vec![10.0, 10.4, 10.2, 10.9, 12.1, 12.6, 12.9, f64::NAN]),
        ];
        let dataset = Dataset::from_columns(dataset_columns.clone()).unwrap();
        let table = ancova(&dataset, &GroupSpec::default(), "Medial", &["Age_at_scan"]).unwrap();
        assert_eq!(table.n_obs, 6);

        // Dropping the incomplete rows by hand gives the same table
        for (_, values) in &mut dataset_columns {
            values.remove(7);
            values.remove(2);
        }
        let trimmed = Dataset::from_columns(dataset_columns).unwrap();
        let expected = ancova(&trimmed, &GroupSpec::default(), "Medial", &["Age_at_scan"]).unwrap();
        assert_eq!(table.rows, expected.rows);
    }

    #[test]
    fn test_errors() {
        let dataset = synthetic_dataset(7);
        let group = GroupSpec::default();

        assert!(matches!(
            ancova_summary::<&str, &str>(&dataset, &group, &[], &COVARIATES),
            Err(AnalysisError::EmptyVariableList)
        ));
        assert!(matches!(
            ancova_summary(&dataset, &group, &["Medial"], &["eTIV"]),
            Err(AnalysisError::MissingColumn { name }) if name == "eTIV"
        ));
        assert!(matches!(
            ancova(&dataset, &group, "Medial", &["Medial"]),
            Err(AnalysisError::InvalidCovariate { .. })
        ));
        assert!(matches!(
            ancova(&dataset, &group, "Medial", &["blsgroup"]),
            Err(AnalysisError::InvalidCovariate { .. })
        ));

        let one_group = Dataset::from_columns([
            ("blsgroup", vec![1.0, 1.0, 1.0]),
            ("Medial", vec![1.0, 2.0, 3.0]),
        ])
        .unwrap();
        assert!(matches!(
            ancova::<&str>(&one_group, &group, "Medial", &[]),
            Err(AnalysisError::TooFewLevels { levels: 1, .. })
        ));

        let too_small = Dataset::from_columns([
            ("blsgroup", vec![1.0, 2.0]),
            ("Medial", vec![1.0, 2.0]),
        ])
        .unwrap();
        assert!(matches!(
            ancova::<&str>(&too_small, &group, "Medial", &[]),
            Err(AnalysisError::Model { .. })
        ));
    }
}
