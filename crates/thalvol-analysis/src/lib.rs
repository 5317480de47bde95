//! Group comparisons of regional volumes over a named-column dataset
//!
//! This crate connects the slice-level routines of `thalvol_stats` to an
//! in-memory table of subjects, looking every variable up by column name.
//!
//! # Overview
//!
//! The analysis layer supports three operations:
//!
//! ## Effect Sizes
//!
//! [`effect::calculate_cohens_d`] splits the rows by the group column
//! ([`group::GroupSpec`]) and computes Cohen's d for one outcome variable.
//!
//! ## ANCOVA Batches
//!
//! [`ancova::ancova_summary`] runs an ANCOVA per outcome variable with the
//! group factor as between-subject effect and the covariates as adjustors,
//! attaches Cohen's d, and corrects the group p-values across variables
//! with the Benjamini–Hochberg procedure.
//!
//! ## Association Tests
//!
//! [`association::association_with_volume`] fits
//! `nucleus ~ variable + sex + Age_at_scan + TIV_corrected` and reports the
//! predictor's coefficient, t statistic and p-value together with the model R².
//!
//! # Missing Values
//!
//! Missing measurements are `NaN`. Effect sizes skip them per variable;
//! model fits use the complete cases of the columns in the model.
//!
//! # Examples
//!
//! ```
//! use thalvol_analysis::{ancova, dataset::Dataset, group::GroupSpec};
//!
//! let dataset = Dataset::from_columns([
//!     ("blsgroup", vec![1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0]),
//!     ("Medial", vec![10.2, 9.8, 10.5, 10.1, 11.9, 12.4, 12.0, 12.2]),
//!     ("Age_at_scan", vec![26.0, 27.5, 26.4, 28.1, 26.9, 27.2, 28.0, 26.5]),
//! ])?;
//!
//! let summary = ancova::ancova_summary(
//!     &dataset,
//!     &GroupSpec::default(),
//!     &["Medial"],
//!     &["Age_at_scan"],
//! )?;
//! assert_eq!(summary.rows.len(), 1);
//! assert_eq!(summary.rows[0].p_fdr, summary.rows[0].p_value);
//! # Ok::<(), thalvol_analysis::AnalysisError>(())
//! ```

use thalvol_stats::linear_model::LinearModelError;

pub mod ancova;
pub mod association;
pub mod dataset;
pub mod effect;
pub mod group;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum AnalysisError {
    #[display("column '{name}' not found in dataset")]
    MissingColumn { name: String },
    #[display("column '{name}' appears more than once")]
    DuplicateColumn { name: String },
    #[display("column '{name}' has {len} rows, expected {expected}")]
    ColumnLength {
        name: String,
        len: usize,
        expected: usize,
    },
    #[display(
        "group {label} of '{column}' has {count} observations of '{variable}', at least 2 are required"
    )]
    TooFewObservations {
        column: String,
        label: f64,
        variable: String,
        count: usize,
    },
    #[display("'{column}' has {levels} distinct level(s) among complete cases, at least 2 are required")]
    TooFewLevels { column: String, levels: usize },
    #[display("no variables to analyze")]
    EmptyVariableList,
    #[display("'{name}' cannot be a covariate: it is the outcome or the group column")]
    InvalidCovariate { name: String },
    #[display("term '{term}' missing from the fitted model")]
    MissingTerm { term: String },
    #[display("failed to fit model for '{variable}'")]
    Model {
        variable: String,
        source: LinearModelError,
    },
}
