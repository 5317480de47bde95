//! Statistical routines for group comparisons of regional volumes.
//!
//! This crate works on plain slices and knows nothing about datasets or
//! column names beyond the term names of a linear model. It provides:
//!
//! - **Descriptive statistics**: count, mean and sample standard deviation
//! - **Effect sizes**: Cohen's d with a pooled standard deviation
//! - **Multiple comparisons**: Benjamini–Hochberg false-discovery-rate correction
//! - **Linear models**: ordinary least squares with named coefficients
//! - **ANOVA**: Type II sums of squares and F tests per model term
//!
//! # Modules
//!
//! - [`descriptive`]: Sample summaries that skip missing values
//! - [`effect_size`]: Cohen's d for two samples
//! - [`multitest`]: False-discovery-rate correction
//! - [`distribution`]: Tail probabilities of the t and F distributions
//! - [`linear_model`]: Ordinary least squares fitting
//! - [`anova`]: Type II ANOVA/ANCOVA tables
//!
//! # Examples
//!
//! ## Computing an effect size
//!
//! ```
//! use thalvol_stats::effect_size::cohens_d;
//!
//! let preterm = [1.0, 2.0, 3.0];
//! let fullterm = [3.0, 4.0, 5.0];
//! let effect = cohens_d(&preterm, &fullterm).unwrap();
//! assert_eq!(effect.d, -2.0);
//! ```
//!
//! ## Correcting p-values
//!
//! ```
//! use thalvol_stats::multitest::{DEFAULT_ALPHA, fdr_correction};
//!
//! let fdr = fdr_correction(&[0.01, 0.02, 0.5], DEFAULT_ALPHA);
//! assert_eq!(fdr.rejected, vec![true, true, false]);
//! ```
//!
//! ## Testing a group factor with a covariate
//!
//! ```
//! use thalvol_stats::anova::{Factor, Term, type2_anova};
//!
//! let group = [1.0, 1.0, 1.0, 2.0, 2.0, 2.0];
//! let age = [30.0, 32.0, 35.0, 31.0, 33.0, 36.0];
//! let volume = [10.1, 10.4, 10.9, 12.0, 12.3, 13.1];
//!
//! let factor = Factor::treatment("group", &group);
//! let table = type2_anova(&volume, &[factor.term(), Term::continuous("age", &age)]).unwrap();
//! let group_row = table.row("group").unwrap();
//! assert!(group_row.p_unc.unwrap() < 0.05);
//! ```

pub mod anova;
pub mod descriptive;
pub mod distribution;
pub mod effect_size;
pub mod linear_model;
pub mod multitest;
