//! Type II analysis of variance for main-effects linear models.
//!
//! A term's Type II sum of squares is the increase in residual sum of squares
//! when that term alone is removed from the full model. Without interaction
//! terms this is also the Type III sum of squares, so an ANCOVA of a group
//! factor with continuous covariates is a single [`type2_anova`] call.

use crate::{
    distribution,
    linear_model::{LinearModelError, OlsFit, Regressor},
};

/// Source name of the residual row in an [`AnovaTable`].
pub const RESIDUAL: &str = "Residual";

/// A model term spanning one or more design columns.
///
/// Continuous covariates span one column; a factor with `k` levels spans
/// `k - 1` indicator columns.
#[derive(Debug, Clone)]
pub struct Term<'a> {
    pub name: &'a str,
    pub columns: Vec<Regressor<'a>>,
}

impl<'a> Term<'a> {
    /// A term made of a single continuous column named like the term.
    #[must_use]
    pub fn continuous(name: &'a str, values: &'a [f64]) -> Self {
        Self {
            name,
            columns: vec![Regressor::new(name, values)],
        }
    }
}

/// Treatment (dummy) coding of a categorical variable.
#[derive(Debug, Clone)]
pub struct Factor {
    name: String,
    /// Distinct levels in ascending order; the first is the reference.
    pub levels: Vec<f64>,
    /// Indicator column names, one per non-reference level.
    column_names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl Factor {
    /// Codes `values` against their smallest level.
    ///
    /// Indicator columns are named `C(name)[T.level]`. `NaN` is not a level.
    ///
    /// ```
    /// # use thalvol_stats::anova::Factor;
    /// let factor = Factor::treatment("group", &[1.0, 2.0, 2.0, 1.0]);
    /// assert_eq!(factor.levels, vec![1.0, 2.0]);
    /// let term = factor.term();
    /// assert_eq!(term.columns.len(), 1);
    /// assert_eq!(term.columns[0].name, "C(group)[T.2]");
    /// assert_eq!(term.columns[0].values, &[0.0, 1.0, 1.0, 0.0]);
    /// ```
    #[expect(clippy::float_cmp)]
    #[must_use]
    pub fn treatment(name: &str, values: &[f64]) -> Self {
        let mut levels = values.to_vec();
        levels.retain(|v| !v.is_nan());
        levels.sort_by(f64::total_cmp);
        levels.dedup();

        let column_names = levels
            .iter()
            .skip(1)
            .map(|level| format!("C({name})[T.{level}]"))
            .collect();
        let columns = levels
            .iter()
            .skip(1)
            .map(|&level| {
                values
                    .iter()
                    .map(|&v| if v == level { 1.0 } else { 0.0 })
                    .collect()
            })
            .collect();

        Self {
            name: name.to_string(),
            levels,
            column_names,
            columns,
        }
    }

    /// Borrows the factor as a model term.
    #[must_use]
    pub fn term(&self) -> Term<'_> {
        Term {
            name: &self.name,
            columns: self
                .column_names
                .iter()
                .zip(&self.columns)
                .map(|(name, values)| Regressor::new(name, values))
                .collect(),
        }
    }
}

/// One row of an ANOVA table.
#[derive(Debug, Clone, PartialEq)]
pub struct AnovaRow {
    pub source: String,
    /// Sum of squares.
    pub ss: f64,
    /// Degrees of freedom.
    pub df: usize,
    /// F statistic, absent for the residual row.
    pub f: Option<f64>,
    /// Uncorrected p-value, absent for the residual row.
    pub p_unc: Option<f64>,
    /// Partial eta-squared, `ss / (ss + rss)`, absent for the residual row.
    pub np2: Option<f64>,
}

/// ANOVA table: one row per term in model order, then [`RESIDUAL`].
#[derive(Debug, Clone)]
pub struct AnovaTable {
    pub rows: Vec<AnovaRow>,
    /// The full model the table was computed from.
    pub fit: OlsFit,
}

impl AnovaTable {
    /// Returns the row of the named source.
    #[must_use]
    pub fn row(&self, source: &str) -> Option<&AnovaRow> {
        self.rows.iter().find(|row| row.source == source)
    }

    #[must_use]
    pub fn residual(&self) -> Option<&AnovaRow> {
        self.row(RESIDUAL)
    }
}

/// Computes Type II sums of squares and F tests for each term.
///
/// # Examples
///
/// ```
/// use thalvol_stats::anova::{Factor, type2_anova};
///
/// let group = [1.0, 1.0, 1.0, 2.0, 2.0, 2.0];
/// let y = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let factor = Factor::treatment("group", &group);
/// let table = type2_anova(&y, &[factor.term()]).unwrap();
/// let row = table.row("group").unwrap();
/// assert!((row.ss - 13.5).abs() < 1e-9);
/// assert!((row.f.unwrap() - 13.5).abs() < 1e-9);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn type2_anova(response: &[f64], terms: &[Term<'_>]) -> Result<AnovaTable, LinearModelError> {
    let all_columns = terms
        .iter()
        .flat_map(|term| term.columns.iter().copied())
        .collect::<Vec<_>>();
    let fit = OlsFit::fit(response, &all_columns)?;
    let rss = fit.rss;
    let df_resid = fit.df_resid;
    let mse = rss / df_resid as f64;

    let mut rows = Vec::with_capacity(terms.len() + 1);
    for (index, term) in terms.iter().enumerate() {
        let reduced_columns = terms
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != index)
            .flat_map(|(_, other)| other.columns.iter().copied())
            .collect::<Vec<_>>();
        let reduced = OlsFit::fit(response, &reduced_columns)?;

        // Rounding can push a negligible increase below zero
        let ss = (reduced.rss - rss).max(0.0);
        let df = term.columns.len();
        let f = (ss / df as f64) / mse;
        rows.push(AnovaRow {
            source: term.name.to_string(),
            ss,
            df,
            f: Some(f),
            p_unc: Some(distribution::f_upper_tail(f, df as f64, df_resid as f64)),
            np2: Some(ss / (ss + rss)),
        });
    }
    rows.push(AnovaRow {
        source: RESIDUAL.to_string(),
        ss: rss,
        df: df_resid,
        f: None,
        p_unc: None,
        np2: None,
    });

    Ok(AnovaTable { rows, fit })
}
