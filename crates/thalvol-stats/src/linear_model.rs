//! Ordinary least squares with named terms.
//!
//! Every model carries an intercept (term [`INTERCEPT`]) followed by the
//! regressors in the order they were given. Coefficients are looked up by
//! term name, so callers never depend on column positions.

use nalgebra::{DMatrix, DVector};

use crate::distribution;

/// Name of the intercept term in every fitted model.
pub const INTERCEPT: &str = "Intercept";

const COLLINEARITY_TOLERANCE: f64 = 1e-10;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LinearModelError {
    #[display("regressor '{name}' has {len} observations, expected {expected}")]
    LengthMismatch {
        name: String,
        len: usize,
        expected: usize,
    },
    #[display("term '{name}' appears more than once in the model")]
    DuplicateTerm { name: String },
    #[display("non-finite value in '{name}'")]
    NonFinite { name: String },
    #[display("{observations} observations cannot estimate {parameters} parameters")]
    TooFewObservations {
        observations: usize,
        parameters: usize,
    },
    #[display("design matrix is singular")]
    SingularDesign,
}

/// A named regressor column borrowed from the caller.
#[derive(Debug, Clone, Copy)]
pub struct Regressor<'a> {
    pub name: &'a str,
    pub values: &'a [f64],
}

impl<'a> Regressor<'a> {
    #[must_use]
    pub fn new(name: &'a str, values: &'a [f64]) -> Self {
        Self { name, values }
    }
}

/// Estimate and inference for a single model term.
#[derive(Debug, Clone, PartialEq)]
pub struct Coefficient {
    pub term: String,
    pub estimate: f64,
    pub std_error: f64,
    pub t_value: f64,
    /// Two-sided p-value with the model's residual degrees of freedom.
    pub p_value: f64,
}

/// A fitted ordinary least squares model.
#[derive(Debug, Clone)]
pub struct OlsFit {
    /// Coefficients, intercept first.
    pub coefficients: Vec<Coefficient>,
    /// Number of observations.
    pub n_obs: usize,
    /// Model degrees of freedom (number of regressors, intercept excluded).
    pub df_model: usize,
    /// Residual degrees of freedom, `n_obs - df_model - 1`.
    pub df_resid: usize,
    /// Residual sum of squares.
    pub rss: f64,
    /// Coefficient of determination.
    ///
    /// `NaN` when the response has no variance.
    pub r_squared: f64,
    pub adj_r_squared: f64,
    /// Overall F statistic against the intercept-only model.
    ///
    /// `NaN` for an intercept-only model.
    pub f_statistic: f64,
    pub f_p_value: f64,
}

impl OlsFit {
    /// Fits `response ~ 1 + regressors` by ordinary least squares.
    ///
    /// The normal equations are solved through a Cholesky factorisation of
    /// `XᵀX`, whose inverse also gives the coefficient covariance
    /// `σ² (XᵀX)⁻¹` with `σ² = RSS / df_resid`.
    ///
    /// # Examples
    ///
    /// ```
    /// use thalvol_stats::linear_model::{OlsFit, Regressor};
    ///
    /// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
    /// let y = [2.0, 4.0, 5.0, 4.0, 5.0];
    /// let fit = OlsFit::fit(&y, &[Regressor::new("x", &x)]).unwrap();
    /// let slope = fit.coefficient("x").unwrap();
    /// assert!((slope.estimate - 0.6).abs() < 1e-12);
    /// assert!((fit.r_squared - 0.6).abs() < 1e-12);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn fit(response: &[f64], regressors: &[Regressor<'_>]) -> Result<Self, LinearModelError> {
        let n = response.len();
        let p = regressors.len() + 1;
        validate(response, regressors)?;
        if n <= p {
            return Err(LinearModelError::TooFewObservations {
                observations: n,
                parameters: p,
            });
        }

        let x = DMatrix::from_fn(n, p, |i, j| {
            if j == 0 {
                1.0
            } else {
                regressors[j - 1].values[i]
            }
        });
        let y = DVector::from_column_slice(response);
        let xt = x.transpose();
        let xtx = &xt * &x;
        let cholesky = xtx
            .clone()
            .cholesky()
            .ok_or(LinearModelError::SingularDesign)?;
        // L[j][j]^2 / (XᵀX)[j][j] is the share of column j not explained by
        // the columns before it
        let l = cholesky.l_dirty();
        let collinear = (0..p).any(|j| {
            let unexplained = l[(j, j)].powi(2) / xtx[(j, j)];
            unexplained.is_nan() || unexplained <= COLLINEARITY_TOLERANCE
        });
        if collinear {
            return Err(LinearModelError::SingularDesign);
        }
        let beta = cholesky.solve(&(&xt * &y));
        let xtx_inv = cholesky.inverse();

        let residuals = &y - &x * &beta;
        let rss = residuals.norm_squared();
        let mean = y.mean();
        let tss = y.iter().map(|v| (v - mean).powi(2)).sum::<f64>();

        let df_model = p - 1;
        let df_resid = n - p;
        let sigma2 = rss / df_resid as f64;
        let r_squared = 1.0 - rss / tss;
        let adj_r_squared = 1.0 - (1.0 - r_squared) * (n as f64 - 1.0) / df_resid as f64;
        let f_statistic = if df_model == 0 {
            f64::NAN
        } else {
            ((tss - rss) / df_model as f64) / sigma2
        };
        let f_p_value = distribution::f_upper_tail(f_statistic, df_model as f64, df_resid as f64);

        let coefficients = beta
            .iter()
            .enumerate()
            .map(|(j, &estimate)| {
                let term = if j == 0 {
                    INTERCEPT.to_string()
                } else {
                    regressors[j - 1].name.to_string()
                };
                let std_error = (xtx_inv[(j, j)] * sigma2).sqrt();
                let t_value = estimate / std_error;
                let p_value = distribution::student_t_two_sided(t_value, df_resid as f64);
                Coefficient {
                    term,
                    estimate,
                    std_error,
                    t_value,
                    p_value,
                }
            })
            .collect();

        Ok(Self {
            coefficients,
            n_obs: n,
            df_model,
            df_resid,
            rss,
            r_squared,
            adj_r_squared,
            f_statistic,
            f_p_value,
        })
    }

    /// Returns the coefficient of the named term.
    #[must_use]
    pub fn coefficient(&self, term: &str) -> Option<&Coefficient> {
        self.coefficients.iter().find(|c| c.term == term)
    }
}

fn validate(response: &[f64], regressors: &[Regressor<'_>]) -> Result<(), LinearModelError> {
    let n = response.len();
    if response.iter().any(|v| !v.is_finite()) {
        return Err(LinearModelError::NonFinite {
            name: "response".to_string(),
        });
    }
    for (i, regressor) in regressors.iter().enumerate() {
        if regressor.name == INTERCEPT
            || regressors[..i].iter().any(|r| r.name == regressor.name)
        {
            return Err(LinearModelError::DuplicateTerm {
                name: regressor.name.to_string(),
            });
        }
        if regressor.values.len() != n {
            return Err(LinearModelError::LengthMismatch {
                name: regressor.name.to_string(),
                len: regressor.values.len(),
                expected: n,
            });
        }
        if regressor.values.iter().any(|v| !v.is_finite()) {
            return Err(LinearModelError::NonFinite {
                name: regressor.name.to_string(),
            });
        }
    }
    Ok(())
}
