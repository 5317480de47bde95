//! Tail probabilities of the reference distributions used by the tests.

use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};

/// Two-sided p-value of a t statistic with `df` degrees of freedom.
///
/// Returns `NaN` for a `NaN` statistic or a non-positive `df`.
///
/// ```
/// # use thalvol_stats::distribution::student_t_two_sided;
/// assert!((student_t_two_sided(0.0, 10.0) - 1.0).abs() < 1e-12);
/// assert_eq!(student_t_two_sided(f64::INFINITY, 10.0), 0.0);
/// ```
#[must_use]
pub fn student_t_two_sided(t: f64, df: f64) -> f64 {
    if t.is_nan() {
        return f64::NAN;
    }
    if t.is_infinite() {
        return 0.0;
    }
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * dist.sf(t.abs())).min(1.0),
        Err(_) => f64::NAN,
    }
}

/// Upper-tail p-value `P(F >= f)` of an F statistic.
///
/// Returns `NaN` for a `NaN` statistic or non-positive degrees of freedom.
#[must_use]
pub fn f_upper_tail(f: f64, df_num: f64, df_den: f64) -> f64 {
    if f.is_nan() {
        return f64::NAN;
    }
    if f.is_infinite() {
        return 0.0;
    }
    if f <= 0.0 {
        return 1.0;
    }
    match FisherSnedecor::new(df_num, df_den) {
        Ok(dist) => dist.sf(f),
        Err(_) => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_t_reference_values() {
        // Two-sided 5% critical values
        assert_abs_diff_eq!(student_t_two_sided(2.228_138_85, 10.0), 0.05, epsilon = 1e-6);
        assert_abs_diff_eq!(student_t_two_sided(-2.228_138_85, 10.0), 0.05, epsilon = 1e-6);
    }

    #[test]
    fn test_f_reference_values() {
        // Upper 5% critical value of F(1, 10)
        assert_abs_diff_eq!(f_upper_tail(4.964_602_7, 1.0, 10.0), 0.05, epsilon = 1e-6);
        assert_eq!(f_upper_tail(0.0, 1.0, 10.0), 1.0);
    }

    #[test]
    fn test_f_equals_squared_t() {
        let t = 1.7_f64;
        assert_abs_diff_eq!(
            f_upper_tail(t * t, 1.0, 23.0),
            student_t_two_sided(t, 23.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(student_t_two_sided(f64::NAN, 5.0).is_nan());
        assert!(student_t_two_sided(1.0, 0.0).is_nan());
        assert!(f_upper_tail(f64::NAN, 1.0, 5.0).is_nan());
        assert!(f_upper_tail(2.0, 1.0, 0.0).is_nan());
        assert_eq!(f_upper_tail(f64::INFINITY, 1.0, 5.0), 0.0);
    }
}
