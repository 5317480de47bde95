//! Result table display
//!
//! Prints analysis results as fixed-width text tables on stdout.

use thalvol_analysis::{
    ancova::{AncovaSummaryRow, AncovaTable},
    association::AssociationRow,
};
use thalvol_stats::effect_size::CohensD;

/// Formats an optional statistic, `-` when absent.
fn opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.precision$}"))
}

/// Formats a p-value, switching to scientific notation below 0.001.
fn p_value(value: f64) -> String {
    if value < 1e-3 {
        format!("{value:.2e}")
    } else {
        format!("{value:.4}")
    }
}

fn separator(width: usize) {
    println!("  {}", "-".repeat(width));
}

/// Print the per-variable ANCOVA summary
///
/// Rows with an FDR-corrected p-value at most `alpha` are marked with `*`.
pub(super) fn print_ancova_summary(rows: &[AncovaSummaryRow], alpha: f64) {
    println!(
        "  {:<24} {:>10} {:>10} {:>10} {:>10}",
        "ROI", "F", "p-unc", "p-fdr", "Cohen's d"
    );
    // roi(24) + 4 * value(10) + spaces(4) + marker(2)
    separator(70);
    for row in rows {
        let marker = if row.p_fdr <= alpha { " *" } else { "" };
        println!(
            "  {:<24} {:>10.3} {:>10} {:>10} {:>10.3}{marker}",
            row.roi,
            row.f_value,
            p_value(row.p_value),
            p_value(row.p_fdr),
            row.cohens_d,
        );
    }
    println!("  (* p-fdr <= {alpha})");
}

/// Print a full ANCOVA table of one outcome variable
pub(super) fn print_ancova_table(table: &AncovaTable) {
    println!(
        "{} ~ {} (n = {})",
        table.dv, table.between, table.n_obs
    );
    println!(
        "  {:<24} {:>12} {:>6} {:>10} {:>10} {:>8}",
        "Source", "SS", "DF", "F", "p-unc", "np2"
    );
    // source(24) + ss(12) + df(6) + f(10) + p(10) + np2(8) + spaces(5)
    separator(75);
    for row in &table.rows {
        println!(
            "  {:<24} {:>12.4} {:>6} {:>10} {:>10} {:>8}",
            row.source,
            row.ss,
            row.df,
            opt(row.f, 3),
            row.p_unc.map_or_else(|| "-".to_string(), p_value),
            opt(row.np2, 3),
        );
    }
}

/// Print association test results
pub(super) fn print_associations(rows: &[AssociationRow]) {
    println!(
        "  {:<20} {:<20} {:>10} {:>12} {:>8} {:>10}",
        "Variable", "Nucleus", "t", "coef", "R2", "p"
    );
    // variable(20) + nucleus(20) + t(10) + coef(12) + r2(8) + p(10) + spaces(5)
    separator(85);
    for row in rows {
        println!(
            "  {:<20} {:<20} {:>10.3} {:>12.4} {:>8.3} {:>10}",
            row.variable,
            row.nucleus,
            row.t_statistic,
            row.coef,
            row.r_squared,
            p_value(row.pvalue),
        );
    }
}

/// Print Cohen's d with the per-group summaries it was computed from
pub(super) fn print_effect_sizes(rows: &[(String, CohensD)], first: f64, second: f64) {
    let first_label = format!("Mean({first})");
    let second_label = format!("Mean({second})");
    println!(
        "  {:<24} {:>6} {:>12} {:>6} {:>12} {:>12} {:>10}",
        "Variable", "N1", first_label, "N2", second_label, "Pooled SD", "Cohen's d"
    );
    // variable(24) + n(6) + mean(12) + n(6) + mean(12) + sd(12) + d(10) + spaces(6)
    separator(88);
    for (variable, effect) in rows {
        println!(
            "  {:<24} {:>6} {:>12.4} {:>6} {:>12.4} {:>12.4} {:>10.3}",
            variable,
            effect.first.count,
            effect.first.mean,
            effect.second.count,
            effect.second.mean,
            effect.pooled_std,
            effect.d,
        );
    }
}
