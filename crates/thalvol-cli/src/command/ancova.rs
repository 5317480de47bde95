//! Group comparison command
//!
//! Runs an ANCOVA per outcome variable, attaches Cohen's d, and corrects the
//! group p-values across variables.

use std::path::PathBuf;

use clap::Args;
use thalvol_analysis::ancova::{self, AncovaSummaryRow};
use thalvol_stats::multitest;

use crate::{
    command::{CovariateArg, GroupArg, table},
    util::{self, CsvRecord, Output},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct AncovaArg {
    /// Path to the dataset JSON file
    pub data: PathBuf,

    /// Outcome variables to compare between the groups (comma-separated)
    #[arg(long, value_delimiter = ',', required = true)]
    pub rois: Vec<String>,

    #[command(flatten)]
    pub covariates: CovariateArg,

    #[command(flatten)]
    pub group: GroupArg,

    /// FDR level used to mark significant variables
    #[arg(long, default_value_t = multitest::DEFAULT_ALPHA)]
    pub alpha: f64,

    /// Write the summary rows as JSON to this path (`-` for stdout)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Write the summary rows as CSV to this path
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Also print the full ANCOVA table of every variable
    #[arg(long)]
    pub full_tables: bool,
}

impl CsvRecord for AncovaSummaryRow {
    const HEADER: &'static [&'static str] = &["roi", "F-value", "p-value", "p-fdr", "Cohens d"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.roi.clone(),
            util::csv_float(self.f_value),
            util::csv_float(self.p_value),
            util::csv_float(self.p_fdr),
            util::csv_float(self.cohens_d),
        ]
    }
}

pub(crate) fn run(arg: &AncovaArg) -> anyhow::Result<()> {
    let dataset = util::read_dataset_file(&arg.data)?;
    let group = arg.group.spec();
    let covariates = arg.covariates.names();

    eprintln!(
        "Running ANCOVA for {} variables (group: {}, covariates: {})...",
        arg.rois.len(),
        group.column,
        if covariates.is_empty() {
            "none".to_string()
        } else {
            covariates.join(", ")
        }
    );
    let summary = ancova::ancova_summary(&dataset, &group, &arg.rois, &covariates)?;
    let n_significant = summary.significant(arg.alpha).count();
    eprintln!(
        "{n_significant} of {} variables significant at FDR {}",
        summary.rows.len(),
        arg.alpha
    );

    println!("ANCOVA: {} {} vs {}", group.column, group.first, group.second);
    table::print_ancova_summary(&summary.rows, arg.alpha);

    if arg.full_tables {
        for ancova_table in &summary.tables {
            println!();
            table::print_ancova_table(ancova_table);
        }
    }

    if let Some(path) = &arg.output {
        Output::save_json(&summary.rows, path)?;
    }
    if let Some(path) = &arg.csv {
        util::save_csv(&summary.rows, path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_columns() {
        let row = AncovaSummaryRow {
            roi: "Medial".to_string(),
            f_value: 4.5,
            p_value: 0.04,
            p_fdr: 0.08,
            cohens_d: -0.5,
        };
        let csv = util::csv_string(&[row]).unwrap();
        assert_eq!(csv, "roi,F-value,p-value,p-fdr,Cohens d\nMedial,4.5,0.04,0.08,-0.5\n");
    }
}
