//! Association test command

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use thalvol_analysis::association::{self, AssociationRow};

use crate::{
    command::{CovariateArg, table},
    util::{self, CsvRecord, Output},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct AssociationArg {
    /// Path to the dataset JSON file
    pub data: PathBuf,

    /// Outcome variable (e.g. a nucleus volume)
    #[arg(long)]
    pub outcome: String,

    /// Predictor variables, each tested in its own model (comma-separated)
    #[arg(long, value_delimiter = ',', required = true)]
    pub predictors: Vec<String>,

    #[command(flatten)]
    pub covariates: CovariateArg,

    /// Write the result rows as JSON to this path (`-` for stdout)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Write the result rows as CSV to this path
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

impl CsvRecord for AssociationRow {
    const HEADER: &'static [&'static str] =
        &["variable", "nucleus", "Tstatistic", "coef", "R2", "pvalue"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.variable.clone(),
            self.nucleus.clone(),
            util::csv_float(self.t_statistic),
            util::csv_float(self.coef),
            util::csv_float(self.r_squared),
            util::csv_float(self.pvalue),
        ]
    }
}

pub(crate) fn run(arg: &AssociationArg) -> anyhow::Result<()> {
    let dataset = util::read_dataset_file(&arg.data)?;
    let covariates = arg.covariates.names();

    let mut rows = Vec::with_capacity(arg.predictors.len());
    for predictor in &arg.predictors {
        eprintln!("Fitting {} ~ {predictor}...", arg.outcome);
        let row =
            association::association_with_covariates(&dataset, &arg.outcome, predictor, &covariates)
                .with_context(|| {
                    format!(
                        "Association test of {predictor} with {} failed",
                        arg.outcome
                    )
                })?;
        rows.push(row);
    }

    println!("Association with {}", arg.outcome);
    table::print_associations(&rows);

    if let Some(path) = &arg.output {
        Output::save_json(&rows, path)?;
    }
    if let Some(path) = &arg.csv {
        util::save_csv(&rows, path)?;
    }

    Ok(())
}
