use clap::{Args, Parser, Subcommand};
use thalvol_analysis::{
    association::DEFAULT_COVARIATES,
    group::{DEFAULT_GROUP_COLUMN, GroupSpec},
};

use self::{ancova::AncovaArg, association::AssociationArg, effect_size::EffectSizeArg};

mod ancova;
mod association;
mod effect_size;
mod table;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Compare the groups on each variable with ANCOVA and FDR correction
    Ancova(#[clap(flatten)] AncovaArg),
    /// Test covariate-adjusted associations between predictors and an outcome
    Association(#[clap(flatten)] AssociationArg),
    /// Compute Cohen's d between the groups for each variable
    EffectSize(#[clap(flatten)] EffectSizeArg),
}

/// Group column and the two labels to compare
#[derive(Debug, Clone, Args)]
pub(crate) struct GroupArg {
    /// Name of the group-indicator column
    #[arg(long, default_value = DEFAULT_GROUP_COLUMN)]
    pub group_column: String,

    /// Label of the first group (effect sizes are first minus second)
    #[arg(long, default_value_t = 1.0)]
    pub first_group: f64,

    /// Label of the second group
    #[arg(long, default_value_t = 2.0)]
    pub second_group: f64,
}

impl GroupArg {
    pub fn spec(&self) -> GroupSpec {
        GroupSpec::new(&self.group_column, self.first_group, self.second_group)
    }
}

#[derive(Debug, Clone, Args)]
pub(crate) struct CovariateArg {
    /// Covariates to adjust for (comma-separated, an empty string for none)
    #[arg(long, value_delimiter = ',', default_values = DEFAULT_COVARIATES)]
    pub covariates: Vec<String>,
}

impl CovariateArg {
    pub fn names(&self) -> Vec<&str> {
        self.covariates
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Ancova(arg) => ancova::run(&arg)?,
        Mode::Association(arg) => association::run(&arg)?,
        Mode::EffectSize(arg) => effect_size::run(&arg)?,
    }
    Ok(())
}
