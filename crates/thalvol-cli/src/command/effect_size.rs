use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use thalvol_analysis::effect;

use crate::{
    command::{GroupArg, table},
    util,
};

#[derive(Debug, Clone, Args)]
pub(crate) struct EffectSizeArg {
    /// Path to the dataset JSON file
    pub data: PathBuf,

    /// Variables to compare between the groups (comma-separated)
    #[arg(long, value_delimiter = ',', required = true)]
    pub variables: Vec<String>,

    #[command(flatten)]
    pub group: GroupArg,
}

pub(crate) fn run(arg: &EffectSizeArg) -> anyhow::Result<()> {
    let dataset = util::read_dataset_file(&arg.data)?;
    let group = arg.group.spec();

    let rows = arg
        .variables
        .iter()
        .map(|variable| {
            let effect = effect::calculate_cohens_d(&dataset, &group, variable)
                .with_context(|| format!("Failed to compute Cohen's d of {variable}"))?;
            Ok((variable.clone(), effect))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    println!(
        "Cohen's d: {} {} vs {}",
        group.column, group.first, group.second
    );
    table::print_effect_sizes(&rows, group.first, group.second);

    Ok(())
}
