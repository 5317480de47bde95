//! Partitioning subjects by the clinical group indicator

use serde::{Deserialize, Serialize};

use crate::{AnalysisError, dataset::Dataset};

/// Default name of the group-indicator column.
pub const DEFAULT_GROUP_COLUMN: &str = "blsgroup";

/// Which column holds the group indicator and which two labels are compared.
///
/// Effect sizes are signed as `first - second`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSpec {
    pub column: String,
    pub first: f64,
    pub second: f64,
}

impl Default for GroupSpec {
    fn default() -> Self {
        Self {
            column: DEFAULT_GROUP_COLUMN.to_string(),
            first: 1.0,
            second: 2.0,
        }
    }
}

impl GroupSpec {
    #[must_use]
    pub fn new(column: impl Into<String>, first: f64, second: f64) -> Self {
        Self {
            column: column.into(),
            first,
            second,
        }
    }

    /// The same grouping with the two labels exchanged.
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self {
            column: self.column.clone(),
            first: self.second,
            second: self.first,
        }
    }

    /// Splits a variable into the values of the first and second group.
    ///
    /// Rows belonging to neither label, including rows with a missing group,
    /// are ignored. Missing values of the variable are kept as `NaN`.
    ///
    /// ```
    /// # use thalvol_analysis::{dataset::Dataset, group::GroupSpec};
    /// let dataset = Dataset::from_columns([
    ///     ("blsgroup", vec![1.0, 2.0, 1.0, 3.0]),
    ///     ("Medial", vec![10.0, 20.0, 11.0, 30.0]),
    /// ])
    /// .unwrap();
    /// let (first, second) = GroupSpec::default().split(&dataset, "Medial").unwrap();
    /// assert_eq!(first, vec![10.0, 11.0]);
    /// assert_eq!(second, vec![20.0]);
    /// ```
    #[expect(clippy::float_cmp)]
    pub fn split(
        &self,
        dataset: &Dataset,
        variable: &str,
    ) -> Result<(Vec<f64>, Vec<f64>), AnalysisError> {
        let groups = dataset.column(&self.column)?;
        let values = dataset.column(variable)?;

        let mut first = vec![];
        let mut second = vec![];
        for (&group, &value) in groups.iter().zip(values) {
            if group == self.first {
                first.push(value);
            } else if group == self.second {
                second.push(value);
            }
        }
        Ok((first, second))
    }
}
