//! Column-oriented table of subject measurements
//!
//! A [`Dataset`] holds equally long `f64` columns addressed by name. Rows are
//! subjects. Missing measurements are stored as `NaN`; categorical variables
//! such as sex are expected to be numerically coded.
//!
//! # Serialization
//!
//! A dataset deserializes from a list of records, each mapping column names
//! to numbers or `null`:
//!
//! ```json
//! [
//!   { "subject": 1, "blsgroup": 1, "sex": 0, "Age_at_scan": 26.4, "Medial": 1021.5 },
//!   { "subject": 2, "blsgroup": 2, "sex": 1, "Age_at_scan": 27.1, "Medial": null }
//! ]
//! ```
//!
//! Keys absent from a record and `null` values both become `NaN`.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::AnalysisError;

/// One subject: column name to value, `None` when missing.
pub type Record = BTreeMap<String, Option<f64>>;

/// An in-memory table of named numeric columns.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Vec<Record>")]
pub struct Dataset {
    columns: BTreeMap<String, Vec<f64>>,
    n_rows: usize,
}

impl Dataset {
    /// Builds a dataset from named columns of equal length.
    ///
    /// ```
    /// # use thalvol_analysis::dataset::Dataset;
    /// let dataset = Dataset::from_columns([
    ///     ("blsgroup", vec![1.0, 2.0]),
    ///     ("Medial", vec![10.0, f64::NAN]),
    /// ])
    /// .unwrap();
    /// assert_eq!(dataset.n_rows(), 2);
    /// assert_eq!(dataset.column("blsgroup").unwrap(), &[1.0, 2.0]);
    /// assert!(dataset.column("Lateral").is_err());
    /// ```
    pub fn from_columns<I, S>(columns: I) -> Result<Self, AnalysisError>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut map = BTreeMap::new();
        let mut n_rows = None;
        for (name, values) in columns {
            let name = name.into();
            let expected = *n_rows.get_or_insert(values.len());
            if values.len() != expected {
                return Err(AnalysisError::ColumnLength {
                    name,
                    len: values.len(),
                    expected,
                });
            }
            if map.contains_key(&name) {
                return Err(AnalysisError::DuplicateColumn { name });
            }
            map.insert(name, values);
        }
        Ok(Self {
            columns: map,
            n_rows: n_rows.unwrap_or(0),
        })
    }

    /// Builds a dataset from subject records.
    ///
    /// The column set is the union of all record keys.
    #[must_use]
    pub fn from_records(records: &[Record]) -> Self {
        let mut columns = BTreeMap::<String, Vec<f64>>::new();
        for name in records.iter().flat_map(BTreeMap::keys) {
            columns.entry(name.clone()).or_default();
        }
        for record in records {
            for (name, values) in &mut columns {
                let value = record.get(name).copied().flatten();
                values.push(value.unwrap_or(f64::NAN));
            }
        }
        Self {
            columns,
            n_rows: records.len(),
        }
    }

    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    #[must_use]
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in ascending order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Result<&[f64], AnalysisError> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| AnalysisError::MissingColumn {
                name: name.to_string(),
            })
    }

    /// Restricts the dataset to `names` and drops every row with a `NaN` in
    /// any of them (listwise deletion).
    ///
    /// Repeated names are kept once.
    ///
    /// ```
    /// # use thalvol_analysis::dataset::Dataset;
    /// let dataset = Dataset::from_columns([
    ///     ("a", vec![1.0, f64::NAN, 3.0]),
    ///     ("b", vec![4.0, 5.0, 6.0]),
    ///     ("c", vec![f64::NAN, f64::NAN, f64::NAN]),
    /// ])
    /// .unwrap();
    /// let complete = dataset.complete_cases(&["a", "b"]).unwrap();
    /// assert_eq!(complete.n_rows(), 2);
    /// assert_eq!(complete.column("b").unwrap(), &[4.0, 6.0]);
    /// assert!(complete.column("c").is_err());
    /// ```
    pub fn complete_cases(&self, names: &[&str]) -> Result<Self, AnalysisError> {
        let mut selected = BTreeMap::new();
        for &name in names {
            selected.insert(name, self.column(name)?);
        }
        let keep = (0..self.n_rows)
            .filter(|&row| selected.values().all(|values| !values[row].is_nan()))
            .collect::<Vec<_>>();

        let columns = selected
            .into_iter()
            .map(|(name, values)| {
                let values = keep.iter().map(|&row| values[row]).collect();
                (name.to_string(), values)
            })
            .collect();
        Ok(Self {
            columns,
            n_rows: keep.len(),
        })
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self::from_records(&records)
    }
}
