use std::{
    fmt::Write as _,
    fs::{self, File},
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use thalvol_analysis::dataset::Dataset;

/// Destination of a JSON result: a file, or stdout for the path `-`.
#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: &Path) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)?;
        eprintln!("JSON written to {}", output.display_path());
        Ok(())
    }

    pub fn from_output_path(output_path: &Path) -> anyhow::Result<Self> {
        if output_path == Path::new("-") {
            Ok(Output::stdout())
        } else {
            Output::open(output_path.to_path_buf())
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Read a subject dataset from a JSON file
///
/// The file holds an array of objects mapping column names to numbers or
/// `null`.
pub fn read_dataset_file<P>(path: P) -> anyhow::Result<Dataset>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    eprintln!("Loading dataset from {}...", path.display());
    let dataset: Dataset = read_json_file("dataset", path)?;
    eprintln!(
        "Loaded {} rows, {} columns",
        dataset.n_rows(),
        dataset.n_columns()
    );
    Ok(dataset)
}

/// Rows that can be written as CSV records.
pub trait CsvRecord {
    const HEADER: &'static [&'static str];

    /// Field values in [`HEADER`](Self::HEADER) order.
    fn fields(&self) -> Vec<String>;
}

/// Formats a float for CSV; missing values become an empty field.
pub fn csv_float(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn csv_string<R>(rows: &[R]) -> anyhow::Result<String>
where
    R: CsvRecord,
{
    let mut content = String::new();
    let header = R::HEADER.iter().map(|name| csv_field(name)).collect::<Vec<_>>();
    writeln!(&mut content, "{}", header.join(",")).context("Failed to write CSV header")?;
    for (i, row) in rows.iter().enumerate() {
        let fields = row.fields().iter().map(|f| csv_field(f)).collect::<Vec<_>>();
        writeln!(&mut content, "{}", fields.join(","))
            .with_context(|| format!("Failed to write CSV row {i}"))?;
    }
    Ok(content)
}

pub fn save_csv<R>(rows: &[R], path: &Path) -> anyhow::Result<()>
where
    R: CsvRecord,
{
    let content = csv_string(rows)?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
    eprintln!("CSV written to {}", path.display());
    Ok(())
}
