pub mod dates;
pub mod domain;
pub mod join;
pub mod names;
pub mod standardize;
pub mod table;

pub use domain::{ColumnSlot, DateColumns, Dataset, DatasetRole, Record};
pub use join::{merge, MergeOutcome, MergeSummary};
pub use standardize::{standardize, Schema};
pub use table::{write_dataset, RawTable};

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug)]
pub enum LinkageError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Csv(csv::Error),
    MissingColumn {
        role: DatasetRole,
        column: String,
    },
    RaggedRow {
        role: DatasetRole,
        line: u64,
        expected: usize,
        found: usize,
    },
}

impl std::fmt::Display for LinkageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkageError::Io { path, source } => {
                write!(f, "failed to access '{}': {}", path.display(), source)
            }
            LinkageError::Csv(err) => write!(f, "invalid CSV data: {}", err),
            LinkageError::MissingColumn { role, column } => {
                write!(f, "{} file must have a '{}' column", role, column)
            }
            LinkageError::RaggedRow {
                role,
                line,
                expected,
                found,
            } => write!(
                f,
                "{} file line {} has {} fields, expected at most {}",
                role, line, found, expected
            ),
        }
    }
}

impl std::error::Error for LinkageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinkageError::Io { source, .. } => Some(source),
            LinkageError::Csv(err) => Some(err),
            LinkageError::MissingColumn { .. } | LinkageError::RaggedRow { .. } => None,
        }
    }
}

impl From<csv::Error> for LinkageError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl LinkageError {
    /// Schema problems the operator fixes by editing the input file.
    pub fn is_configuration(&self) -> bool {
        matches!(self, LinkageError::MissingColumn { .. })
    }
}

/// Reads and standardizes a single CSV export.
pub fn load_dataset<P: AsRef<Path>>(
    path: P,
    role: DatasetRole,
    date_column: &str,
) -> Result<Dataset, LinkageError> {
    let table = read_path(path.as_ref(), role)?;
    standardize(table, role, date_column)
}

pub fn load_dataset_from_reader<R: Read>(
    reader: R,
    role: DatasetRole,
    date_column: &str,
) -> Result<Dataset, LinkageError> {
    let table = table::read_table(reader, role)?;
    standardize(table, role, date_column)
}

fn read_path(path: &Path, role: DatasetRole) -> Result<RawTable, LinkageError> {
    let file = File::open(path).map_err(|source| LinkageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    table::read_table(file, role)
}

/// One merge run: two input exports and the file the merged rows go to.
#[derive(Debug, Clone)]
pub struct MergeJob {
    pub primary: PathBuf,
    pub secondary: PathBuf,
    pub output: PathBuf,
    pub date_columns: DateColumns,
}

impl MergeJob {
    pub fn new(
        primary: impl Into<PathBuf>,
        secondary: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
            output: output.into(),
            date_columns: DateColumns::default(),
        }
    }

    pub fn with_date_columns(mut self, date_columns: DateColumns) -> Self {
        self.date_columns = date_columns;
        self
    }

    /// Loads both inputs. Both header rows are validated before any row is
    /// standardized.
    pub fn load(&self) -> Result<(Dataset, Dataset), LinkageError> {
        let primary_table = read_path(&self.primary, DatasetRole::Primary)?;
        let secondary_table = read_path(&self.secondary, DatasetRole::Secondary)?;

        let primary_schema = Schema::resolve(
            &primary_table.headers,
            DatasetRole::Primary,
            self.date_columns.for_role(DatasetRole::Primary),
        )?;
        let secondary_schema = Schema::resolve(
            &secondary_table.headers,
            DatasetRole::Secondary,
            self.date_columns.for_role(DatasetRole::Secondary),
        )?;

        Ok((
            primary_schema.apply(primary_table),
            secondary_schema.apply(secondary_table),
        ))
    }

    /// Runs the merge and writes the output file. Nothing is written unless
    /// every step before it succeeded.
    pub fn run(&self) -> Result<MergeSummary, LinkageError> {
        let (primary, secondary) = self.load()?;
        info!(
            primary_rows = primary.len(),
            secondary_rows = secondary.len(),
            "inputs standardized"
        );

        let MergeOutcome { dataset, summary } = merge(&primary, &secondary);

        let mut rendered = Vec::new();
        write_dataset(&dataset, &mut rendered)?;
        std::fs::write(&self.output, rendered).map_err(|source| LinkageError::Io {
            path: self.output.clone(),
            source,
        })?;

        info!(
            output = %self.output.display(),
            matched_rows = summary.matched_rows,
            unmatched_rows = summary.unmatched_rows,
            "merged file written"
        );
        Ok(summary)
    }
}
