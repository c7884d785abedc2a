use super::dates::normalize_date;
use super::domain::{ColumnSlot, Dataset, DatasetRole, Record, DATE, FIRST_NAME, LAST_NAME};
use super::names::normalize_name;
use super::table::RawTable;
use super::LinkageError;
use tracing::debug;

const FIRST_NAME_ALIASES: &[&str] = &[FIRST_NAME, "Patient's first name"];
const LAST_NAME_ALIASES: &[&str] = &[LAST_NAME, "Patient's last name"];

/// Resolved column positions for one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    role: DatasetRole,
    layout: Vec<ColumnSlot>,
    extra_columns: Vec<String>,
    first_name: usize,
    last_name: usize,
    date: usize,
    extra_positions: Vec<usize>,
}

impl Schema {
    /// Maps header aliases onto the canonical name and date columns.
    ///
    /// Alias headers are renamed to their canonical form; the first one claims
    /// the slot and any later duplicate stays an ordinary column under the
    /// canonical name. Fails when the role's date column or either name column
    /// is absent.
    pub fn resolve(
        headers: &[String],
        role: DatasetRole,
        date_column: &str,
    ) -> Result<Self, LinkageError> {
        let mut layout = Vec::with_capacity(headers.len());
        let mut extra_columns = Vec::new();
        let mut extra_positions = Vec::new();
        let mut first_name = None;
        let mut last_name = None;
        let mut date = None;

        for (position, header) in headers.iter().enumerate() {
            let header = header.as_str();
            let canonical = if FIRST_NAME_ALIASES.contains(&header) {
                if first_name.is_none() {
                    first_name = Some(position);
                    layout.push(ColumnSlot::FirstName);
                    continue;
                }
                FIRST_NAME
            } else if LAST_NAME_ALIASES.contains(&header) {
                if last_name.is_none() {
                    last_name = Some(position);
                    layout.push(ColumnSlot::LastName);
                    continue;
                }
                LAST_NAME
            } else if header == date_column && date.is_none() {
                date = Some(position);
                layout.push(ColumnSlot::Date);
                continue;
            } else {
                header
            };

            layout.push(ColumnSlot::Extra(extra_columns.len()));
            extra_columns.push(canonical.to_string());
            extra_positions.push(position);
        }

        let missing = |column: &str| LinkageError::MissingColumn {
            role,
            column: column.to_string(),
        };
        let date = date.ok_or_else(|| missing(date_column))?;
        let first_name = first_name.ok_or_else(|| missing(FIRST_NAME))?;
        let last_name = last_name.ok_or_else(|| missing(LAST_NAME))?;

        Ok(Self {
            role,
            layout,
            extra_columns,
            first_name,
            last_name,
            date,
            extra_positions,
        })
    }

    pub fn role(&self) -> DatasetRole {
        self.role
    }

    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    /// Builds the dataset: names lowercased and trimmed, dates normalized,
    /// every other column carried through untouched.
    pub fn apply(&self, table: RawTable) -> Dataset {
        let mut unparsed_dates = 0;
        let mut records = Vec::with_capacity(table.rows.len());

        for (index, mut cells) in table.rows.into_iter().enumerate() {
            let raw_date = cells[self.date].as_deref();
            let date = normalize_date(raw_date);
            if date.is_none() && raw_date.is_some() {
                unparsed_dates += 1;
                debug!(
                    role = %self.role,
                    row = index + 1,
                    column = DATE,
                    "date not recognized; row falls back to exact name matching"
                );
            }

            let first_name = normalize_name(cells[self.first_name].as_deref());
            let last_name = normalize_name(cells[self.last_name].as_deref());
            let extras = self
                .extra_positions
                .iter()
                .map(|&position| cells[position].take())
                .collect();

            records.push(Record {
                first_name,
                last_name,
                date,
                extras,
            });
        }

        Dataset::new(
            self.layout.clone(),
            self.extra_columns.clone(),
            records,
            unparsed_dates,
        )
    }
}

/// Resolves the schema and standardizes every row in one step.
pub fn standardize(
    table: RawTable,
    role: DatasetRole,
    date_column: &str,
) -> Result<Dataset, LinkageError> {
    let schema = Schema::resolve(&table.headers, role, date_column)?;
    Ok(schema.apply(table))
}
