use super::dates::format_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const FIRST_NAME: &str = "First Name";
pub const LAST_NAME: &str = "Last Name";
pub const DATE: &str = "Date";

pub const PRIMARY_DATE_COLUMN: &str = "Date of appointment";
pub const SECONDARY_DATE_COLUMN: &str = "Last Visit in Neuro";

/// Which side of the merge a dataset plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetRole {
    /// Appointment export; its rows define the output.
    Primary,
    /// Visit export contributing extra columns.
    Secondary,
}

impl DatasetRole {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

impl fmt::Display for DatasetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Source column holding the date for each role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateColumns {
    pub primary: String,
    pub secondary: String,
}

impl DateColumns {
    pub fn for_role(&self, role: DatasetRole) -> &str {
        match role {
            DatasetRole::Primary => &self.primary,
            DatasetRole::Secondary => &self.secondary,
        }
    }
}

impl Default for DateColumns {
    fn default() -> Self {
        Self {
            primary: PRIMARY_DATE_COLUMN.to_string(),
            secondary: SECONDARY_DATE_COLUMN.to_string(),
        }
    }
}

/// Position of a column in a dataset's header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSlot {
    FirstName,
    LastName,
    Date,
    /// Index into [`Dataset::extra_columns`].
    Extra(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub first_name: String,
    pub last_name: String,
    pub date: Option<NaiveDate>,
    pub extras: Vec<Option<String>>,
}

impl Record {
    pub fn extra(&self, index: usize) -> Option<&str> {
        self.extras.get(index).and_then(|value| value.as_deref())
    }
}

/// Ordered records sharing one schema. The layout keeps the source column
/// order so the merged file reads like the primary export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    layout: Vec<ColumnSlot>,
    extra_columns: Vec<String>,
    records: Vec<Record>,
    unparsed_dates: usize,
}

impl Dataset {
    pub(crate) fn new(
        layout: Vec<ColumnSlot>,
        extra_columns: Vec<String>,
        records: Vec<Record>,
        unparsed_dates: usize,
    ) -> Self {
        Self {
            layout,
            extra_columns,
            records,
            unparsed_dates,
        }
    }

    pub fn layout(&self) -> &[ColumnSlot] {
        &self.layout
    }

    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows whose date cell had text that could not be normalized.
    pub fn unparsed_dates(&self) -> usize {
        self.unparsed_dates
    }

    pub fn headers(&self) -> Vec<&str> {
        self.layout
            .iter()
            .map(|slot| match slot {
                ColumnSlot::FirstName => FIRST_NAME,
                ColumnSlot::LastName => LAST_NAME,
                ColumnSlot::Date => DATE,
                ColumnSlot::Extra(index) => self.extra_columns[*index].as_str(),
            })
            .collect()
    }

    /// Renders one record in header order; nulls become empty cells.
    pub fn cells(&self, record: &Record) -> Vec<String> {
        self.layout
            .iter()
            .map(|slot| match slot {
                ColumnSlot::FirstName => record.first_name.clone(),
                ColumnSlot::LastName => record.last_name.clone(),
                ColumnSlot::Date => record.date.map(format_date).unwrap_or_default(),
                ColumnSlot::Extra(index) => record.extra(*index).unwrap_or_default().to_string(),
            })
            .collect()
    }
}
