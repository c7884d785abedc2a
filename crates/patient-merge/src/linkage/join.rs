use super::domain::{ColumnSlot, Dataset, Record, DATE, FIRST_NAME, LAST_NAME};
use super::names::{names_overlap, title_case};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

const BASE_COLUMNS: [&str; 3] = [FIRST_NAME, LAST_NAME, DATE];
const VALUE_SEPARATOR: char = ';';
const JOINED_SEPARATOR: &str = "; ";

/// Counts describing how a merge went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    pub primary_rows: usize,
    pub secondary_rows: usize,
    pub matched_rows: usize,
    pub unmatched_rows: usize,
    pub name_only_rows: usize,
    pub extra_columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub dataset: Dataset,
    pub summary: MergeSummary,
}

/// Enriches every primary record with the extra columns of the secondary
/// records it matches. The output always has exactly one record per primary
/// record, with names title-cased for display.
pub fn merge(primary: &Dataset, secondary: &Dataset) -> MergeOutcome {
    let contributed: Vec<(usize, &str)> = secondary
        .extra_columns()
        .iter()
        .enumerate()
        .filter(|(_, name)| !BASE_COLUMNS.contains(&name.as_str()))
        .map(|(index, name)| (index, name.as_str()))
        .collect();

    let mut layout = primary.layout().to_vec();
    let mut extra_columns = primary.extra_columns().to_vec();
    let mut targets = Vec::with_capacity(contributed.len());
    for &(_, name) in &contributed {
        let target = match extra_columns.iter().position(|column| column == name) {
            Some(existing) => existing,
            None => {
                extra_columns.push(name.to_string());
                layout.push(ColumnSlot::Extra(extra_columns.len() - 1));
                extra_columns.len() - 1
            }
        };
        targets.push(target);
    }

    let mut matched_rows = 0;
    let mut name_only_rows = 0;
    let mut records = Vec::with_capacity(primary.len());

    for (index, record) in primary.records().iter().enumerate() {
        if record.date.is_none() {
            name_only_rows += 1;
        }

        let matches: Vec<&Record> = secondary
            .records()
            .iter()
            .filter(|candidate| is_match(record, candidate))
            .collect();
        if !matches.is_empty() {
            matched_rows += 1;
        }
        debug!(row = index + 1, matches = matches.len(), "primary record linked");

        let mut extras = record.extras.clone();
        extras.resize(extra_columns.len(), None);
        for (&(source, _), &target) in contributed.iter().zip(&targets) {
            let values = matches.iter().filter_map(|candidate| candidate.extra(source));
            extras[target] = Some(aggregate_values(values));
        }

        records.push(Record {
            first_name: title_case(&record.first_name),
            last_name: title_case(&record.last_name),
            date: record.date,
            extras,
        });
    }

    let summary = MergeSummary {
        primary_rows: primary.len(),
        secondary_rows: secondary.len(),
        matched_rows,
        unmatched_rows: primary.len() - matched_rows,
        name_only_rows,
        extra_columns: contributed.iter().map(|(_, name)| name.to_string()).collect(),
    };

    MergeOutcome {
        dataset: Dataset::new(layout, extra_columns, records, primary.unparsed_dates()),
        summary,
    }
}

/// Dated primary records match on equal dates plus overlapping first and last
/// names; undated ones need exact (lowercased) name equality.
pub fn is_match(primary: &Record, candidate: &Record) -> bool {
    match primary.date {
        Some(date) => {
            candidate.date == Some(date)
                && names_overlap(&primary.first_name, &candidate.first_name)
                && names_overlap(&primary.last_name, &candidate.last_name)
        }
        None => {
            candidate.first_name == primary.first_name && candidate.last_name == primary.last_name
        }
    }
}

/// Splits each value on `;`, trims, dedupes and sorts the pieces, then joins
/// them back with `"; "`. Empty input yields an empty string.
pub fn aggregate_values<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let pieces: BTreeSet<&str> = values
        .into_iter()
        .flat_map(|value| value.split(VALUE_SEPARATOR))
        .map(str::trim)
        .collect();

    pieces.into_iter().collect::<Vec<_>>().join(JOINED_SEPARATOR)
}
