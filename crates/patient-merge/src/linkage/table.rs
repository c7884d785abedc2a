use super::domain::{Dataset, DatasetRole};
use super::LinkageError;
use std::io::{Read, Write};

// Cells spreadsheet and dataframe exports use for "no value".
const MISSING_VALUE_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A CSV file as read, before any column is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

pub(crate) fn read_table<R: Read>(reader: R, role: DatasetRole) -> Result<RawTable, LinkageError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|header| header.replace('\u{feff}', ""))
        .collect();
    let mut rows = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        if record.len() > headers.len() {
            return Err(LinkageError::RaggedRow {
                role,
                line: record.position().map(|pos| pos.line()).unwrap_or_default(),
                expected: headers.len(),
                found: record.len(),
            });
        }

        let mut cells: Vec<Option<String>> = record.iter().map(cell_value).collect();
        cells.resize(headers.len(), None);
        rows.push(cells);
    }

    Ok(RawTable { headers, rows })
}

fn cell_value(raw: &str) -> Option<String> {
    if MISSING_VALUE_TOKENS.contains(&raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Writes the header row followed by every record, `\n` terminated.
pub fn write_dataset<W: Write>(dataset: &Dataset, writer: W) -> Result<(), LinkageError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(dataset.headers())?;
    for record in dataset.records() {
        csv_writer.write_record(dataset.cells(record))?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;

    Ok(())
}
