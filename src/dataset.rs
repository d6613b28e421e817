/*!
 * Question-answer dataset model and CSV input/output.
 *
 * Rows are kept as ordered string cells so passthrough columns survive a
 * read/write cycle untouched. Reading is lenient: rows that cannot be
 * decoded are skipped and counted instead of aborting the load.
 *
 * All files are UTF-8. Input is decoded as UTF-8 (a leading byte order mark
 * is dropped) and every artifact is written as UTF-8 without one.
 */

use log::debug;
use std::io::{Read, Write};
use std::path::Path;

use crate::errors::DatasetError;

/// Identifier column name
pub const QA_ID_COLUMN: &str = "qa_id";

/// Question text column name
pub const QUESTION_COLUMN: &str = "question";

/// Answer text column name
pub const ANSWER_COLUMN: &str = "answer";

/// Column layout of a dataset file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    headers: Vec<String>,
    qa_id_index: usize,
    question_index: usize,
    answer_index: usize,
}

impl Schema {
    /// Build a schema from a header row, locating the required columns
    pub fn from_headers(headers: Vec<String>) -> Result<Self, DatasetError> {
        let qa_id_index = column_position(&headers, QA_ID_COLUMN)?;
        let question_index = column_position(&headers, QUESTION_COLUMN)?;
        let answer_index = column_position(&headers, ANSWER_COLUMN)?;

        Ok(Self {
            headers,
            qa_id_index,
            question_index,
            answer_index,
        })
    }

    /// Ordered column names
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.headers.len()
    }
}

fn column_position(headers: &[String], name: &'static str) -> Result<usize, DatasetError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or(DatasetError::MissingColumn(name))
}

/// One question-answer row with all of its cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaRecord {
    qa_id: i64,
    values: Vec<String>,
}

impl QaRecord {
    /// Build a record from cells laid out according to `schema`
    ///
    /// Returns `None` when the cell count differs from the schema width or
    /// when the `qa_id` cell is not an integer.
    pub fn from_values(schema: &Schema, values: Vec<String>) -> Option<Self> {
        if values.len() != schema.width() {
            return None;
        }
        let qa_id = parse_qa_id(values.get(schema.qa_id_index)?)?;
        Some(Self { qa_id, values })
    }

    pub fn qa_id(&self) -> i64 {
        self.qa_id
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn question<'a>(&'a self, schema: &Schema) -> &'a str {
        &self.values[schema.question_index]
    }

    pub fn answer<'a>(&'a self, schema: &Schema) -> &'a str {
        &self.values[schema.answer_index]
    }

    /// Copy of this record with question and answer replaced
    pub fn with_translation(&self, schema: &Schema, question: &str, answer: &str) -> Self {
        let mut values = self.values.clone();
        values[schema.question_index] = question.to_string();
        values[schema.answer_index] = answer.to_string();
        Self {
            qa_id: self.qa_id,
            values,
        }
    }
}

/// Parse an identifier cell, accepting integral floats such as `12.0`
pub fn parse_qa_id(cell: &str) -> Option<i64> {
    let cell = cell.trim();
    if let Ok(id) = cell.parse::<i64>() {
        return Some(id);
    }
    match cell.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 => Some(f as i64),
        _ => None,
    }
}

/// Header plus decodable rows of a CSV file, before any schema is applied
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub skipped: usize,
}

impl RawTable {
    /// Read a UTF-8 CSV stream, skipping rows that cannot be decoded as UTF-8 or
    /// that carry more fields than the header. Short rows are padded.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let h = if i == 0 { h.trim_start_matches('\u{feff}') } else { h };
                h.trim().to_string()
            })
            .collect();

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(DatasetError::MissingHeader);
        }

        let mut table = RawTable {
            headers,
            ..Default::default()
        };
        let width = table.headers.len();

        for result in reader.records() {
            match result {
                Ok(record) if record.len() <= width => {
                    let mut row: Vec<String> = record.iter().map(str::to_string).collect();
                    row.resize(width, String::new());
                    table.rows.push(row);
                }
                Ok(record) => {
                    debug!(
                        "Skipping row with {} fields (expected {})",
                        record.len(),
                        width
                    );
                    table.skipped += 1;
                }
                Err(e) => {
                    debug!("Skipping malformed row: {}", e);
                    table.skipped += 1;
                }
            }
        }

        Ok(table)
    }

    /// Read a CSV file
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Position of a column by name
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Re-map rows onto `schema` by column name
    ///
    /// Columns missing from this table become empty cells. Rows whose
    /// `qa_id` cannot be parsed are dropped.
    pub fn conform(self, schema: &Schema) -> Vec<QaRecord> {
        let mapping: Vec<Option<usize>> = schema
            .headers()
            .iter()
            .map(|name| self.column(name))
            .collect();

        self.rows
            .into_iter()
            .filter_map(|row| {
                let values = mapping
                    .iter()
                    .map(|index| index.map(|i| row[i].clone()).unwrap_or_default())
                    .collect();
                QaRecord::from_values(schema, values)
            })
            .collect()
    }
}

/// A dataset with a validated schema
#[derive(Debug, Clone)]
pub struct QaDataset {
    pub schema: Schema,
    pub records: Vec<QaRecord>,
    /// Rows dropped while reading
    pub skipped: usize,
}

impl QaDataset {
    /// Read a dataset from a CSV stream
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        Self::from_raw(RawTable::from_reader(reader)?)
    }

    /// Read a dataset from a CSV file
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        Self::from_raw(RawTable::read(path)?)
    }

    fn from_raw(raw: RawTable) -> Result<Self, DatasetError> {
        let schema = Schema::from_headers(raw.headers.clone())?;
        let total = raw.rows.len();
        let mut skipped = raw.skipped;
        let records = raw.conform(&schema);
        skipped += total - records.len();

        Ok(Self {
            schema,
            records,
            skipped,
        })
    }
}

/// Write a header and rows as CSV
pub fn write_records<W: Write>(
    writer: W,
    schema: &Schema,
    records: &[QaRecord],
) -> Result<(), DatasetError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(schema.headers())?;
    for record in records {
        writer.write_record(record.values())?;
    }
    writer.flush()?;
    Ok(())
}
