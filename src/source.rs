//! Reads sale records from delimited text.
//!
//! Columns are positional: date, salesperson, customer name, car make, car
//! model, car year, sale price, commission rate, commission earned. Extra
//! trailing columns are ignored.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::str::FromStr;

use csv::StringRecord;
use tracing::debug;

use crate::error::{Result, SourceError};
use crate::record::SaleRecord;

pub const SALE_RECORD_FIELDS: usize = 9;

/// Iterator of [`SaleRecord`]s over a CSV input.
pub struct RecordSource<R> {
    reader: csv::Reader<R>,
    row: StringRecord,
}

impl RecordSource<BufReader<File>> {
    /// Open `path`, skipping its header line.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_header(path, true)
    }

    pub fn open_with_header(path: impl AsRef<Path>, has_header: bool) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        debug!(path = %path.display(), has_header, "Opened record source");
        Ok(Self::with_header(BufReader::new(file), has_header))
    }
}

impl<R: io::Read> RecordSource<R> {
    /// Wrap `reader`. The first line is treated as a header.
    pub fn from_reader(reader: R) -> Self {
        Self::with_header(reader, true)
    }

    pub fn with_header(reader: R, has_header: bool) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(has_header)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        Self {
            reader,
            row: StringRecord::new(),
        }
    }

    /// Collect every record, failing on the first bad row.
    pub fn read_all(self) -> Result<Vec<SaleRecord>> {
        self.collect()
    }

    fn next_record(&mut self) -> Result<Option<SaleRecord>> {
        let more = self.reader.read_record(&mut self.row).map_err(|source| {
            let line = source.position().map(|p| p.line()).unwrap_or(0);
            SourceError::Csv { line, source }
        })?;
        if !more {
            return Ok(None);
        }
        let line = self.row.position().map(|p| p.line()).unwrap_or(0);
        parse_row(&self.row, line).map(Some)
    }
}

impl<R: io::Read> Iterator for RecordSource<R> {
    type Item = Result<SaleRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

fn parse_row(row: &StringRecord, line: u64) -> Result<SaleRecord> {
    if row.len() < SALE_RECORD_FIELDS {
        return Err(SourceError::MissingColumns {
            line,
            expected: SALE_RECORD_FIELDS,
            found: row.len(),
        });
    }

    Ok(SaleRecord::new(
        &row[0],
        &row[1],
        &row[2],
        &row[3],
        &row[4],
        parse_field(row, 5, "car year", line)?,
        parse_field(row, 6, "sale price", line)?,
        parse_field(row, 7, "commission rate", line)?,
        parse_field(row, 8, "commission earned", line)?,
    ))
}

fn parse_field<T: FromStr>(
    row: &StringRecord,
    idx: usize,
    field: &'static str,
    line: u64,
) -> Result<T> {
    let value = &row[idx];
    value.parse().map_err(|_| SourceError::Field {
        line,
        field,
        value: value.to_string(),
    })
}
