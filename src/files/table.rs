use std::path::Path;

use csv::{ByteRecord, ReaderBuilder, WriterBuilder};

use super::FileError;
use super::lists::write_all_atomically;
use crate::batch::AnnotatedRecord;
use crate::pipeline::EmailRecord;

pub const STATUS_CODE_COLUMN: &str = "STATUS_CODE";
pub const STATUS_LABEL_COLUMN: &str = "STATUS_LIB";
pub const SUGGESTION_COLUMN: &str = "SUGGESTION";

/// Where the interesting columns live in the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvLayout {
    pub delimiter: u8,
    pub surname_column: String,
    pub given_name_column: String,
    pub email_column: String,
}

impl Default for CsvLayout {
    fn default() -> Self {
        Self {
            delimiter: b';',
            surname_column: "NOM".to_string(),
            given_name_column: "PRENOM".to_string(),
            email_column: "EMAIL".to_string(),
        }
    }
}

/// Input file kept verbatim next to the parsed records so the output can
/// reproduce every original column.
#[derive(Debug, Clone, Default)]
pub struct EmailTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub records: Vec<EmailRecord>,
}

pub fn read_records(path: &Path, layout: &CsvLayout) -> Result<EmailTable, FileError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(layout.delimiter)
        .from_path(path)
        .map_err(|err| FileError::csv(path, err))?;

    let headers = decode_record(reader.byte_headers().map_err(|err| FileError::csv(path, err))?);
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| FileError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })
    };
    let surname = column(&layout.surname_column)?;
    let given_name = column(&layout.given_name_column)?;
    let email = column(&layout.email_column)?;

    let mut table = EmailTable {
        headers: headers.clone(),
        ..EmailTable::default()
    };
    for result in reader.byte_records() {
        let row = decode_record(&result.map_err(|err| FileError::csv(path, err))?);
        let address = row[email].trim();
        table.records.push(EmailRecord::new(
            row[surname].as_str(),
            row[given_name].as_str(),
            (!address.is_empty()).then(|| address.to_string()),
        ));
        table.rows.push(row);
    }
    Ok(table)
}

/// Original columns followed by status code, label and suggestion.
pub fn write_annotated(
    path: &Path,
    delimiter: u8,
    table: &EmailTable,
    annotated: &[AnnotatedRecord],
) -> Result<(), FileError> {
    let mut wtr = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    let mut header: Vec<&str> = table.headers.iter().map(String::as_str).collect();
    header.extend([STATUS_CODE_COLUMN, STATUS_LABEL_COLUMN, SUGGESTION_COLUMN]);
    wtr.write_record(&header)
        .map_err(|err| FileError::csv(path, err))?;

    for (raw, row) in table.rows.iter().zip(annotated) {
        let code = row.status_code().to_string();
        let mut record: Vec<&str> = raw.iter().map(String::as_str).collect();
        record.extend([code.as_str(), row.status_label(), row.suggestion_or_empty()]);
        wtr.write_record(&record)
            .map_err(|err| FileError::csv(path, err))?;
    }

    let data = wtr
        .into_inner()
        .map_err(|err| FileError::write(path, err.into_error()))?;
    write_all_atomically(path, &data)
}

/// UTF-8 when valid, Latin-1 otherwise.
fn decode_record(record: &ByteRecord) -> Vec<String> {
    record.iter().map(decode_field).collect()
}

fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}
