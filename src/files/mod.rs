//! Persisted lists (allowlist, disposable domains, user agents) and the
//! annotated CSV batch file.

mod error;
mod lists;
mod table;

pub use error::FileError;
pub use lists::{read_list, write_list};
pub use table::{
    CsvLayout, EmailTable, STATUS_CODE_COLUMN, STATUS_LABEL_COLUMN, SUGGESTION_COLUMN,
    read_records, write_annotated,
};
