mod normalizer;
mod parser;

pub(crate) use normalizer::sibling_base_name;

use crate::analysis::domain::RawRow;
use std::io::Read;
use std::path::Path;

/// Failures while turning a bulk sheet into normalized rows. Any variant
/// aborts the whole run; nothing downstream is computed from partial data.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("failed to read bulk sheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("bulk sheet is not parsable as delimited data: {0}")]
    Csv(#[from] csv::Error),
    #[error("bulk sheet is missing required column '{column}'")]
    MalformedInput { column: &'static str },
    #[error("row {row}: column '{column}' holds non-numeric value '{value}'")]
    InvalidValue {
        row: u64,
        column: &'static str,
        value: String,
    },
}

pub struct BulkSheetImporter;

impl BulkSheetImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RawRow>, SheetError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RawRow>, SheetError> {
        parser::parse_records(reader)
    }

    pub fn required_columns() -> &'static [&'static str] {
        parser::REQUIRED_COLUMNS
    }
}
