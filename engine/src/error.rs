use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Cannot access input file '{}': {source}", .path.display())]
    FileAccessError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("Numeric format error: {0}")]
    NumericFormatError(String),

    #[error("Date format error: {0}")]
    DateFormatError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),
}

impl EngineError {
    /// Prefixes a field-level error with the row and column it came from.
    /// Other variants are returned unchanged.
    pub fn at(self, line: usize, column: &str) -> Self {
        match self {
            EngineError::NumericFormatError(msg) => {
                EngineError::NumericFormatError(format!("line {}, column '{}': {}", line, column, msg))
            }
            EngineError::DateFormatError(msg) => {
                EngineError::DateFormatError(format!("line {}, column '{}': {}", line, column, msg))
            }
            other => other,
        }
    }
}
