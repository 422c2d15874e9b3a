use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("CSV Error")]
    CsvError(#[from] csv::Error),
    #[error("I/O Error")]
    IoError(#[from] io::Error),
    #[error("JSON Error")]
    JsonError(#[from] serde_json::Error),
    #[error("Could not move the finished fixture into place")]
    PersistError(#[from] tempfile::PersistError),
    #[error("Row count must not be negative, got {0}")]
    InvalidRowCount(i64),
}
