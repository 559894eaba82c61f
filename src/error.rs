use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoadError>;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] postgres::Error),

    #[error("Database unreachable after {attempts} attempts: {source}")]
    ConnectionExhausted {
        attempts: u32,
        source: postgres::Error,
    },

    #[error("Input directory not found: {}", .0.display())]
    MissingInputDir(PathBuf),

    #[error("Input file not found: {}", .0.display())]
    MissingInputFile(PathBuf),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}
