use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid file pattern: {0}")]
    PatternError(#[from] glob::PatternError),

    #[error("Missing column '{column}' in {file}")]
    MissingColumn { column: String, file: String },
}

pub type Result<T> = std::result::Result<T, CollectorError>;
