use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Sink request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Source file error: {message}")]
    SourceError { message: String },

    #[error("Expected column '{column}' missing from source file")]
    SchemaError { column: String },

    #[error("Sink rejected record (status {status}): {message}")]
    SinkError { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, ImportError>;
