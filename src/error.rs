use thiserror::Error;

/// Reasons a single conversion produced no CSV output.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Error parsing JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Unexpected format of data (expected an array, got {found})")]
    UnexpectedTopLevelShape { found: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
