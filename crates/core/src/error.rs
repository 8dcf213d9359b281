#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to fetch doctor data: {0}")]
    SourceFetch(reqwest::Error),
    #[error("doctor data source answered with HTTP {status}")]
    SourceStatus { status: u16 },
    #[error("failed to read doctor data file: {0}")]
    SourceRead(std::io::Error),
    #[error("doctor data schema mismatch at {path}: {message}")]
    Deserialization { path: String, message: String },
    #[error("invalid doctor record {id}: {reason}")]
    InvalidRecord { id: String, reason: String },
}

pub type DirectoryResult<T> = std::result::Result<T, DirectoryError>;
