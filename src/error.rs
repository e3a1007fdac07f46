use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpnotesError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Lock file error: {0}")]
    LockFile(String),

    #[error("Path validation failed: {0}")]
    PathValidation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, UpnotesError>;
