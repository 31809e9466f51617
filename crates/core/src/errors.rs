use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimeError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type TimeResult<T> = Result<T, TimeError>;
