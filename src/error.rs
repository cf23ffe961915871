use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("delay must be a finite, non-negative number of seconds (got {0})")]
    InvalidDelay(f64),

    #[error("failed to write cursor event: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode cursor event: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
