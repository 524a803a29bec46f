use thiserror::Error;

/// Every way a duffel run can fail.
///
/// Only `Validation` is reported before any work starts; the rest abort the
/// run at whichever stage produced them.
#[derive(Error, Debug)]
pub enum DuffelError {
    #[error("invalid configuration: {0}")]
    Validation(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid key material: {0}")]
    Format(String),

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, DuffelError>;
