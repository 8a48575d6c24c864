use thiserror::Error;

#[derive(Debug, Error)]
pub enum WellbeingError {
    #[error("configuration error: {0}")]
    Config(String),

    /// Raw driver message; surfaced to API callers unchanged.
    #[error("{0}")]
    Database(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    StoreUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl WellbeingError {
    pub fn store_not_ready() -> Self {
        Self::StoreUnavailable("DB not initialized".to_string())
    }
}

pub type WellbeingResult<T> = Result<T, WellbeingError>;
