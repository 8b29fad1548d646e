use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("duplicate id: {0}")]
    Duplicate(String),
    #[error("stored payload is not valid JSON: {0}")]
    Decode(String),
    #[error("database error: {0}")]
    Db(String),
}
