use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ModelError {
    pub fn invalid(msg: impl Into<String>) -> Self { Self::Validation(msg.into()) }
}
