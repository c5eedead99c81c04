use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid choice key: {0:?}")]
    InvalidChoiceKey(String),
    #[error("duplicate question id: {0}")]
    DuplicateId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
