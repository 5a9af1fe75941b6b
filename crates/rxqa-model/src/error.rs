use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown field name: {0}")]
    UnknownField(String),
    #[error("unknown medication: {0}")]
    UnknownMedication(String),
    #[error("empty detection tag")]
    EmptyTag,
}

pub type Result<T> = std::result::Result<T, ModelError>;
