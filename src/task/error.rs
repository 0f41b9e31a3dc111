use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("Invalid date '{0}': expected DD/MM/YYYY")]
    InvalidDate(String),

    #[error("Unknown priority '{0}': expected high, medium or low")]
    UnknownPriority(String),
}

pub type Result<T> = std::result::Result<T, TaskError>;
