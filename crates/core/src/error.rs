use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoesisError {
    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Invalid input record {index}: {reason}")]
    InvalidInput { index: usize, reason: String },
}

impl From<serde_json::Error> for NoesisError {
    fn from(e: serde_json::Error) -> Self {
        NoesisError::Serialize(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NoesisError>;
