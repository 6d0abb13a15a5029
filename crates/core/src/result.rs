// crates/core/src/result.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrigorodError {
    #[error("NLU error: {0}")]
    Nlu(String),

    #[error("Date error: {0}")]
    Date(String),

    #[error("Schedule error: {0}")]
    Schedule(String),

    #[error("Unknown station: {0}")]
    UnknownStation(String),

    #[error("No matching ticket")]
    NoTicket,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type PrigorodResult<T> = Result<T, PrigorodError>;
