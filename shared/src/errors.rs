//! Shared error types for the CRM system

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharedError {
    #[error("name required")]
    NameRequired,

    #[error("invalid status: {input}")]
    InvalidStatus { input: String },

    #[error("score must be between {min} and {max}, got {value}")]
    ScoreOutOfRange { value: i64, min: i64, max: i64 },

    #[error("invalid score: {input}")]
    InvalidScore { input: String },

    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
