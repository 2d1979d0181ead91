//! Error types shared by the storage, network and session layers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    /// Transport failure talking to the trivia or account backend
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The trivia API answered but returned no usable questions
    #[error("No questions available")]
    NoQuestions,

    /// Message supplied by the auth provider, shown to the user verbatim
    #[error("{0}")]
    Auth(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The background network worker went away
    #[error("Worker error: {0}")]
    Worker(String),
}

pub type Result<T> = std::result::Result<T, QuizError>;
