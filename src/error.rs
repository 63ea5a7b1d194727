//! Failure modes of a single API lookup.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The server answered with something other than 200.
    #[error("{status} - {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response.
    #[error("{0}")]
    Transport(String),

    /// A 200 response whose body is not the expected JSON array.
    #[error("{0}")]
    Decode(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        LookupError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(e: serde_json::Error) -> Self {
        LookupError::Decode(e.to_string())
    }
}
