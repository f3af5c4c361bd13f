//! Error type shared by every operation.
//!
//! Each variant maps onto the `error` / `details` fields of the output
//! envelope; nothing here is retried.

use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotesError {
    #[error("No {collection} found matching '{query}'")]
    NotFound {
        collection: &'static str,
        query: String,
    },

    #[error("Multiple {collection} match '{query}'. Please be more specific:")]
    Ambiguous {
        collection: &'static str,
        query: String,
        matches: Vec<String>,
    },

    #[error("{0}")]
    InvalidInput(String),

    #[error("{context}: {message}")]
    Transport { context: String, message: String },

    #[error("Unexpected response from Notion: {0}")]
    MalformedRemoteData(String),

    #[error("{0}")]
    Config(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// One or more `validate` checks failed; carries the full report.
    #[error("Validation failed")]
    ValidationFailed(Value),
}

impl NotesError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn transport(context: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Transport {
            context: context.into(),
            message: message.to_string(),
        }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRemoteData(msg.into())
    }

    /// Structured extras for the error envelope, if this error has any.
    pub fn details(&self) -> Option<Value> {
        match self {
            Self::Ambiguous { matches, .. } => Some(json!({ "matches": matches })),
            Self::NotFound { query, .. } => Some(json!({ "query": query })),
            Self::ValidationFailed(report) => Some(report.clone()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, NotesError>;
