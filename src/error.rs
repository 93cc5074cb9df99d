//! Error taxonomy for remote calls and snapshot access

use thiserror::Error;

use crate::remote::EntityKind;

#[derive(Error, Debug)]
pub enum TriliumError {
    /// Connectivity, auth or routing problem. `status` is `None` when the
    /// request never produced a response.
    #[error("Transport error{}: {message}", .status.map(|s| format!(" ({})", s)).unwrap_or_default())]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// The remote operation itself failed (HTTP 500). Carries the server's
    /// diagnostic text verbatim.
    #[error("Remote execution failed: {0}")]
    RemoteExecution(String),

    #[error("Snapshot of {kind} is missing field '{field}'")]
    MissingField { kind: EntityKind, field: String },

    #[error("Graph integrity violation at note '{note_id}': {detail}")]
    GraphIntegrity { note_id: String, detail: String },

    #[error("Unexpected response shape from '{method}': {detail}")]
    UnexpectedShape { method: String, detail: String },

    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl TriliumError {
    pub(crate) fn missing(kind: EntityKind, field: &str) -> Self {
        TriliumError::MissingField {
            kind,
            field: field.to_string(),
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            TriliumError::Transport { status, .. } => *status,
            TriliumError::RemoteExecution(_) => Some(500),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TriliumError {
    fn from(err: reqwest::Error) -> Self {
        TriliumError::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TriliumError>;
