use std::path::PathBuf;

use requester_core::types::InputSpec;
use requester_core::{Resolved, TokenError};

use crate::executor::http::HttpError;

/// Errors that abort the running chain. Each one resets the session.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("endpoint for token not found: {0}")]
    EndpointForTokenNotFound(String),
    #[error("dependency cycle: {}", .0.join(" -> "))]
    DependencyCycle(Vec<String>),
    #[error("value not set: {0}")]
    TokenUnresolved(String),
    #[error("unknown endpoint: {0}")]
    UnknownEndpoint(String),
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("request failed: {status} {reason}")]
    Status { status: u16, reason: String },
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("no request is pending")]
    NothingPending,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<TokenError> for ChainError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Unresolved(name) => ChainError::TokenUnresolved(name),
            other => ChainError::InvalidRequest(other.to_string()),
        }
    }
}

/// An endpoint suspended until the collaborator supplies its inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub endpoint: String,
    /// Input specs with cache tokens already substituted.
    pub inputs: Vec<InputSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Outputs of the final json/text endpoint.
    Rendered(Vec<Resolved>),
    /// Files written for the final file endpoint.
    Files(Vec<PathBuf>),
}

/// Where a chain stopped after `init_request` or `continue_request`.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    AwaitingInput(Prompt),
    Completed(Completion),
}
