//! Error types for the record store and lifecycle service.
//!
//! # Design
//! "Not found" and "conflict" are expected outcomes and live in the service's
//! outcome enums, not here. `StoreFailure` is the one opaque fault: the
//! service never retries or inspects it, it only passes it up. `ReplaceError`
//! exists because `replace` is the only store call whose miss the service
//! has to interpret.

use thiserror::Error;

use crate::types::TodoId;

/// Opaque infrastructure failure raised by a store backend.
#[derive(Debug, Clone, Error)]
#[error("store failure: {message}")]
pub struct StoreFailure {
    message: String,
}

impl StoreFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors returned by `TodoStore::replace`.
#[derive(Debug, Clone, Error)]
pub enum ReplaceError {
    /// No stored record matched both the id and the expected row version.
    #[error("no todo {id} at row version {expected_version}")]
    NotFound { id: TodoId, expected_version: u64 },

    #[error(transparent)]
    Failure(#[from] StoreFailure),
}
