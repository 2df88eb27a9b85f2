//! Domain types for the todo record lifecycle.
//!
//! # Design
//! `TodoRecord` is the authoritative shape owned by a `TodoStore`. Callers
//! only ever hold transient copies. `NewTodo` and `TodoPatch` are the two
//! inputs the lifecycle service accepts; both are plain data and carry no
//! validation of their own. Length limits and due-date rules belong to the
//! HTTP layer, which runs before these values are built.

use chrono::{DateTime, Utc};

/// Surrogate identifier assigned by the store on insert.
pub type TodoId = u64;

/// A stored todo item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRecord {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Concurrency token. Starts at 1 on insert and is bumped by the store on
    /// every successful replace. A replace carrying a stale value matches no
    /// row.
    pub row_version: u64,
}

/// A record that has not been inserted yet.
///
/// Timestamps are stamped by the service, the id and row version by the
/// store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub due_date: DateTime<Utc>,
}

/// Field-wise changes for an existing record.
///
/// A `None` field means "leave unchanged". There is no way to clear
/// `description` through a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_completed: Option<bool>,
    pub due_date: Option<DateTime<Utc>>,
}

impl TodoPatch {
    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.is_completed.is_none()
            && self.due_date.is_none()
    }
}
