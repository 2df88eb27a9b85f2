//! Lifecycle service: create, read, update and delete of single records.
//!
//! # Design
//! The service owns no state of its own. It holds a shared `TodoStore` and a
//! shared `Clock`, stamps timestamps, and resolves every call into a typed
//! outcome. "Not found" and "conflict" are values, not errors; only
//! `StoreFailure` travels on the error path.
//!
//! Updates are read-merge-write. When the write misses, one follow-up `get`
//! tells a concurrent delete (`NotFound`) apart from a concurrent
//! modification (`Conflict`). The check only runs after a failed write.
//! Conflicts are reported, never retried.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{ReplaceError, StoreFailure};
use crate::merge::merge;
use crate::store::TodoStore;
use crate::types::{NewTodo, TodoId, TodoPatch, TodoRecord};

/// Result of a single-record read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(TodoRecord),
    NotFound,
}

/// Result of an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(TodoRecord),
    NotFound,
    /// The record still exists but changed between our read and our write.
    Conflict,
}

/// Result of a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
    clock: Arc<dyn Clock>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Service over `store` stamping wall-clock UTC time.
    pub fn with_system_clock(store: Arc<dyn TodoStore>) -> Self {
        Self::new(store, Arc::new(SystemClock))
    }

    pub async fn list(&self) -> Result<Vec<TodoRecord>, StoreFailure> {
        info!("fetching all todo items");
        self.store.list().await
    }

    pub async fn get(&self, id: TodoId) -> Result<Lookup, StoreFailure> {
        info!(id, "fetching todo item");
        match self.store.get(id).await? {
            Some(record) => Ok(Lookup::Found(record)),
            None => {
                warn!(id, "todo item not found");
                Ok(Lookup::NotFound)
            }
        }
    }

    pub async fn create(&self, todo: NewTodo) -> Result<TodoRecord, StoreFailure> {
        let now = self.clock.now();
        let created = self.store.insert(todo, now).await?;
        info!(id = created.id, title = %created.title, "created todo item");
        Ok(created)
    }

    pub async fn update(
        &self,
        id: TodoId,
        patch: TodoPatch,
    ) -> Result<UpdateOutcome, StoreFailure> {
        info!(id, touches_fields = !patch.is_empty(), "updating todo item");
        let Some(existing) = self.store.get(id).await? else {
            warn!(id, "todo item not found for update");
            return Ok(UpdateOutcome::NotFound);
        };

        let merged = merge(existing, patch, self.clock.now());
        match self.store.replace(merged).await {
            Ok(updated) => {
                info!(id, "todo item updated");
                Ok(UpdateOutcome::Updated(updated))
            }
            Err(ReplaceError::NotFound { .. }) => {
                if self.store.get(id).await?.is_none() {
                    warn!(id, "todo item deleted during update");
                    Ok(UpdateOutcome::NotFound)
                } else {
                    error!(id, "concurrent modification while updating todo item");
                    Ok(UpdateOutcome::Conflict)
                }
            }
            Err(ReplaceError::Failure(failure)) => Err(failure),
        }
    }

    pub async fn delete(&self, id: TodoId) -> Result<DeleteOutcome, StoreFailure> {
        info!(id, "deleting todo item");
        if self.store.delete(id).await? {
            info!(id, "todo item deleted");
            Ok(DeleteOutcome::Deleted)
        } else {
            warn!(id, "todo item not found for deletion");
            Ok(DeleteOutcome::NotFound)
        }
    }
}
