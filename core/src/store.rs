//! Record store contract and the in-memory implementation.
//!
//! # Design
//! `TodoStore` is the single owner of authoritative records. Every call hands
//! back owned copies, so nothing outside the store can mutate a record in
//! place. `replace` is an optimistic write: it only lands when both the id
//! and the row version match what is stored, the same way a
//! `WHERE id = ? AND row_version = ?` update would. A miss is reported as
//! `ReplaceError::NotFound` without saying which half failed to match; the
//! lifecycle service resolves that with a follow-up `get`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::{ReplaceError, StoreFailure};
use crate::types::{NewTodo, TodoId, TodoRecord};

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All live records. Order is backend-defined.
    async fn list(&self) -> Result<Vec<TodoRecord>, StoreFailure>;

    async fn get(&self, id: TodoId) -> Result<Option<TodoRecord>, StoreFailure>;

    /// Persists `todo` under a fresh id with both timestamps set to
    /// `stamped_at` and returns the stored copy.
    async fn insert(
        &self,
        todo: NewTodo,
        stamped_at: DateTime<Utc>,
    ) -> Result<TodoRecord, StoreFailure>;

    /// Overwrites the stored record matching `record.id` and
    /// `record.row_version`, then bumps the row version.
    async fn replace(&self, record: TodoRecord) -> Result<TodoRecord, ReplaceError>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: TodoId) -> Result<bool, StoreFailure>;
}

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<TodoId, TodoRecord>,
    last_id: TodoId,
}

/// Process-local store backed by an ordered map behind one `RwLock`.
///
/// Ids start at 1 and are never reused, so `list` returns records in
/// insertion order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    table: RwLock<Table>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for InMemoryStore {
    async fn list(&self) -> Result<Vec<TodoRecord>, StoreFailure> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get(&self, id: TodoId) -> Result<Option<TodoRecord>, StoreFailure> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn insert(
        &self,
        todo: NewTodo,
        stamped_at: DateTime<Utc>,
    ) -> Result<TodoRecord, StoreFailure> {
        let mut table = self.table.write().await;
        let id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| StoreFailure::new("todo id space exhausted"))?;
        table.last_id = id;

        let record = TodoRecord {
            id,
            title: todo.title,
            description: todo.description,
            is_completed: todo.is_completed,
            due_date: todo.due_date,
            created_at: stamped_at,
            updated_at: stamped_at,
            row_version: 1,
        };
        table.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn replace(&self, record: TodoRecord) -> Result<TodoRecord, ReplaceError> {
        let mut table = self.table.write().await;
        let stored = table
            .rows
            .get_mut(&record.id)
            .filter(|stored| stored.row_version == record.row_version)
            .ok_or(ReplaceError::NotFound {
                id: record.id,
                expected_version: record.row_version,
            })?;

        // id and created_at are immutable once stored.
        stored.title = record.title;
        stored.description = record.description;
        stored.is_completed = record.is_completed;
        stored.due_date = record.due_date;
        stored.updated_at = record.updated_at;
        stored.row_version += 1;
        Ok(stored.clone())
    }

    async fn delete(&self, id: TodoId) -> Result<bool, StoreFailure> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, hour, 0, 0).unwrap()
    }

    fn new_todo(title: &str) -> NewTodo {
        NewTodo {
            title: title.to_string(),
            description: None,
            is_completed: false,
            due_date: at(23),
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids_and_stamps() {
        let store = InMemoryStore::new();
        let first = store.insert(new_todo("a"), at(1)).await.unwrap();
        let second = store.insert(new_todo("b"), at(2)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.created_at, at(1));
        assert_eq!(first.updated_at, at(1));
        assert_eq!(first.row_version, 1);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = InMemoryStore::new();
        let first = store.insert(new_todo("a"), at(1)).await.unwrap();
        assert!(store.delete(first.id).await.unwrap());

        let second = store.insert(new_todo("b"), at(2)).await.unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn list_returns_insertion_order() {
        let store = InMemoryStore::new();
        for title in ["a", "b", "c"] {
            store.insert(new_todo(title), at(1)).await.unwrap();
        }
        let titles: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|todo| todo.title)
            .collect();
        assert_eq!(titles, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn get_missing_is_none() {
        let store = InMemoryStore::new();
        assert!(store.get(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn replace_bumps_row_version_and_keeps_created_at() {
        let store = InMemoryStore::new();
        let stored = store.insert(new_todo("a"), at(1)).await.unwrap();

        let mut changed = stored.clone();
        changed.title = "b".to_string();
        changed.created_at = at(9);
        changed.updated_at = at(3);

        let replaced = store.replace(changed).await.unwrap();
        assert_eq!(replaced.title, "b");
        assert_eq!(replaced.created_at, at(1));
        assert_eq!(replaced.updated_at, at(3));
        assert_eq!(replaced.row_version, 2);
        assert_eq!(store.get(stored.id).await.unwrap(), Some(replaced));
    }

    #[tokio::test]
    async fn replace_with_stale_version_misses() {
        let store = InMemoryStore::new();
        let stored = store.insert(new_todo("a"), at(1)).await.unwrap();
        store.replace(stored.clone()).await.unwrap();

        let err = store.replace(stored).await.unwrap_err();
        assert!(matches!(
            err,
            ReplaceError::NotFound {
                id: 1,
                expected_version: 1
            }
        ));
    }

    #[tokio::test]
    async fn replace_missing_record_misses() {
        let store = InMemoryStore::new();
        let ghost = TodoRecord {
            id: 5,
            title: "ghost".to_string(),
            description: None,
            is_completed: false,
            due_date: at(23),
            created_at: at(1),
            updated_at: at(1) + Duration::minutes(1),
            row_version: 1,
        };
        let err = store.replace(ghost).await.unwrap_err();
        assert!(matches!(err, ReplaceError::NotFound { id: 5, .. }));
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let store = InMemoryStore::new();
        let stored = store.insert(new_todo("a"), at(1)).await.unwrap();
        assert!(store.delete(stored.id).await.unwrap());
        assert!(!store.delete(stored.id).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }
}
