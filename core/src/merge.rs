//! Partial-update merge.

use chrono::{DateTime, Utc};

use crate::types::{TodoPatch, TodoRecord};

/// Applies every present field of `patch` onto `existing`.
///
/// `id`, `created_at` and `row_version` are carried over untouched.
/// `updated_at` becomes `now`, clamped so it never precedes `created_at`.
pub fn merge(existing: TodoRecord, patch: TodoPatch, now: DateTime<Utc>) -> TodoRecord {
    TodoRecord {
        id: existing.id,
        title: patch.title.unwrap_or(existing.title),
        description: patch.description.or(existing.description),
        is_completed: patch.is_completed.unwrap_or(existing.is_completed),
        due_date: patch.due_date.unwrap_or(existing.due_date),
        created_at: existing.created_at,
        updated_at: now.max(existing.created_at),
        row_version: existing.row_version,
    }
}
