//! Wire shapes for the todo API and their conversion into core types.
//!
//! # Design
//! Request bodies keep required fields as `Option` so that a missing field
//! surfaces as a validation message instead of a JSON decoding failure.
//! Conversion into core types is field by field and only succeeds after
//! every rule in `validation` has passed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use todo_core::{NewTodo, TodoId, TodoPatch, TodoRecord};

use crate::error::ApiError;
use crate::validation::{check_description, check_due_date, check_title, ValidationErrors};

/// Body of `POST /todo`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: Option<bool>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl CreateTodoRequest {
    /// Validates against `now` and builds the core creation payload.
    pub fn into_new_todo(self, now: DateTime<Utc>) -> Result<NewTodo, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_title(&mut errors, &self.title);
        check_description(&mut errors, self.description.as_deref());
        if self.is_completed.is_none() {
            errors.add("isCompleted", "IsCompleted must be specified.");
        }
        match self.due_date {
            Some(due_date) => check_due_date(&mut errors, due_date, now),
            None => errors.add("dueDate", "Due date is required."),
        }

        match (self.is_completed, self.due_date) {
            (Some(is_completed), Some(due_date)) if errors.is_empty() => Ok(NewTodo {
                title: self.title,
                description: self.description,
                is_completed,
                due_date,
            }),
            _ => Err(errors),
        }
    }
}

/// Body of `PUT /todo/{id}`. Every field is optional; absent fields are left
/// unchanged on the stored record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    /// When present, must name the same record as the path.
    #[serde(default)]
    pub id: Option<TodoId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: Option<bool>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl UpdateTodoRequest {
    /// Validates the present fields against `now` and builds the core patch.
    pub fn into_patch(self, path_id: TodoId, now: DateTime<Utc>) -> Result<TodoPatch, ApiError> {
        let mut errors = ValidationErrors::new();
        if self.id == Some(0) {
            errors.add("id", "Id must be greater than 0.");
        }
        if let Some(title) = self.title.as_deref() {
            check_title(&mut errors, title);
        }
        check_description(&mut errors, self.description.as_deref());
        if let Some(due_date) = self.due_date {
            check_due_date(&mut errors, due_date, now);
        }
        errors.into_result().map_err(ApiError::Validation)?;

        if let Some(body_id) = self.id.filter(|body_id| *body_id != path_id) {
            return Err(ApiError::MismatchedId {
                path: path_id,
                body: body_id,
            });
        }
        Ok(TodoPatch {
            title: self.title,
            description: self.description,
            is_completed: self.is_completed,
            due_date: self.due_date,
        })
    }
}

/// A todo as returned by every read and write endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TodoRecord> for TodoResponse {
    fn from(record: TodoRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            is_completed: record.is_completed,
            due_date: record.due_date,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
