//! Field rules for incoming todo payloads.
//!
//! Every rule runs and every violation is collected, so a client sees all
//! problems with a body at once. Messages are keyed by the camelCase JSON
//! field name.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Messages keyed by field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Violations grouped by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(FieldErrors);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`, empty when it passed.
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn into_fields(self) -> FieldErrors {
        self.0
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

pub fn check_title(errors: &mut ValidationErrors, title: &str) {
    if title.trim().is_empty() {
        errors.add("title", "Title is required.");
    } else if title.chars().count() > TITLE_MAX_CHARS {
        errors.add("title", "Title must not exceed 100 characters.");
    }
}

pub fn check_description(errors: &mut ValidationErrors, description: Option<&str>) {
    if let Some(description) = description {
        if description.chars().count() > DESCRIPTION_MAX_CHARS {
            errors.add(
                "description",
                "Description must not exceed 500 characters.",
            );
        }
    }
}

pub fn check_due_date(errors: &mut ValidationErrors, due_date: DateTime<Utc>, now: DateTime<Utc>) {
    if due_date <= now {
        errors.add("dueDate", "Due date must be in the future.");
    }
}
