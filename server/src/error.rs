//! HTTP error type and problem-details responses.
//!
//! # Design
//! Handlers return `Result<_, ApiError>`. Each variant maps to one status
//! code and a problem body in the RFC 9457 shape. Extractor rejections keep
//! axum's status and message but are rendered in the same shape. Store
//! failures are logged here with their cause and answered with a generic 500
//! so that backend details never reach the client.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use todo_core::{StoreFailure, TodoId};
use tracing::error;

use crate::validation::{FieldErrors, ValidationErrors};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    MalformedBody(#[from] JsonRejection),

    #[error(transparent)]
    MalformedPath(#[from] PathRejection),

    #[error("body id {body} does not match path id {path}")]
    MismatchedId { path: TodoId, body: TodoId },

    #[error("todo {0} not found")]
    NotFound(TodoId),

    #[error("todo {0} was modified concurrently")]
    Conflict(TodoId),

    #[error(transparent)]
    Store(#[from] StoreFailure),
}

/// Problem details body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

const RFC9110: &str = "https://datatracker.ietf.org/doc/html/rfc9110";

impl Problem {
    fn new(status: StatusCode, title: &str) -> Self {
        let anchor = status
            .canonical_reason()
            .unwrap_or("error")
            .to_ascii_lowercase()
            .replace(' ', "-");
        Self {
            kind: format!("{RFC9110}#name-{}-{anchor}", status.as_u16()),
            title: title.to_string(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            errors: None,
        }
    }

    fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    fn instance(mut self, id: TodoId) -> Self {
        self.instance = Some(format!("/todo/{id}"));
        self
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MismatchedId { .. } => StatusCode::BAD_REQUEST,
            ApiError::MalformedBody(rejection) => rejection.status(),
            ApiError::MalformedPath(rejection) => rejection.status(),
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_problem(self) -> Problem {
        let status = self.status();
        match self {
            ApiError::Validation(errors) => {
                let mut problem = Problem::new(status, "Validation Error")
                    .detail("One or more validation errors occurred.");
                problem.errors = Some(errors.into_fields());
                problem
            }
            ApiError::MalformedBody(rejection) => rejected(status, rejection.body_text()),
            ApiError::MalformedPath(rejection) => rejected(status, rejection.body_text()),
            ApiError::MismatchedId { path, .. } => Problem::new(status, "Bad Request")
                .detail("Todo item is invalid.")
                .instance(path),
            ApiError::NotFound(id) => Problem::new(status, "Not Found")
                .detail(format!("Todo item with ID {id} was not found."))
                .instance(id),
            ApiError::Conflict(id) => Problem::new(status, "Conflict")
                .detail(format!("Todo item with ID {id} was modified by another request."))
                .instance(id),
            ApiError::Store(failure) => {
                error!(cause = failure.message(), "store failure while handling request");
                Problem::new(status, "Server error")
            }
        }
    }
}

fn rejected(status: StatusCode, detail: String) -> Problem {
    Problem::new(status, status.canonical_reason().unwrap_or("Bad Request")).detail(detail)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let problem = self.into_problem();
        (
            status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(problem),
        )
            .into_response()
    }
}
