//! HTTP surface for the todo record lifecycle.
//!
//! # Design
//! Handlers are thin: decode, validate into a core type, call `TodoService`,
//! and turn the outcome into a status code. Everything that can go wrong
//! comes back as an `ApiError`, which renders itself as a problem body. That
//! includes malformed JSON and non-numeric ids, which are taken as
//! `Result<_, Rejection>` extractors and converted.

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use todo_core::{DeleteOutcome, InMemoryStore, Lookup, TodoId, TodoService, UpdateOutcome};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::warn;

pub mod config;
pub mod dto;
pub mod error;
pub mod openapi;
pub mod telemetry;
pub mod validation;

pub use config::AppConfig;
pub use dto::{CreateTodoRequest, HealthResponse, TodoResponse, UpdateTodoRequest};
pub use error::{ApiError, ApiResult, Problem};

/// Router over a fresh in-memory store and the system clock.
pub fn app() -> Router {
    router(TodoService::with_system_clock(Arc::new(InMemoryStore::new())))
}

/// `app()` for the configured environment. Development also serves the
/// OpenAPI document.
pub fn app_for(config: &AppConfig) -> Router {
    if config.is_development() {
        app().merge(openapi::routes())
    } else {
        app()
    }
}

pub fn router(service: TodoService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/todo", get(list_todos).post(create_todo))
        .route("/todo/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Serves `app` until `shutdown` resolves, then drains in-flight requests.
pub async fn run_until<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn list_todos(State(service): State<TodoService>) -> ApiResult<Json<Vec<TodoResponse>>> {
    let todos = service.list().await?;
    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

async fn get_todo(
    State(service): State<TodoService>,
    id: Result<Path<TodoId>, PathRejection>,
) -> ApiResult<Json<TodoResponse>> {
    let Path(id) = id?;
    match service.get(id).await? {
        Lookup::Found(record) => Ok(Json(record.into())),
        Lookup::NotFound => Err(ApiError::NotFound(id)),
    }
}

async fn create_todo(
    State(service): State<TodoService>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, [(header::HeaderName, String); 1], Json<TodoResponse>)> {
    let Json(input) = payload?;
    let todo = input.into_new_todo(Utc::now()).map_err(|errors| {
        warn!(%errors, "validation failed for todo creation");
        ApiError::Validation(errors)
    })?;
    let created = service.create(todo).await?;
    let location = format!("/todo/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created.into()),
    ))
}

async fn update_todo(
    State(service): State<TodoService>,
    id: Result<Path<TodoId>, PathRejection>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> ApiResult<Json<TodoResponse>> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let patch = input.into_patch(id, Utc::now()).inspect_err(|err| {
        warn!(id, error = %err, "rejected todo update");
    })?;
    match service.update(id, patch).await? {
        UpdateOutcome::Updated(record) => Ok(Json(record.into())),
        UpdateOutcome::NotFound => Err(ApiError::NotFound(id)),
        UpdateOutcome::Conflict => Err(ApiError::Conflict(id)),
    }
}

async fn delete_todo(
    State(service): State<TodoService>,
    id: Result<Path<TodoId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    match service.delete(id).await? {
        DeleteOutcome::Deleted => Ok(StatusCode::NO_CONTENT),
        DeleteOutcome::NotFound => Err(ApiError::NotFound(id)),
    }
}
