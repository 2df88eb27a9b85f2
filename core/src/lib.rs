//! Record lifecycle core for the todo service.
//!
//! # Overview
//! Owns the create / read / update / delete lifecycle of single todo records
//! with partial-update semantics and optimistic concurrency. Knows nothing
//! about HTTP; the server crate decodes and validates requests, then calls
//! `TodoService`.
//!
//! # Design
//! - `TodoStore` is the only owner of authoritative records; everything else
//!   works on owned copies.
//! - `merge` is a plain function applying a `TodoPatch` onto a record.
//! - `TodoService` is built from explicit collaborators (store, clock) and
//!   returns tri-state outcomes instead of errors for "not found" and
//!   "conflict".
//! - `StoreFailure` is the only error the service surfaces.

pub mod clock;
pub mod error;
pub mod merge;
pub mod service;
pub mod store;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ReplaceError, StoreFailure};
pub use merge::merge;
pub use service::{DeleteOutcome, Lookup, TodoService, UpdateOutcome};
pub use store::{InMemoryStore, TodoStore};
pub use types::{NewTodo, TodoId, TodoPatch, TodoRecord};
