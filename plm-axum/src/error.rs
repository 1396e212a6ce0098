//! Mapping of domain and storage failures onto HTTP responses.
//!
//! Every handler fails with a `(StatusCode, String)` pair, which aide
//! documents and axum renders as a plain-text body.

use axum::http::StatusCode;
use plm_core::{models::ValidationError, ports::StorageError};
use std::fmt::Display;
use tracing::{Level, event};

pub(crate) type ApiError = (StatusCode, String);

/// Translate a storage failure. Conflicts are the client's problem and are
/// reported as such; anything else is logged and hidden behind `context`.
pub(crate) fn storage<E: StorageError>(context: String) -> impl FnOnce(E) -> ApiError {
    move |err| {
        if err.is_conflict() {
            (
                StatusCode::CONFLICT,
                format!("{context}: conflicts with an existing record"),
            )
        } else {
            event!(Level::ERROR, err = err.to_string());
            (StatusCode::INTERNAL_SERVER_ERROR, context)
        }
    }
}

pub(crate) fn invalid(err: ValidationError) -> ApiError {
    (StatusCode::BAD_REQUEST, err.to_string())
}

pub(crate) fn not_found(entity: &str, id: impl Display) -> ApiError {
    (StatusCode::NOT_FOUND, format!("unknown {entity} {id}"))
}
