//! REST API endpoints for engineering change orders.
//!
//! Besides CRUD, a change order moves through its review workflow with
//! `POST /ecos/{eco_id}/transition`, which enforces the allowed state changes
//! and records reviewer sign-offs.

use crate::{
    ApiApplication, DateTime, EcoId, Message, ProductId,
    error::{self, ApiError},
};
use aide::axum::{
    ApiRouter,
    routing::{get, post},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use plm_core::{
    models::{EcoData, EcoTransition, Record, TransitionError, Validate as _},
    ports::EcoRepository as _,
};

type Data<T> = EcoData<ProductId<T>, DateTime<T>>;
type EcoRecord<T> = Record<EcoId<T>, DateTime<T>, Data<T>>;

/// Creates a router with change-order endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with(
            "/",
            get(list_ecos::<T>).post(create_eco::<T>),
            |route| route.tag("ecos"),
        )
        .api_route_with(
            "/{eco_id}",
            get(get_eco::<T>).put(update_eco::<T>).delete(delete_eco::<T>),
            |route| route.tag("ecos"),
        )
        .api_route_with(
            "/{eco_id}/transition",
            post(transition_eco::<T>),
            |route| route.tag("ecos"),
        )
}

/// Path parameter for change-order endpoints.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
struct Id<T> {
    /// The unique identifier of the change order
    eco_id: T,
}

async fn list_ecos<T: ApiApplication>(
    State(app): State<T>,
) -> Result<Json<Vec<EcoRecord<T>>>, ApiError> {
    app.database()
        .list_ecos()
        .await
        .map(Json)
        .map_err(error::storage("failed to list ecos".to_string()))
}

/// Raise a new change order.
///
/// # Returns
///
/// - `201 Created`: The stored change order
/// - `400 Bad Request`: The title is blank
/// - `500 Internal Server Error`: Database operation failed
async fn create_eco<T: ApiApplication>(
    State(app): State<T>,
    Json(data): Json<Data<T>>,
) -> Result<(StatusCode, Json<EcoRecord<T>>), ApiError> {
    data.validate().map_err(error::invalid)?;

    let (eco_id, as_of) = app.generate_eco_id();
    let record = app
        .database()
        .create_eco(eco_id, data, as_of)
        .await
        .map_err(error::storage("failed to create eco".to_string()))?;

    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_eco<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { eco_id }): Path<Id<EcoId<T>>>,
) -> Result<Json<EcoRecord<T>>, ApiError> {
    app.database()
        .get_eco(eco_id.clone())
        .await
        .map_err(error::storage(format!("failed to get eco {eco_id}")))?
        .map(Json)
        .ok_or_else(|| error::not_found("eco", &eco_id))
}

/// Replace a change order wholesale.
///
/// This does not check the workflow; use the transition endpoint to move a
/// change order between states.
async fn update_eco<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { eco_id }): Path<Id<EcoId<T>>>,
    Json(data): Json<Data<T>>,
) -> Result<Json<EcoRecord<T>>, ApiError> {
    data.validate().map_err(error::invalid)?;

    app.database()
        .update_eco(eco_id.clone(), data, app.now())
        .await
        .map_err(error::storage(format!("failed to update eco {eco_id}")))?
        .map(Json)
        .ok_or_else(|| error::not_found("eco", &eco_id))
}

async fn delete_eco<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { eco_id }): Path<Id<EcoId<T>>>,
) -> Result<Json<Message>, ApiError> {
    let deleted = app
        .database()
        .delete_eco(eco_id.clone(), app.now())
        .await
        .map_err(error::storage(format!("failed to delete eco {eco_id}")))?;

    if deleted {
        Ok(Message::deleted("ECO"))
    } else {
        Err(error::not_found("eco", &eco_id))
    }
}

/// Move a change order to its next workflow state.
///
/// Forwarding for approval, approving and rejecting are review decisions:
/// they require the MANAGER, DGM or ADMIN role and are recorded in the
/// order's approval history.
///
/// # Returns
///
/// - `200 OK`: The updated change order
/// - `403 Forbidden`: A review decision was requested by a non-reviewing role
/// - `404 Not Found`: Change order does not exist
/// - `409 Conflict`: The workflow does not allow the requested state change
/// - `500 Internal Server Error`: Database operation failed
async fn transition_eco<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { eco_id }): Path<Id<EcoId<T>>>,
    Json(request): Json<EcoTransition>,
) -> Result<Json<EcoRecord<T>>, ApiError> {
    let db = app.database();

    let Record { mut data, .. } = db
        .get_eco(eco_id.clone())
        .await
        .map_err(error::storage(format!("failed to get eco {eco_id}")))?
        .ok_or_else(|| error::not_found("eco", &eco_id))?;

    let as_of = app.now();
    data.transition(request, as_of.clone())
        .map_err(|err| match err {
            TransitionError::Illegal { .. } => (StatusCode::CONFLICT, err.to_string()),
            TransitionError::NotReviewer(_) => (StatusCode::FORBIDDEN, err.to_string()),
        })?;

    let record = db
        .update_eco(eco_id.clone(), data, as_of)
        .await
        .map_err(error::storage(format!("failed to update eco {eco_id}")))?
        .ok_or_else(|| error::not_found("eco", &eco_id))?;

    tracing::info!(eco_id = %eco_id, status = ?record.data.status, "eco transitioned");
    Ok(Json(record))
}
