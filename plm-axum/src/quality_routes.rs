//! REST API endpoints for quality records.
//!
//! Non-conformance reports (NCRs) and corrective and preventive actions
//! (CAPAs) can be raised and updated but never deleted; they are closed by
//! moving them to their final state.

use crate::{
    ApiApplication, CapaId, DateTime, NcrId, ProductId, SupplierId,
    error::{self, ApiError},
};
use aide::axum::{ApiRouter, routing::get};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use plm_core::{
    models::{CapaData, NcrData, Record, Validate as _},
    ports::QualityRepository as _,
};

type Ncr<T> = NcrData<ProductId<T>, SupplierId<T>>;
type NcrRecord<T> = Record<NcrId<T>, DateTime<T>, Ncr<T>>;
type Capa<T> = CapaData<NcrId<T>, DateTime<T>>;
type CapaRecord<T> = Record<CapaId<T>, DateTime<T>, Capa<T>>;

/// Creates a router with quality endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with(
            "/ncrs",
            get(list_ncrs::<T>).post(create_ncr::<T>),
            |route| route.tag("quality"),
        )
        .api_route_with(
            "/ncrs/{ncr_id}",
            get(get_ncr::<T>).put(update_ncr::<T>),
            |route| route.tag("quality"),
        )
        .api_route_with(
            "/capas",
            get(list_capas::<T>).post(create_capa::<T>),
            |route| route.tag("quality"),
        )
        .api_route_with(
            "/capas/{capa_id}",
            get(get_capa::<T>).put(update_capa::<T>),
            |route| route.tag("quality"),
        )
}

/// Path parameter for NCR endpoints.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
struct NcrPath<T> {
    /// The unique identifier of the report
    ncr_id: T,
}

/// Path parameter for CAPA endpoints.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
struct CapaPath<T> {
    /// The unique identifier of the action
    capa_id: T,
}

async fn list_ncrs<T: ApiApplication>(
    State(app): State<T>,
) -> Result<Json<Vec<NcrRecord<T>>>, ApiError> {
    app.database()
        .list_ncrs()
        .await
        .map(Json)
        .map_err(error::storage("failed to list ncrs".to_string()))
}

/// Report a non-conformance.
///
/// # Returns
///
/// - `201 Created`: The stored report
/// - `400 Bad Request`: The title is blank
/// - `500 Internal Server Error`: Database operation failed
async fn create_ncr<T: ApiApplication>(
    State(app): State<T>,
    Json(data): Json<Ncr<T>>,
) -> Result<(StatusCode, Json<NcrRecord<T>>), ApiError> {
    data.validate().map_err(error::invalid)?;

    let (ncr_id, as_of) = app.generate_ncr_id();
    let record = app
        .database()
        .create_ncr(ncr_id, data, as_of)
        .await
        .map_err(error::storage("failed to create ncr".to_string()))?;

    tracing::info!(ncr_id = %record.id, severity = ?record.data.severity, "ncr reported");
    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_ncr<T: ApiApplication>(
    State(app): State<T>,
    Path(NcrPath { ncr_id }): Path<NcrPath<NcrId<T>>>,
) -> Result<Json<NcrRecord<T>>, ApiError> {
    app.database()
        .get_ncr(ncr_id.clone())
        .await
        .map_err(error::storage(format!("failed to get ncr {ncr_id}")))?
        .map(Json)
        .ok_or_else(|| error::not_found("ncr", &ncr_id))
}

async fn update_ncr<T: ApiApplication>(
    State(app): State<T>,
    Path(NcrPath { ncr_id }): Path<NcrPath<NcrId<T>>>,
    Json(data): Json<Ncr<T>>,
) -> Result<Json<NcrRecord<T>>, ApiError> {
    data.validate().map_err(error::invalid)?;

    app.database()
        .update_ncr(ncr_id.clone(), data, app.now())
        .await
        .map_err(error::storage(format!("failed to update ncr {ncr_id}")))?
        .map(Json)
        .ok_or_else(|| error::not_found("ncr", &ncr_id))
}

async fn list_capas<T: ApiApplication>(
    State(app): State<T>,
) -> Result<Json<Vec<CapaRecord<T>>>, ApiError> {
    app.database()
        .list_capas()
        .await
        .map(Json)
        .map_err(error::storage("failed to list capas".to_string()))
}

/// Open a corrective and preventive action, optionally against an NCR.
///
/// # Returns
///
/// - `201 Created`: The stored action
/// - `400 Bad Request`: The title is blank
/// - `404 Not Found`: The referenced NCR does not exist
/// - `500 Internal Server Error`: Database operation failed
async fn create_capa<T: ApiApplication>(
    State(app): State<T>,
    Json(data): Json<Capa<T>>,
) -> Result<(StatusCode, Json<CapaRecord<T>>), ApiError> {
    data.validate().map_err(error::invalid)?;

    ensure_ncr_exists(&app, &data).await?;

    let (capa_id, as_of) = app.generate_capa_id();
    let record = app
        .database()
        .create_capa(capa_id, data, as_of)
        .await
        .map_err(error::storage("failed to create capa".to_string()))?;

    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_capa<T: ApiApplication>(
    State(app): State<T>,
    Path(CapaPath { capa_id }): Path<CapaPath<CapaId<T>>>,
) -> Result<Json<CapaRecord<T>>, ApiError> {
    app.database()
        .get_capa(capa_id.clone())
        .await
        .map_err(error::storage(format!("failed to get capa {capa_id}")))?
        .map(Json)
        .ok_or_else(|| error::not_found("capa", &capa_id))
}

/// Replace a corrective action.
///
/// # Returns
///
/// - `200 OK`: The updated action
/// - `400 Bad Request`: The title is blank
/// - `404 Not Found`: The action, or the NCR it now references, does not exist
/// - `500 Internal Server Error`: Database operation failed
async fn update_capa<T: ApiApplication>(
    State(app): State<T>,
    Path(CapaPath { capa_id }): Path<CapaPath<CapaId<T>>>,
    Json(data): Json<Capa<T>>,
) -> Result<Json<CapaRecord<T>>, ApiError> {
    data.validate().map_err(error::invalid)?;
    ensure_ncr_exists(&app, &data).await?;

    app.database()
        .update_capa(capa_id.clone(), data, app.now())
        .await
        .map_err(error::storage(format!("failed to update capa {capa_id}")))?
        .map(Json)
        .ok_or_else(|| error::not_found("capa", &capa_id))
}

/// A corrective action may only reference a report that exists.
async fn ensure_ncr_exists<T: ApiApplication>(app: &T, data: &Capa<T>) -> Result<(), ApiError> {
    if let Some(ncr_id) = &data.ncr_id {
        app.database()
            .get_ncr(ncr_id.clone())
            .await
            .map_err(error::storage(format!("failed to get ncr {ncr_id}")))?
            .ok_or_else(|| error::not_found("ncr", ncr_id))?;
    }
    Ok(())
}
