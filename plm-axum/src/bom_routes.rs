//! REST API endpoints for bills of materials.

use crate::{
    ApiApplication, BomId, DateTime, Message, ProductId,
    error::{self, ApiError},
};
use aide::axum::{ApiRouter, routing::get};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use plm_core::{
    costing::{BomCost, CostResolver},
    models::{BomData, Record, Validate as _},
    ports::{BomRepository as _, ProductRepository as _},
};

type BomRecord<T> = Record<BomId<T>, DateTime<T>, BomData<ProductId<T>>>;

/// Creates a router with BOM-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with(
            "/",
            get(list_boms::<T>).post(create_bom::<T>),
            |route| route.tag("boms"),
        )
        .api_route_with(
            "/{bom_id}",
            get(get_bom::<T>).put(update_bom::<T>).delete(delete_bom::<T>),
            |route| route.tag("boms"),
        )
        .api_route_with("/{bom_id}/cost", get(get_bom_cost::<T>), |route| {
            route.tag("boms").tag("costing")
        })
}

/// Path parameter for BOM-specific endpoints.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
struct Id<T> {
    /// The unique identifier of the BOM
    bom_id: T,
}

/// List every BOM, oldest first.
async fn list_boms<T: ApiApplication>(
    State(app): State<T>,
) -> Result<Json<Vec<BomRecord<T>>>, ApiError> {
    app.database()
        .list_boms()
        .await
        .map(Json)
        .map_err(error::storage("failed to list boms".to_string()))
}

/// Create a new BOM.
///
/// Components may reference products that do not exist (yet); they simply
/// contribute nothing to the BOM's cost.
///
/// # Returns
///
/// - `201 Created`: The stored BOM
/// - `400 Bad Request`: The name is blank or a quantity is negative
/// - `500 Internal Server Error`: Database operation failed
async fn create_bom<T: ApiApplication>(
    State(app): State<T>,
    Json(data): Json<BomData<ProductId<T>>>,
) -> Result<(StatusCode, Json<BomRecord<T>>), ApiError> {
    data.validate().map_err(error::invalid)?;

    let (bom_id, as_of) = app.generate_bom_id();
    let record = app
        .database()
        .create_bom(bom_id, data, as_of)
        .await
        .map_err(error::storage("failed to create bom".to_string()))?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Retrieve a single BOM.
async fn get_bom<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { bom_id }): Path<Id<BomId<T>>>,
) -> Result<Json<BomRecord<T>>, ApiError> {
    app.database()
        .get_bom(bom_id.clone())
        .await
        .map_err(error::storage(format!("failed to get bom {bom_id}")))?
        .map(Json)
        .ok_or_else(|| error::not_found("bom", &bom_id))
}

/// Replace a BOM, including its status and component list.
///
/// # Returns
///
/// - `200 OK`: The updated BOM
/// - `400 Bad Request`: The new data is invalid
/// - `404 Not Found`: BOM does not exist
/// - `500 Internal Server Error`: Database operation failed
async fn update_bom<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { bom_id }): Path<Id<BomId<T>>>,
    Json(data): Json<BomData<ProductId<T>>>,
) -> Result<Json<BomRecord<T>>, ApiError> {
    data.validate().map_err(error::invalid)?;

    app.database()
        .update_bom(bom_id.clone(), data, app.now())
        .await
        .map_err(error::storage(format!("failed to update bom {bom_id}")))?
        .map(Json)
        .ok_or_else(|| error::not_found("bom", &bom_id))
}

/// Delete a BOM.
async fn delete_bom<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { bom_id }): Path<Id<BomId<T>>>,
) -> Result<Json<Message>, ApiError> {
    let deleted = app
        .database()
        .delete_bom(bom_id.clone(), app.now())
        .await
        .map_err(error::storage(format!("failed to delete bom {bom_id}")))?;

    if deleted {
        Ok(Message::deleted("BOM"))
    } else {
        Err(error::not_found("bom", &bom_id))
    }
}

/// Cost a BOM against the current catalog.
///
/// The flat cost values every component at its own unit cost. The rolled-up
/// cost replaces that with the rolled-up cost of the component's approved
/// BOM, recursively, skipping any BOM already being expanded.
///
/// # Returns
///
/// - `200 OK`: Both costs
/// - `404 Not Found`: BOM does not exist
/// - `500 Internal Server Error`: Database query failed
async fn get_bom_cost<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { bom_id }): Path<Id<BomId<T>>>,
) -> Result<Json<BomCost<BomId<T>>>, ApiError> {
    let db = app.database();

    let products = db
        .list_products()
        .await
        .map_err(error::storage("failed to list products".to_string()))?;
    let boms = db
        .list_boms()
        .await
        .map_err(error::storage("failed to list boms".to_string()))?;

    let bom = boms
        .iter()
        .find(|bom| bom.id == bom_id)
        .ok_or_else(|| error::not_found("bom", &bom_id))?;

    let resolver = CostResolver::new(&products, &boms);
    Ok(Json(resolver.bom_cost(bom)))
}
