//! REST API endpoints for suppliers.

use crate::{
    ApiApplication, DateTime, Message, SupplierId,
    error::{self, ApiError},
};
use aide::axum::{ApiRouter, routing::get};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use plm_core::{
    models::{Record, SupplierData, Validate as _},
    ports::SupplierRepository as _,
};

type SupplierRecord<T> = Record<SupplierId<T>, DateTime<T>, SupplierData>;

/// Creates a router with supplier-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with(
            "/",
            get(list_suppliers::<T>).post(create_supplier::<T>),
            |route| route.tag("suppliers"),
        )
        .api_route_with(
            "/{supplier_id}",
            get(get_supplier::<T>)
                .put(update_supplier::<T>)
                .delete(delete_supplier::<T>),
            |route| route.tag("suppliers"),
        )
}

/// Path parameter for supplier-specific endpoints.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
struct Id<T> {
    /// The unique identifier of the supplier
    supplier_id: T,
}

async fn list_suppliers<T: ApiApplication>(
    State(app): State<T>,
) -> Result<Json<Vec<SupplierRecord<T>>>, ApiError> {
    app.database()
        .list_suppliers()
        .await
        .map(Json)
        .map_err(error::storage("failed to list suppliers".to_string()))
}

/// Register a new supplier.
///
/// # Returns
///
/// - `201 Created`: The stored supplier
/// - `400 Bad Request`: The name is blank or the rating is outside 1 to 5
/// - `500 Internal Server Error`: Database operation failed
async fn create_supplier<T: ApiApplication>(
    State(app): State<T>,
    Json(data): Json<SupplierData>,
) -> Result<(StatusCode, Json<SupplierRecord<T>>), ApiError> {
    data.validate().map_err(error::invalid)?;

    let (supplier_id, as_of) = app.generate_supplier_id();
    let record = app
        .database()
        .create_supplier(supplier_id, data, as_of)
        .await
        .map_err(error::storage("failed to create supplier".to_string()))?;

    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_supplier<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { supplier_id }): Path<Id<SupplierId<T>>>,
) -> Result<Json<SupplierRecord<T>>, ApiError> {
    app.database()
        .get_supplier(supplier_id.clone())
        .await
        .map_err(error::storage(format!("failed to get supplier {supplier_id}")))?
        .map(Json)
        .ok_or_else(|| error::not_found("supplier", &supplier_id))
}

async fn update_supplier<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { supplier_id }): Path<Id<SupplierId<T>>>,
    Json(data): Json<SupplierData>,
) -> Result<Json<SupplierRecord<T>>, ApiError> {
    data.validate().map_err(error::invalid)?;

    app.database()
        .update_supplier(supplier_id.clone(), data, app.now())
        .await
        .map_err(error::storage(format!(
            "failed to update supplier {supplier_id}"
        )))?
        .map(Json)
        .ok_or_else(|| error::not_found("supplier", &supplier_id))
}

async fn delete_supplier<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { supplier_id }): Path<Id<SupplierId<T>>>,
) -> Result<Json<Message>, ApiError> {
    let deleted = app
        .database()
        .delete_supplier(supplier_id.clone(), app.now())
        .await
        .map_err(error::storage(format!(
            "failed to delete supplier {supplier_id}"
        )))?;

    if deleted {
        Ok(Message::deleted("Supplier"))
    } else {
        Err(error::not_found("supplier", &supplier_id))
    }
}
