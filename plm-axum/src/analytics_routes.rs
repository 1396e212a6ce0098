//! Dashboard aggregates.

use crate::{
    ApiApplication,
    error::{self, ApiError},
};
use aide::axum::{ApiRouter, routing::get};
use axum::{Json, extract::State};
use plm_core::{
    analytics::{Summary, summarize},
    ports::{EcoRepository as _, ProductRepository as _, QualityRepository as _},
};

/// Creates a router with analytics endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new().api_route_with("/summary", get(get_summary::<T>), |route| {
        route.tag("analytics")
    })
}

/// Summarize the catalog, open change orders and quality reports.
///
/// # Returns
///
/// - `200 OK`: Counts per status and severity, inventory value and the most
///   expensive products
/// - `500 Internal Server Error`: Database query failed
async fn get_summary<T: ApiApplication>(State(app): State<T>) -> Result<Json<Summary>, ApiError> {
    let db = app.database();

    let products = db
        .list_products()
        .await
        .map_err(error::storage("failed to list products".to_string()))?;
    let ecos = db
        .list_ecos()
        .await
        .map_err(error::storage("failed to list ecos".to_string()))?;
    let ncrs = db
        .list_ncrs()
        .await
        .map_err(error::storage("failed to list ncrs".to_string()))?;

    Ok(Json(summarize(&products, &ecos, &ncrs)))
}
