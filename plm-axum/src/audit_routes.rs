//! REST API endpoints for the audit trail.

use crate::{
    ApiApplication, DateTime,
    config::AxumConfig,
    error::{self, ApiError},
};
use aide::axum::{ApiRouter, routing::get};
use axum::{
    Extension, Json,
    extract::{Query, State},
};
use plm_core::{
    models::{AuditEntry, DateTimeRangeQuery, DateTimeRangeResponse},
    ports::AuditRepository as _,
};
use std::sync::Arc;

/// Creates a router with audit endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new().api_route_with("/", get(list_audit::<T>), |route| route.tag("audit"))
}

/// Page through the audit trail, newest first.
///
/// # Query Parameters
///
/// - `before`: only entries at or before this time
/// - `after`: only entries at or after this time
///
/// When more entries match than fit in a page, `more` holds the query for
/// the next page. Entries sharing a timestamp always land on the same page.
///
/// # Returns
///
/// - `200 OK`: A page of audit entries
/// - `500 Internal Server Error`: Database query failed
async fn list_audit<T: ApiApplication>(
    State(app): State<T>,
    Extension(config): Extension<Arc<AxumConfig>>,
    Query(query): Query<DateTimeRangeQuery<DateTime<T>>>,
) -> Result<Json<DateTimeRangeResponse<AuditEntry<DateTime<T>>, DateTime<T>>>, ApiError> {
    app.database()
        .list_audit(query, config.page_limit.get())
        .await
        .map(Json)
        .map_err(error::storage("failed to list audit entries".to_string()))
}
