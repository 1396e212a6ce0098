//! REST API endpoints for the product catalog.
//!
//! Products are the parts, sub-assemblies and finished goods that bills of
//! materials are built from. Besides plain CRUD, a product's cost can be
//! rolled up through its approved BOM.

use crate::{
    ApiApplication, BomId, DateTime, Message, ProductId, SupplierId,
    error::{self, ApiError},
};
use aide::axum::{ApiRouter, routing::get};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use plm_core::{
    costing::{CostResolver, ProductCost},
    models::{ProductData, Record, Validate as _},
    ports::{BomRepository as _, ProductRepository as _},
};

type Data<T> = ProductData<SupplierId<T>, DateTime<T>>;
type ProductRecord<T> = Record<ProductId<T>, DateTime<T>, Data<T>>;

/// Creates a router with product-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with(
            "/",
            get(list_products::<T>).post(create_product::<T>),
            |route| route.tag("products"),
        )
        .api_route_with(
            "/{product_id}",
            get(get_product::<T>)
                .put(update_product::<T>)
                .delete(delete_product::<T>),
            |route| route.tag("products"),
        )
        .api_route_with(
            "/{product_id}/cost",
            get(get_product_cost::<T>),
            |route| route.tag("products").tag("costing"),
        )
}

/// Path parameter for product-specific endpoints.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
struct Id<T> {
    /// The unique identifier of the product
    product_id: T,
}

/// List every product, oldest first.
///
/// # Returns
///
/// - `200 OK`: The product catalog
/// - `500 Internal Server Error`: Database query failed
async fn list_products<T: ApiApplication>(
    State(app): State<T>,
) -> Result<Json<Vec<ProductRecord<T>>>, ApiError> {
    app.database()
        .list_products()
        .await
        .map(Json)
        .map_err(error::storage("failed to list products".to_string()))
}

/// Create a new product.
///
/// The identifier is generated by the server.
///
/// # Returns
///
/// - `201 Created`: The stored product
/// - `400 Bad Request`: A required field is blank or a cost or price is negative
/// - `409 Conflict`: Another product already uses the SKU
/// - `500 Internal Server Error`: Database operation failed
async fn create_product<T: ApiApplication>(
    State(app): State<T>,
    Json(data): Json<Data<T>>,
) -> Result<(StatusCode, Json<ProductRecord<T>>), ApiError> {
    data.validate().map_err(error::invalid)?;

    let (product_id, as_of) = app.generate_product_id();
    let record = app
        .database()
        .create_product(product_id, data, as_of)
        .await
        .map_err(error::storage("failed to create product".to_string()))?;

    tracing::info!(product_id = %record.id, sku = %record.data.sku, "product created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// Retrieve a single product.
///
/// # Returns
///
/// - `200 OK`: The product
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database query failed
async fn get_product<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { product_id }): Path<Id<ProductId<T>>>,
) -> Result<Json<ProductRecord<T>>, ApiError> {
    app.database()
        .get_product(product_id.clone())
        .await
        .map_err(error::storage(format!("failed to get product {product_id}")))?
        .map(Json)
        .ok_or_else(|| error::not_found("product", &product_id))
}

/// Replace a product's data.
///
/// # Returns
///
/// - `200 OK`: The updated product
/// - `400 Bad Request`: The new data is invalid
/// - `404 Not Found`: Product does not exist
/// - `409 Conflict`: Another product already uses the SKU
/// - `500 Internal Server Error`: Database operation failed
async fn update_product<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { product_id }): Path<Id<ProductId<T>>>,
    Json(data): Json<Data<T>>,
) -> Result<Json<ProductRecord<T>>, ApiError> {
    data.validate().map_err(error::invalid)?;

    app.database()
        .update_product(product_id.clone(), data, app.now())
        .await
        .map_err(error::storage(format!("failed to update product {product_id}")))?
        .map(Json)
        .ok_or_else(|| error::not_found("product", &product_id))
}

/// Delete a product.
///
/// BOMs that list the product as a component are left untouched; costing
/// treats the missing product as contributing nothing.
///
/// # Returns
///
/// - `200 OK`: `{"message": "Product deleted"}`
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database operation failed
async fn delete_product<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { product_id }): Path<Id<ProductId<T>>>,
) -> Result<Json<Message>, ApiError> {
    let deleted = app
        .database()
        .delete_product(product_id.clone(), app.now())
        .await
        .map_err(error::storage(format!("failed to delete product {product_id}")))?;

    if deleted {
        Ok(Message::deleted("Product"))
    } else {
        Err(error::not_found("product", &product_id))
    }
}

/// Cost one unit of a product.
///
/// Reports the unit cost recorded on the product and, when the product has
/// an approved BOM, the cost rolled up through it over the current catalog.
///
/// # Returns
///
/// - `200 OK`: The product's costs
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database query failed
async fn get_product_cost<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { product_id }): Path<Id<ProductId<T>>>,
) -> Result<Json<ProductCost<ProductId<T>, BomId<T>>>, ApiError> {
    let db = app.database();

    let product = db
        .get_product(product_id.clone())
        .await
        .map_err(error::storage(format!("failed to get product {product_id}")))?
        .ok_or_else(|| error::not_found("product", &product_id))?;

    let products = db
        .list_products()
        .await
        .map_err(error::storage("failed to list products".to_string()))?;
    let boms = db
        .list_boms()
        .await
        .map_err(error::storage("failed to list boms".to_string()))?;

    let resolver = CostResolver::new(&products, &boms);
    Ok(Json(resolver.product_cost(&product)))
}
