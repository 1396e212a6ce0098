#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the plm-axum crate.
//! [plm_core]: https://docs.rs/plm_core/latest/plm_core/index.html
//! [plm_axum]: https://docs.rs/plm_axum/latest/plm_axum/index.html
//! [plm_sqlite]: https://docs.rs/plm_sqlite/latest/plm_sqlite/index.html
#![doc = include_str!("../README.md")]

mod analytics_routes;
mod audit_routes;
mod bom_routes;
mod eco_routes;
mod error;
mod product_routes;
mod quality_routes;
mod supplier_routes;

use aide::{
    axum::{ApiRouter, routing::get},
    openapi::OpenApi,
};
use axum::{Extension, Json, http::header};
use plm_core::ports::{Application, Repository};
use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};
use std::{
    fmt::{Debug, Display},
    hash::Hash,
    sync::Arc,
};
use tower_http::{cors, trace::TraceLayer};

mod openapi;
use openapi::{api_docs, docs_routes};

pub mod config;
use config::AxumConfig;

/// Response for the health check endpoint
#[derive(Serialize, JsonSchema)]
#[schemars(inline)]
struct HealthResponse {
    status: String,
}

/// Simple health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Construct a full API router with the given state and config
pub fn router<T: ApiApplication>(state: T, config: AxumConfig) -> axum::Router {
    // The browser client lives on another origin; nothing here relies on
    // ambient credentials, so any origin may call in.
    let policy = cors::CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods(cors::Any)
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let mut api = OpenApi::default();
    api_router()
        .finish_api_with(&mut api, api_docs)
        .layer(Extension(Arc::new(api))) // Arc is very important here or you will face massive memory and performance issues
        .layer(Extension(Arc::new(config)))
        .layer(TraceLayer::new_for_http())
        .layer(policy)
        .with_state(state)
}

/// The OpenAPI document describing the routes served by [`router`].
pub fn openapi<T: ApiApplication>() -> OpenApi {
    let mut api = OpenApi::default();
    // Finishing fills in `api`; the router itself is not served.
    let _router = api_router::<T>().finish_api_with(&mut api, api_docs);
    api
}

fn api_router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route("/health", get(health_check))
        .nest("/products", product_routes::router())
        .nest("/boms", bom_routes::router())
        .nest("/suppliers", supplier_routes::router())
        .nest("/ecos", eco_routes::router())
        .nest("/quality", quality_routes::router())
        .nest("/analytics", analytics_routes::router())
        .nest("/audit", audit_routes::router())
        .nest_api_service("/docs", docs_routes())
}

/// Starts the HTTP server with the provided configuration
pub async fn start_server<T: ApiApplication>(
    config: AxumConfig,
    app: T,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    tracing::info!("Listening for requests on {}", listener.local_addr()?);

    let service = router(app, config);
    axum::serve(listener, service).await
}

/// The bounds every identifier and timestamp must meet to cross the API:
/// path extraction, JSON in both directions and schema generation.
pub trait ApiValue:
    Clone + Display + Serialize + DeserializeOwned + JsonSchema + Send + Sync + 'static
{
}

impl<T> ApiValue for T where
    T: Clone + Display + Serialize + DeserializeOwned + JsonSchema + Send + Sync + 'static
{
}

/// Axum imposes all sorts of constraints on what can pass for state. This
/// trait, coupled with a blanket implementation, specifies it all upfront and
/// in one place. If a function takes a generic `T: ApiApplication`, then
/// everything one might reasonably want to do should work.
pub trait ApiApplication:
    Clone
    + Send
    + Sync
    + 'static
    + Application<
        Repository: Clone
                        + Send
                        + Sync
                        + 'static
                        + Repository<
            DateTime: ApiValue,
            ProductId: ApiValue + Eq + Hash,
            BomId: ApiValue + Eq + Hash + Debug,
            SupplierId: ApiValue,
            EcoId: ApiValue,
            NcrId: ApiValue,
            CapaId: ApiValue,
        >,
    >
{
}

// this is the blanket implementation
impl<T: Clone + Send + Sync + 'static> ApiApplication for T where
    T: Application<
            Repository: Clone
                            + Send
                            + Sync
                            + 'static
                            + Repository<
                DateTime: ApiValue,
                ProductId: ApiValue + Eq + Hash,
                BomId: ApiValue + Eq + Hash + Debug,
                SupplierId: ApiValue,
                EcoId: ApiValue,
                NcrId: ApiValue,
                CapaId: ApiValue,
            >,
        >
{
}

type Repo<T> = <T as Application>::Repository;
type DateTime<T> = <Repo<T> as Repository>::DateTime;
type ProductId<T> = <Repo<T> as Repository>::ProductId;
type BomId<T> = <Repo<T> as Repository>::BomId;
type SupplierId<T> = <Repo<T> as Repository>::SupplierId;
type EcoId<T> = <Repo<T> as Repository>::EcoId;
type NcrId<T> = <Repo<T> as Repository>::NcrId;
type CapaId<T> = <Repo<T> as Repository>::CapaId;

/// Response body of a successful delete
#[derive(Serialize, JsonSchema)]
struct Message {
    message: String,
}

impl Message {
    fn deleted(entity: &str) -> Json<Self> {
        Json(Self {
            message: format!("{entity} deleted"),
        })
    }
}
