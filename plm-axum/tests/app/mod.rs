mod application;
pub use application::TestApp;

use axum_test::TestServer;
use plm_axum::{config::AxumConfig, router};
use plm_sqlite::{Db, config::SqliteConfig};
use serde_json::{Value, json};

/// A server over a fresh in-memory database.
pub async fn server() -> TestServer {
    server_with(AxumConfig::default()).await
}

pub async fn server_with(config: AxumConfig) -> TestServer {
    let db = Db::open(&SqliteConfig::default()).await.unwrap();
    TestServer::new(router(TestApp(db), config)).unwrap()
}

pub fn product(name: &str, sku: &str, cost: f64) -> Value {
    json!({
        "name": name,
        "sku": sku,
        "cost": cost,
        "price": cost * 1.5,
        "status": "Active",
    })
}

/// Create a product and return its id.
pub async fn create_product(server: &TestServer, name: &str, sku: &str, cost: f64) -> String {
    let response = server.post("/products").json(&product(name, sku, cost)).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"].as_str().unwrap().to_string()
}
