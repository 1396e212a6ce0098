mod app;

use app::{create_product, product, server, server_with};
use axum::http::StatusCode;
use plm_axum::config::AxumConfig;
use rstest::*;
use serde_json::{Value, json};
use std::time::Duration;

fn close(a: &Value, b: f64) -> bool {
    a.as_f64().is_some_and(|a| (a - b).abs() < 1e-6)
}

#[rstest]
#[test_log::test(tokio::test)]
async fn test_health() {
    let server = server().await;
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({"status": "ok"}));
}

#[rstest]
#[test_log::test(tokio::test)]
async fn test_product_crud() {
    let server = server().await;

    let id = create_product(&server, "Laptop Pro X1", "LPX1-001", 1200.0).await;

    let fetched = server.get(&format!("/products/{id}")).await;
    fetched.assert_status_ok();
    let body = fetched.json::<Value>();
    assert_eq!(body["sku"], "LPX1-001");
    assert_eq!(body["category"], "Uncategorized");
    assert_eq!(body["createdAt"], body["updatedAt"]);

    let mut replacement = product("Laptop Pro X1", "LPX1-001", 1100.0);
    replacement["status"] = json!("Obsolete");
    let updated = server
        .put(&format!("/products/{id}"))
        .json(&replacement)
        .await;
    updated.assert_status_ok();
    let body = updated.json::<Value>();
    assert!(close(&body["cost"], 1100.0));
    assert_eq!(body["status"], "Obsolete");

    let listed = server.get("/products").await.json::<Vec<Value>>();
    assert_eq!(listed.len(), 1);

    let deleted = server.delete(&format!("/products/{id}")).await;
    deleted.assert_status_ok();
    deleted.assert_json(&json!({"message": "Product deleted"}));

    server
        .get(&format!("/products/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .delete(&format!("/products/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[rstest]
#[case::blank_sku(product("Widget", " ", 1.0))]
#[case::negative_cost(product("Widget", "W-1", -1.0))]
#[case::blank_name(product("", "W-1", 1.0))]
#[test_log::test(tokio::test)]
async fn test_invalid_product(#[case] body: Value) {
    let server = server().await;
    server
        .post("/products")
        .json(&body)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert!(server.get("/products").await.json::<Vec<Value>>().is_empty());
}

#[rstest]
#[test_log::test(tokio::test)]
async fn test_duplicate_sku() {
    let server = server().await;
    let first = create_product(&server, "Screw", "SCR-M2-BLK", 0.05).await;
    let second = create_product(&server, "Screen", "SCR-14-4K", 200.0).await;

    server
        .post("/products")
        .json(&product("Another screw", "SCR-M2-BLK", 0.04))
        .await
        .assert_status(StatusCode::CONFLICT);

    // renaming a product onto an existing SKU conflicts too
    server
        .put(&format!("/products/{second}"))
        .json(&product("Screen", "SCR-M2-BLK", 200.0))
        .await
        .assert_status(StatusCode::CONFLICT);

    // keeping your own SKU does not
    server
        .put(&format!("/products/{first}"))
        .json(&product("Screw", "SCR-M2-BLK", 0.06))
        .await
        .assert_status_ok();
}

#[rstest]
#[test_log::test(tokio::test)]
async fn test_malformed_id() {
    let server = server().await;
    server
        .get("/products/not-a-uuid")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[rstest]
#[test_log::test(tokio::test)]
async fn test_bom_costing() {
    let server = server().await;

    let laptop = create_product(&server, "Laptop Pro X1", "LPX1-001", 1200.0).await;
    let motherboard = create_product(&server, "Motherboard X1", "MB-X1-V2", 150.0).await;
    let screen = create_product(&server, "4K Display Panel", "SCR-14-4K", 200.0).await;
    let keyboard = create_product(&server, "Backlit Keyboard", "KB-US-BL", 45.0).await;
    let ssd = create_product(&server, "512GB NVMe SSD", "SSD-512-NV", 80.0).await;
    let chassis = create_product(&server, "Aluminum Chassis", "CHS-X1-AL", 120.0).await;
    let screw = create_product(&server, "M2 Screw", "SCR-M2-BLK", 0.05).await;

    let laptop_bom = server
        .post("/boms")
        .json(&json!({
            "productId": laptop,
            "name": "Laptop Pro X1 BOM",
            "status": "Approved",
            "components": [
                {"componentProductId": motherboard, "quantity": 1, "unit": "pcs"},
                {"componentProductId": screen, "quantity": 1, "unit": "pcs"},
                {"componentProductId": keyboard, "quantity": 1, "unit": "pcs"},
                {"componentProductId": ssd, "quantity": 2, "unit": "pcs"},
                {"componentProductId": chassis, "quantity": 1, "unit": "pcs"},
                {"componentProductId": screw, "quantity": 50, "unit": "pcs"},
            ],
        }))
        .await;
    laptop_bom.assert_status(StatusCode::CREATED);
    let laptop_bom = laptop_bom.json::<Value>();
    let bom_id = laptop_bom["id"].as_str().unwrap();
    assert_eq!(laptop_bom["version"], "1.0");

    let cost = server.get(&format!("/boms/{bom_id}/cost")).await;
    cost.assert_status_ok();
    let cost = cost.json::<Value>();
    assert_eq!(cost["bomId"], bom_id);
    assert!(close(&cost["flatCost"], 677.5));
    assert!(close(&cost["rolledUpCost"], 677.5));

    // approving a motherboard BOM changes the rolled-up cost only
    server
        .post("/boms")
        .json(&json!({
            "productId": motherboard,
            "name": "Motherboard BOM",
            "status": "Approved",
            "components": [
                {"componentProductId": ssd, "quantity": 1},
                {"componentProductId": screw, "quantity": 20},
            ],
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let cost = server.get(&format!("/boms/{bom_id}/cost")).await.json::<Value>();
    assert!(close(&cost["flatCost"], 677.5));
    assert!(close(&cost["rolledUpCost"], 608.5));

    let product_cost = server
        .get(&format!("/products/{laptop}/cost"))
        .await
        .json::<Value>();
    assert!(close(&product_cost["unitCost"], 1200.0));
    assert_eq!(product_cost["bomId"], bom_id);
    assert!(close(&product_cost["rolledUpCost"], 608.5));

    let leaf_cost = server
        .get(&format!("/products/{screen}/cost"))
        .await
        .json::<Value>();
    assert!(close(&leaf_cost["unitCost"], 200.0));
    assert!(leaf_cost.get("bomId").is_none());
    assert!(leaf_cost.get("rolledUpCost").is_none());

    let deleted = server.delete(&format!("/boms/{bom_id}")).await;
    deleted.assert_json(&json!({"message": "BOM deleted"}));
    server
        .get(&format!("/boms/{bom_id}/cost"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[rstest]
#[test_log::test(tokio::test)]
async fn test_cyclic_boms() {
    let server = server().await;
    let a = create_product(&server, "Assembly A", "ASM-A", 10.0).await;
    let b = create_product(&server, "Assembly B", "ASM-B", 20.0).await;

    let bom_a = server
        .post("/boms")
        .json(&json!({
            "productId": a,
            "name": "A",
            "status": "Approved",
            "components": [{"componentProductId": b, "quantity": 1}],
        }))
        .await
        .json::<Value>();
    server
        .post("/boms")
        .json(&json!({
            "productId": b,
            "name": "B",
            "status": "Approved",
            "components": [{"componentProductId": a, "quantity": 1}],
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let cost = server
        .get(&format!("/boms/{}/cost", bom_a["id"].as_str().unwrap()))
        .await;
    cost.assert_status_ok();
    let cost = cost.json::<Value>();
    assert!(close(&cost["flatCost"], 20.0));
    // B's BOM refers back to A, whose BOM is already being expanded and
    // contributes nothing
    assert!(close(&cost["rolledUpCost"], 0.0));
}

#[rstest]
#[test_log::test(tokio::test)]
async fn test_suppliers() {
    let server = server().await;

    server
        .post("/suppliers")
        .json(&json!({"name": "Bad Rating", "rating": 9}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let created = server
        .post("/suppliers")
        .json(&json!({
            "name": "TechComponents Inc.",
            "contactName": "John Smith",
            "email": "john@techcomp.com",
            "status": "Approved",
        }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let supplier = created.json::<Value>();
    assert_eq!(supplier["rating"], 3);
    let id = supplier["id"].as_str().unwrap();

    let updated = server
        .put(&format!("/suppliers/{id}"))
        .json(&json!({"name": "TechComponents Inc.", "status": "Blacklisted", "rating": 1}))
        .await
        .json::<Value>();
    assert_eq!(updated["status"], "Blacklisted");
    assert_eq!(updated["contactName"], "");

    server
        .delete(&format!("/suppliers/{id}"))
        .await
        .assert_json(&json!({"message": "Supplier deleted"}));
}

#[rstest]
#[test_log::test(tokio::test)]
async fn test_eco_workflow() {
    let server = server().await;
    let laptop = create_product(&server, "Laptop Pro X1", "LPX1-001", 1200.0).await;

    let eco = server
        .post("/ecos")
        .json(&json!({
            "title": "Upgrade SSD to 1TB",
            "priority": "High",
            "productIds": [laptop],
            "initiatorId": "engineer-1",
        }))
        .await;
    eco.assert_status(StatusCode::CREATED);
    let eco = eco.json::<Value>();
    assert_eq!(eco["status"], "Draft");
    let transition = format!("/ecos/{}/transition", eco["id"].as_str().unwrap());

    // drafts cannot be approved directly
    server
        .post(&transition)
        .json(&json!({"status": "Approved", "userId": "dgm-1", "role": "DGM"}))
        .await
        .assert_status(StatusCode::CONFLICT);

    let submitted = server
        .post(&transition)
        .json(&json!({"status": "Pending Review", "userId": "engineer-1", "role": "ENGINEER"}))
        .await;
    submitted.assert_status_ok();
    let submitted = submitted.json::<Value>();
    assert_eq!(submitted["status"], "Pending Review");
    assert_eq!(submitted["approvals"], json!([]));

    server
        .post(&transition)
        .json(&json!({"status": "Approved", "userId": "engineer-1", "role": "ENGINEER"}))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let approved = server
        .post(&transition)
        .json(&json!({
            "status": "Approved",
            "userId": "dgm-1",
            "role": "DGM",
            "comments": "Looks good",
        }))
        .await;
    approved.assert_status_ok();
    let approved = approved.json::<Value>();
    assert_eq!(approved["status"], "Approved");
    let approvals = approved["approvals"].as_array().unwrap();
    assert_eq!(approvals.len(), 1);
    assert_eq!(approvals[0]["userId"], "dgm-1");
    assert_eq!(approvals[0]["role"], "DGM");
    assert_eq!(approvals[0]["status"], "Approved");
    assert_eq!(approvals[0]["comments"], "Looks good");

    let implemented = server
        .post(&transition)
        .json(&json!({"status": "Implemented", "userId": "engineer-1", "role": "ENGINEER"}))
        .await
        .json::<Value>();
    assert_eq!(implemented["status"], "Implemented");

    let id = eco["id"].as_str().unwrap();
    server
        .delete(&format!("/ecos/{id}"))
        .await
        .assert_json(&json!({"message": "ECO deleted"}));
    server
        .post(&transition)
        .json(&json!({"status": "Draft", "userId": "admin", "role": "ADMIN"}))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[rstest]
#[test_log::test(tokio::test)]
async fn test_quality() {
    let server = server().await;

    let ncr = server
        .post("/quality/ncrs")
        .json(&json!({
            "title": "Scratched chassis",
            "severity": "High",
            "reportedBy": "qa-1",
        }))
        .await;
    ncr.assert_status(StatusCode::CREATED);
    let ncr = ncr.json::<Value>();
    assert_eq!(ncr["status"], "Open");
    let ncr_id = ncr["id"].as_str().unwrap();

    let investigating = server
        .put(&format!("/quality/ncrs/{ncr_id}"))
        .json(&json!({
            "title": "Scratched chassis",
            "severity": "High",
            "status": "Investigating",
            "reportedBy": "qa-1",
        }))
        .await
        .json::<Value>();
    assert_eq!(investigating["status"], "Investigating");

    let capa = server
        .post("/quality/capas")
        .json(&json!({
            "ncrId": ncr_id,
            "title": "Add protective film",
            "rootCause": "No packaging between units",
        }))
        .await;
    capa.assert_status(StatusCode::CREATED);
    let capa = capa.json::<Value>();
    assert_eq!(capa["status"], "Draft");
    assert_eq!(capa["ncrId"], ncr_id);

    // a CAPA must point at a report that exists
    let unknown = uuid::Uuid::new_v4();
    server
        .post("/quality/capas")
        .json(&json!({"ncrId": unknown, "title": "Orphan"}))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // but need not point at one at all
    server
        .post("/quality/capas")
        .json(&json!({"title": "Supplier audit"}))
        .await
        .assert_status(StatusCode::CREATED);

    let capas = server.get("/quality/capas").await.json::<Vec<Value>>();
    assert_eq!(capas.len(), 2);
    assert_eq!(capas[0]["id"], capa["id"]);
}

#[rstest]
#[test_log::test(tokio::test)]
async fn test_capa_update_checks_ncr() {
    let server = server().await;

    let capa = server
        .post("/quality/capas")
        .json(&json!({"title": "Fix"}))
        .await;
    capa.assert_status(StatusCode::CREATED);
    let capa_id = capa.json::<Value>()["id"].as_str().unwrap().to_owned();

    server
        .put(&format!("/quality/capas/{capa_id}"))
        .json(&json!({"title": "Fix", "ncrId": uuid::Uuid::new_v4()}))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let stored = server
        .get(&format!("/quality/capas/{capa_id}"))
        .await
        .json::<Value>();
    assert!(stored.get("ncrId").is_none());

    let ncr = server
        .post("/quality/ncrs")
        .json(&json!({"title": "Loose hinge"}))
        .await
        .json::<Value>();
    let linked = server
        .put(&format!("/quality/capas/{capa_id}"))
        .json(&json!({"title": "Fix", "ncrId": ncr["id"]}))
        .await;
    linked.assert_status_ok();
    assert_eq!(linked.json::<Value>()["ncrId"], ncr["id"]);
}

#[rstest]
#[test_log::test(tokio::test)]
async fn test_summary() {
    let server = server().await;
    create_product(&server, "Laptop Pro X1", "LPX1-001", 1200.0).await;
    create_product(&server, "M2 Screw", "SCR-M2-BLK", 0.05).await;
    server
        .post("/ecos")
        .json(&json!({"title": "Upgrade SSD"}))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/quality/ncrs")
        .json(&json!({"title": "Scratched chassis", "severity": "Critical"}))
        .await
        .assert_status(StatusCode::CREATED);

    let summary = server.get("/analytics/summary").await;
    summary.assert_status_ok();
    let summary = summary.json::<Value>();
    assert_eq!(summary["productCount"], 2);
    // price is 1.5 * cost, valued at 100 units each
    assert!(close(&summary["inventoryValue"], (1800.0 + 0.075) * 100.0));
    assert_eq!(summary["productsByStatus"]["Active"], 2);
    assert_eq!(summary["productsByStatus"]["Draft"], 0);
    assert_eq!(summary["topCostProducts"][0]["sku"], "LPX1-001");
    assert_eq!(summary["activeEcos"], 1);
    assert_eq!(summary["openNcrs"], 1);
    assert_eq!(summary["ncrsBySeverity"]["Critical"], 1);
}

#[rstest]
#[test_log::test(tokio::test)]
async fn test_audit_pagination() {
    let server = server_with(AxumConfig {
        page_limit: 2.try_into().unwrap(),
        ..Default::default()
    })
    .await;

    let mut ids = Vec::new();
    for (name, sku) in [("One", "P-1"), ("Two", "P-2"), ("Three", "P-3")] {
        ids.push(create_product(&server, name, sku, 1.0).await);
        tokio::time::sleep(Duration::from_millis(2)).await;
    }

    let first = server.get("/audit").await;
    first.assert_status_ok();
    let first = first.json::<Value>();
    let results = first["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["action"], "CREATE_PRODUCT");
    assert_eq!(results[0]["entity"], "product");
    assert_eq!(results[0]["entityId"], ids[2]);
    assert_eq!(results[1]["entityId"], ids[1]);

    let before = first["more"]["before"].as_str().unwrap();
    let second = server
        .get("/audit")
        .add_query_param("before", before)
        .await
        .json::<Value>();
    let results = second["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["entityId"], ids[0]);
    assert!(second.get("more").is_none());
}

#[rstest]
#[test_log::test(tokio::test)]
async fn test_openapi_document() {
    let server = server().await;
    let response = server.get("/docs/api.json").await;
    response.assert_status_ok();
    let document = response.json::<Value>();
    assert_eq!(document["info"]["title"], "PLM API");
    for path in [
        "/products/{product_id}/cost",
        "/boms/{bom_id}/cost",
        "/ecos/{eco_id}/transition",
        "/quality/capas",
        "/analytics/summary",
    ] {
        assert!(document["paths"].get(path).is_some(), "missing {path}");
    }

    // the standalone document matches the one being served
    let standalone = serde_json::to_value(plm_axum::openapi::<app::TestApp>()).unwrap();
    assert_eq!(standalone["paths"], document["paths"]);
}
