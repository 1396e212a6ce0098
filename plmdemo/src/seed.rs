//! The demo catalog: a gaming laptop, its parts, two suppliers, the laptop's
//! approved BOM, one open change order and one quality report.

use plm_core::{
    models::{
        BomComponent, BomData, BomStatus, EcoData, EcoPriority, EcoStatus, NcrData, NcrStatus,
        ProductData, ProductStatus, Severity, SupplierData, SupplierStatus,
    },
    ports::{
        Application, BomRepository as _, EcoRepository as _, ProductRepository as _,
        QualityRepository as _, Repository, SupplierRepository as _,
    },
};

type Repo<T> = <T as Application>::Repository;
type Error<T> = <Repo<T> as Repository>::Error;

const PRODUCTS: [(&str, &str, &str, f64, f64, &str); 7] = [
    (
        "Gaming Laptop Pro 15",
        "High-performance gaming laptop with RTX 4080.",
        "GL-PRO-15",
        1200.00,
        2499.99,
        "Electronics",
    ),
    (
        "Motherboard Z790",
        "Advanced motherboard for 13th gen processors.",
        "MB-Z790-X",
        150.00,
        350.00,
        "Electronics",
    ),
    (
        "OLED Screen Panel 15.6\"",
        "4K OLED display panel with 120Hz refresh rate.",
        "PNL-OLED-15",
        200.00,
        400.00,
        "Electronics",
    ),
    (
        "Mechanical Keyboard Module",
        "RGB backlit mechanical keyboard with blue switches.",
        "KB-MECH-RGB",
        45.00,
        120.00,
        "Electronics",
    ),
    (
        "M.2 SSD 2TB",
        "High-speed NVMe SSD storage.",
        "SSD-M2-2TB",
        80.00,
        180.00,
        "Electronics",
    ),
    (
        "Chassis Aluminum Alloy",
        "CNC machined aluminum chassis.",
        "CHS-AL-15",
        120.00,
        300.00,
        "Mechanical",
    ),
    (
        "Screw M2x4",
        "Standard M2 screw for assembly.",
        "SCR-M2-4",
        0.05,
        0.10,
        "Mechanical",
    ),
];

/// Quantity of each part (by position in [`PRODUCTS`]) in one laptop.
const LAPTOP_BOM: [(usize, f64); 6] = [
    (1, 1.0),
    (2, 1.0),
    (3, 1.0),
    (4, 2.0),
    (5, 1.0),
    (6, 50.0),
];

fn supplier(
    name: &str,
    contact_name: &str,
    email: &str,
    phone: &str,
    address: &str,
    rating: u8,
) -> SupplierData {
    SupplierData {
        name: name.into(),
        contact_name: contact_name.into(),
        email: email.into(),
        phone: phone.into(),
        address: address.into(),
        status: SupplierStatus::Approved,
        rating,
    }
}

/// Load the demo catalog.
///
/// Seeding only ever fills an empty catalog: if any product exists, nothing
/// is written and `Ok(false)` is returned.
pub async fn seed<T: Application>(app: &T) -> Result<bool, Error<T>>
where
    <Repo<T> as Repository>::ProductId: Clone,
{
    let db = app.database();

    if !db.list_products().await?.is_empty() {
        tracing::warn!("catalog is not empty, skipping seed");
        return Ok(false);
    }

    for data in [
        supplier(
            "TechComponents Inc.",
            "Alice Smith",
            "alice@techcomponents.com",
            "+1 (555) 123-4567",
            "123 Tech Blvd, Silicon Valley, CA",
            5,
        ),
        supplier(
            "ScreenMaster Ltd.",
            "Bob Jones",
            "bob@screenmaster.com",
            "+44 20 7946 0123",
            "456 Circuit Rd, London, UK",
            4,
        ),
    ] {
        let (supplier_id, as_of) = app.generate_supplier_id();
        db.create_supplier(supplier_id, data, as_of).await?;
    }

    let mut products = Vec::with_capacity(PRODUCTS.len());
    for (name, description, sku, cost, price, category) in PRODUCTS {
        let data = ProductData {
            name: name.into(),
            description: description.into(),
            sku: sku.into(),
            cost,
            price,
            supplier_id: None,
            category: category.into(),
            status: ProductStatus::Active,
            image_url: None,
            attachments: Vec::new(),
        };
        let (product_id, as_of) = app.generate_product_id();
        let record = db.create_product(product_id, data, as_of).await?;
        products.push(record.id);
    }

    let laptop = products[0].clone();
    let screen = products[2].clone();

    let components = LAPTOP_BOM
        .iter()
        .map(|&(part, quantity)| BomComponent {
            component_product_id: products[part].clone(),
            quantity,
            unit: "pcs".into(),
        })
        .collect();
    let (bom_id, as_of) = app.generate_bom_id();
    db.create_bom(
        bom_id,
        BomData {
            product_id: laptop.clone(),
            name: "Gaming Laptop BOM".into(),
            version: "1.0".into(),
            status: BomStatus::Approved,
            components,
        },
        as_of,
    )
    .await?;

    let (eco_id, as_of) = app.generate_eco_id();
    db.create_eco(
        eco_id,
        EcoData {
            title: "Replace Screen Panel Vendor".into(),
            description: "Switching to ScreenMaster Ltd for better color accuracy.".into(),
            status: EcoStatus::PendingApproval,
            priority: EcoPriority::High,
            product_ids: vec![laptop],
            initiator_id: "u2".into(),
            approvals: Vec::new(),
        },
        as_of,
    )
    .await?;

    let (ncr_id, as_of) = app.generate_ncr_id();
    db.create_ncr(
        ncr_id,
        NcrData {
            title: "Cracked Screen Panel".into(),
            description: "Batch of screens arrived with hairline cracks.".into(),
            product_id: Some(screen),
            supplier_id: None,
            severity: Severity::Critical,
            status: NcrStatus::Open,
            reported_by: "u2".into(),
            images: Vec::new(),
        },
        as_of,
    )
    .await?;

    tracing::info!(products = PRODUCTS.len(), "seeded demo catalog");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::DemoApp;
    use plm_core::{
        analytics::summarize,
        costing::CostResolver,
        ports::{
            AuditRepository as _, BomRepository as _, EcoRepository as _,
            ProductRepository as _, QualityRepository as _, SupplierRepository as _,
        },
    };
    use plm_sqlite::{Db, config::SqliteConfig};

    async fn app() -> DemoApp {
        DemoApp {
            db: Db::open(&SqliteConfig::default()).await.unwrap(),
        }
    }

    #[tokio::test]
    async fn test_seeded_catalog() {
        let app = app().await;
        assert!(seed(&app).await.unwrap());

        let db = app.database();
        let products = db.list_products().await.unwrap();
        let boms = db.list_boms().await.unwrap();
        assert_eq!(products.len(), 7);
        assert_eq!(db.list_suppliers().await.unwrap().len(), 2);

        let resolver = CostResolver::new(&products, &boms);
        let cost = resolver.bom_cost(&boms[0]);
        assert!((cost.flat_cost - 677.5).abs() < 1e-9);
        assert_eq!(cost.flat_cost, cost.rolled_up_cost);

        let ecos = db.list_ecos().await.unwrap();
        let ncrs = db.list_ncrs().await.unwrap();
        let summary = summarize(&products, &ecos, &ncrs);
        assert_eq!(summary.active_ecos, 1);
        assert_eq!(summary.open_ncrs, 1);
        assert_eq!(summary.top_cost_products[0].sku, "GL-PRO-15");
    }

    #[tokio::test]
    async fn test_seed_only_fills_an_empty_catalog() {
        let app = app().await;
        assert!(seed(&app).await.unwrap());
        assert!(!seed(&app).await.unwrap());
        assert_eq!(app.database().list_products().await.unwrap().len(), 7);

        // 2 suppliers, 7 products, 1 BOM, 1 ECO, 1 NCR
        let audit = app
            .database()
            .list_audit(Default::default(), 100)
            .await
            .unwrap();
        assert_eq!(audit.results.len(), 12);
    }
}
