mod common;

use common::{TestApp, bom, product};
use plm_core::{
    costing::CostResolver,
    models::BomStatus,
    ports::{Application, BomRepository, ProductRepository},
};

/// Costs computed over snapshots read back from the database match the
/// in-memory figures, including first-match selection in insertion order.
#[tokio::test]
async fn test_costs_over_stored_snapshots() -> anyhow::Result<()> {
    let app = TestApp::open().await?;
    let db = app.database();

    let mut ids = Vec::new();
    for (sku, cost) in [
        ("LPX1-001", 1200.0),
        ("MB-X1-V2", 150.0),
        ("SCR-14-4K", 200.0),
        ("SSD-512-NV", 80.0),
        ("SCR-M2-BLK", 0.05),
    ] {
        let (id, now) = app.generate_product_id();
        db.create_product(id, product(sku, cost), now).await?;
        ids.push(id);
    }
    let [laptop, motherboard, screen, ssd, screw] = ids[..] else {
        unreachable!()
    };

    // the motherboard is itself assembled from screws and an ssd
    let (draft_id, now) = app.generate_bom_id();
    db.create_bom(draft_id, bom(motherboard, BomStatus::Draft, &[(screw, 1000.0)]), now)
        .await?;
    let (mb_bom_id, now) = app.generate_bom_id();
    db.create_bom(
        mb_bom_id,
        bom(motherboard, BomStatus::Approved, &[(ssd, 1.0), (screw, 20.0)]),
        now,
    )
    .await?;
    let (later_id, now) = app.generate_bom_id();
    db.create_bom(later_id, bom(motherboard, BomStatus::Approved, &[(ssd, 9.0)]), now)
        .await?;

    let (laptop_bom_id, now) = app.generate_bom_id();
    db.create_bom(
        laptop_bom_id,
        bom(
            laptop,
            BomStatus::Approved,
            &[(motherboard, 1.0), (screen, 1.0), (screw, 50.0)],
        ),
        now,
    )
    .await?;

    let products = db.list_products().await?;
    let boms = db.list_boms().await?;
    let resolver = CostResolver::new(&products, &boms);

    assert_eq!(resolver.approved_bom(&motherboard).map(|b| b.id), Some(mb_bom_id));

    let laptop_bom = db.get_bom(laptop_bom_id).await?.expect("bom should exist");
    let cost = resolver.bom_cost(&laptop_bom);
    assert_eq!(cost.bom_id, laptop_bom_id);
    assert!((cost.flat_cost - (150.0 + 200.0 + 2.5)).abs() < 1e-9);
    // motherboard rolls up to 80 + 20 * 0.05 = 81
    assert!((cost.rolled_up_cost - (81.0 + 200.0 + 2.5)).abs() < 1e-9);

    // deleting a component's product leaves the BOM line dangling
    db.delete_product(screen, app.now()).await?;
    let products = db.list_products().await?;
    let resolver = CostResolver::new(&products, &boms);
    assert!((resolver.rolled_up_cost(&laptop_bom) - (81.0 + 2.5)).abs() < 1e-9);

    Ok(())
}
