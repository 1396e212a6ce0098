use plm_core::{
    models::{BomComponent, BomData, BomStatus, ProductData, ProductStatus},
    ports::Application,
};
use plm_sqlite::{
    Db,
    config::SqliteConfig,
    types::{BomId, CapaId, DateTime, EcoId, NcrId, ProductId, SupplierId},
};

pub struct TestApp(pub Db);

impl TestApp {
    pub async fn open() -> anyhow::Result<Self> {
        Ok(Self(Db::open(&SqliteConfig::default()).await?))
    }
}

impl Application for TestApp {
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.0
    }

    fn now(&self) -> DateTime {
        DateTime::now()
    }

    fn generate_product_id(&self) -> (ProductId, DateTime) {
        (uuid::Uuid::new_v4().into(), self.now())
    }

    fn generate_bom_id(&self) -> (BomId, DateTime) {
        (uuid::Uuid::new_v4().into(), self.now())
    }

    fn generate_supplier_id(&self) -> (SupplierId, DateTime) {
        (uuid::Uuid::new_v4().into(), self.now())
    }

    fn generate_eco_id(&self) -> (EcoId, DateTime) {
        (uuid::Uuid::new_v4().into(), self.now())
    }

    fn generate_ncr_id(&self) -> (NcrId, DateTime) {
        (uuid::Uuid::new_v4().into(), self.now())
    }

    fn generate_capa_id(&self) -> (CapaId, DateTime) {
        (uuid::Uuid::new_v4().into(), self.now())
    }
}

#[allow(dead_code)]
pub fn product(sku: &str, cost: f64) -> ProductData<SupplierId, DateTime> {
    ProductData {
        name: format!("Part {sku}"),
        description: String::new(),
        sku: sku.to_string(),
        cost,
        price: cost * 1.5,
        supplier_id: None,
        category: "Components".to_string(),
        status: ProductStatus::Active,
        image_url: None,
        attachments: Vec::new(),
    }
}

#[allow(dead_code)]
pub fn bom(
    product_id: ProductId,
    status: BomStatus,
    components: &[(ProductId, f64)],
) -> BomData<ProductId> {
    BomData {
        product_id,
        name: "Assembly".to_string(),
        version: "1.0".to_string(),
        status,
        components: components
            .iter()
            .map(|&(component_product_id, quantity)| BomComponent {
                component_product_id,
                quantity,
                unit: "pcs".to_string(),
            })
            .collect(),
    }
}
