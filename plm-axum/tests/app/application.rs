use plm_core::ports::Application;
use plm_sqlite::{
    Db,
    types::{BomId, CapaId, DateTime, EcoId, NcrId, ProductId, SupplierId},
};

#[derive(Clone)]
pub struct TestApp(pub Db);

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
