use super::Collection;
use crate::{
    Db,
    types::{DateTime, SupplierId},
};
use plm_core::{
    models::{Record, SupplierData},
    ports::SupplierRepository,
};

const SUPPLIER: Collection = Collection {
    table: "supplier",
    tag: "SUPPLIER",
};

type SupplierRecord = Record<SupplierId, DateTime, SupplierData>;

impl SupplierRepository for Db {
    async fn list_suppliers(&self) -> Result<Vec<SupplierRecord>, Self::Error> {
        SUPPLIER.list(&self.reader).await
    }

    async fn get_supplier(
        &self,
        supplier_id: Self::SupplierId,
    ) -> Result<Option<SupplierRecord>, Self::Error> {
        SUPPLIER.get(&self.reader, supplier_id).await
    }

    async fn create_supplier(
        &self,
        supplier_id: Self::SupplierId,
        data: SupplierData,
        as_of: Self::DateTime,
    ) -> Result<SupplierRecord, Self::Error> {
        let details = format!("Created supplier {}", data.name);
        SUPPLIER
            .create(&self.writer, supplier_id, data, details, as_of)
            .await
    }

    async fn update_supplier(
        &self,
        supplier_id: Self::SupplierId,
        data: SupplierData,
        as_of: Self::DateTime,
    ) -> Result<Option<SupplierRecord>, Self::Error> {
        let details = format!("Updated supplier {} (rating {})", data.name, data.rating);
        SUPPLIER
            .update(&self.writer, supplier_id, data, details, as_of)
            .await
    }

    async fn delete_supplier(
        &self,
        supplier_id: Self::SupplierId,
        as_of: Self::DateTime,
    ) -> Result<bool, Self::Error> {
        SUPPLIER.delete(&self.writer, supplier_id, as_of).await
    }
}
