use super::Collection;
use crate::{
    Db,
    types::{BomId, DateTime, ProductId},
};
use plm_core::{
    models::{BomData, Record},
    ports::BomRepository,
};

const BOM: Collection = Collection {
    table: "bom",
    tag: "BOM",
};

type BomRecord = Record<BomId, DateTime, BomData<ProductId>>;

impl BomRepository for Db {
    async fn list_boms(&self) -> Result<Vec<BomRecord>, Self::Error> {
        BOM.list(&self.reader).await
    }

    async fn get_bom(&self, bom_id: Self::BomId) -> Result<Option<BomRecord>, Self::Error> {
        BOM.get(&self.reader, bom_id).await
    }

    async fn create_bom(
        &self,
        bom_id: Self::BomId,
        data: BomData<ProductId>,
        as_of: Self::DateTime,
    ) -> Result<BomRecord, Self::Error> {
        let details = format!("Created BOM {} v{}", data.name, data.version);
        BOM.create(&self.writer, bom_id, data, details, as_of).await
    }

    async fn update_bom(
        &self,
        bom_id: Self::BomId,
        data: BomData<ProductId>,
        as_of: Self::DateTime,
    ) -> Result<Option<BomRecord>, Self::Error> {
        let details = format!("Updated BOM {} v{}", data.name, data.version);
        BOM.update(&self.writer, bom_id, data, details, as_of).await
    }

    async fn delete_bom(&self, bom_id: Self::BomId, as_of: Self::DateTime) -> Result<bool, Self::Error> {
        BOM.delete(&self.writer, bom_id, as_of).await
    }
}
