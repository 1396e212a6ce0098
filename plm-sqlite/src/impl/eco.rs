use super::Collection;
use crate::{
    Db,
    types::{DateTime, EcoId, ProductId},
};
use plm_core::{
    models::{EcoData, Record},
    ports::EcoRepository,
};

const ECO: Collection = Collection {
    table: "eco",
    tag: "ECO",
};

type EcoRecord = Record<EcoId, DateTime, EcoData<ProductId, DateTime>>;

impl EcoRepository for Db {
    async fn list_ecos(&self) -> Result<Vec<EcoRecord>, Self::Error> {
        ECO.list(&self.reader).await
    }

    async fn get_eco(&self, eco_id: Self::EcoId) -> Result<Option<EcoRecord>, Self::Error> {
        ECO.get(&self.reader, eco_id).await
    }

    async fn create_eco(
        &self,
        eco_id: Self::EcoId,
        data: EcoData<ProductId, DateTime>,
        as_of: Self::DateTime,
    ) -> Result<EcoRecord, Self::Error> {
        let details = format!("Created change order {}", data.title);
        ECO.create(&self.writer, eco_id, data, details, as_of).await
    }

    async fn update_eco(
        &self,
        eco_id: Self::EcoId,
        data: EcoData<ProductId, DateTime>,
        as_of: Self::DateTime,
    ) -> Result<Option<EcoRecord>, Self::Error> {
        let details = format!("Updated change order {} ({:?})", data.title, data.status);
        ECO.update(&self.writer, eco_id, data, details, as_of).await
    }

    async fn delete_eco(&self, eco_id: Self::EcoId, as_of: Self::DateTime) -> Result<bool, Self::Error> {
        ECO.delete(&self.writer, eco_id, as_of).await
    }
}
