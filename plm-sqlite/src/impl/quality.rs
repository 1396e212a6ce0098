use super::Collection;
use crate::{
    Db,
    types::{CapaId, DateTime, NcrId, ProductId, SupplierId},
};
use plm_core::{
    models::{CapaData, NcrData, Record},
    ports::QualityRepository,
};

const NCR: Collection = Collection {
    table: "ncr",
    tag: "NCR",
};

const CAPA: Collection = Collection {
    table: "capa",
    tag: "CAPA",
};

type NcrRecord = Record<NcrId, DateTime, NcrData<ProductId, SupplierId>>;
type CapaRecord = Record<CapaId, DateTime, CapaData<NcrId, DateTime>>;

impl QualityRepository for Db {
    async fn list_ncrs(&self) -> Result<Vec<NcrRecord>, Self::Error> {
        NCR.list(&self.reader).await
    }

    async fn get_ncr(&self, ncr_id: Self::NcrId) -> Result<Option<NcrRecord>, Self::Error> {
        NCR.get(&self.reader, ncr_id).await
    }

    async fn create_ncr(
        &self,
        ncr_id: Self::NcrId,
        data: NcrData<ProductId, SupplierId>,
        as_of: Self::DateTime,
    ) -> Result<NcrRecord, Self::Error> {
        let details = format!("Reported {:?} NCR {}", data.severity, data.title);
        NCR.create(&self.writer, ncr_id, data, details, as_of).await
    }

    async fn update_ncr(
        &self,
        ncr_id: Self::NcrId,
        data: NcrData<ProductId, SupplierId>,
        as_of: Self::DateTime,
    ) -> Result<Option<NcrRecord>, Self::Error> {
        let details = format!("Updated NCR {} ({:?})", data.title, data.status);
        NCR.update(&self.writer, ncr_id, data, details, as_of).await
    }

    async fn list_capas(&self) -> Result<Vec<CapaRecord>, Self::Error> {
        CAPA.list(&self.reader).await
    }

    async fn get_capa(&self, capa_id: Self::CapaId) -> Result<Option<CapaRecord>, Self::Error> {
        CAPA.get(&self.reader, capa_id).await
    }

    async fn create_capa(
        &self,
        capa_id: Self::CapaId,
        data: CapaData<NcrId, DateTime>,
        as_of: Self::DateTime,
    ) -> Result<CapaRecord, Self::Error> {
        let details = format!("Created CAPA {}", data.title);
        CAPA.create(&self.writer, capa_id, data, details, as_of)
            .await
    }

    async fn update_capa(
        &self,
        capa_id: Self::CapaId,
        data: CapaData<NcrId, DateTime>,
        as_of: Self::DateTime,
    ) -> Result<Option<CapaRecord>, Self::Error> {
        let details = format!("Updated CAPA {} ({:?})", data.title, data.status);
        CAPA.update(&self.writer, capa_id, data, details, as_of)
            .await
    }
}
