use super::Stored;
use crate::models::{CapaData, NcrData};

type NcrRecord<R> = Stored<
    R,
    <R as super::Repository>::NcrId,
    NcrData<<R as super::Repository>::ProductId, <R as super::Repository>::SupplierId>,
>;

type CapaRecord<R> = Stored<
    R,
    <R as super::Repository>::CapaId,
    CapaData<<R as super::Repository>::NcrId, <R as super::Repository>::DateTime>,
>;

/// Repository interface for quality records: non-conformance reports (NCRs)
/// and corrective and preventive actions (CAPAs).
///
/// Quality records are never deleted, only moved to a closed state.
pub trait QualityRepository: super::Repository {
    /// List every NCR, oldest first.
    fn list_ncrs(&self) -> impl Future<Output = Result<Vec<NcrRecord<Self>>, Self::Error>> + Send;

    /// Retrieve a single NCR, or Ok(None) if it does not exist.
    fn get_ncr(
        &self,
        ncr_id: Self::NcrId,
    ) -> impl Future<Output = Result<Option<NcrRecord<Self>>, Self::Error>> + Send;

    /// Store a new NCR.
    fn create_ncr(
        &self,
        ncr_id: Self::NcrId,
        data: NcrData<Self::ProductId, Self::SupplierId>,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<NcrRecord<Self>, Self::Error>> + Send;

    /// Replace an existing NCR, returning Ok(None) if it does not exist.
    fn update_ncr(
        &self,
        ncr_id: Self::NcrId,
        data: NcrData<Self::ProductId, Self::SupplierId>,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Option<NcrRecord<Self>>, Self::Error>> + Send;

    /// List every CAPA, oldest first.
    fn list_capas(
        &self,
    ) -> impl Future<Output = Result<Vec<CapaRecord<Self>>, Self::Error>> + Send;

    /// Retrieve a single CAPA, or Ok(None) if it does not exist.
    fn get_capa(
        &self,
        capa_id: Self::CapaId,
    ) -> impl Future<Output = Result<Option<CapaRecord<Self>>, Self::Error>> + Send;

    /// Store a new CAPA.
    fn create_capa(
        &self,
        capa_id: Self::CapaId,
        data: CapaData<Self::NcrId, Self::DateTime>,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<CapaRecord<Self>, Self::Error>> + Send;

    /// Replace an existing CAPA, returning Ok(None) if it does not exist.
    fn update_capa(
        &self,
        capa_id: Self::CapaId,
        data: CapaData<Self::NcrId, Self::DateTime>,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Option<CapaRecord<Self>>, Self::Error>> + Send;
}
