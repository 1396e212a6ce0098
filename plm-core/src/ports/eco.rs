use super::Stored;
use crate::models::EcoData;

type EcoRecord<R> = Stored<
    R,
    <R as super::Repository>::EcoId,
    EcoData<<R as super::Repository>::ProductId, <R as super::Repository>::DateTime>,
>;

/// Repository interface for engineering change orders.
///
/// Workflow rules are enforced by [`EcoData::transition`] before an update
/// reaches the repository; storage simply replaces the record.
pub trait EcoRepository: super::Repository {
    /// List every change order, oldest first.
    fn list_ecos(&self) -> impl Future<Output = Result<Vec<EcoRecord<Self>>, Self::Error>> + Send;

    /// Retrieve a single change order, or Ok(None) if it does not exist.
    fn get_eco(
        &self,
        eco_id: Self::EcoId,
    ) -> impl Future<Output = Result<Option<EcoRecord<Self>>, Self::Error>> + Send;

    /// Store a new change order.
    fn create_eco(
        &self,
        eco_id: Self::EcoId,
        data: EcoData<Self::ProductId, Self::DateTime>,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<EcoRecord<Self>, Self::Error>> + Send;

    /// Replace an existing change order, returning Ok(None) if it does not exist.
    fn update_eco(
        &self,
        eco_id: Self::EcoId,
        data: EcoData<Self::ProductId, Self::DateTime>,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Option<EcoRecord<Self>>, Self::Error>> + Send;

    /// Delete a change order, returning Ok(false) if it does not exist.
    fn delete_eco(
        &self,
        eco_id: Self::EcoId,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
