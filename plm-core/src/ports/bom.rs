use super::Stored;
use crate::models::BomData;

type BomRecord<R> = Stored<
    R,
    <R as super::Repository>::BomId,
    BomData<<R as super::Repository>::ProductId>,
>;

/// Repository interface for bills of materials.
pub trait BomRepository: super::Repository {
    /// List every BOM, oldest first.
    ///
    /// When several approved BOMs describe the same product, costing uses the
    /// first one in this order.
    fn list_boms(&self) -> impl Future<Output = Result<Vec<BomRecord<Self>>, Self::Error>> + Send;

    /// Retrieve a single BOM, or Ok(None) if it does not exist.
    fn get_bom(
        &self,
        bom_id: Self::BomId,
    ) -> impl Future<Output = Result<Option<BomRecord<Self>>, Self::Error>> + Send;

    /// Store a new BOM.
    fn create_bom(
        &self,
        bom_id: Self::BomId,
        data: BomData<Self::ProductId>,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<BomRecord<Self>, Self::Error>> + Send;

    /// Replace an existing BOM, returning Ok(None) if it does not exist.
    fn update_bom(
        &self,
        bom_id: Self::BomId,
        data: BomData<Self::ProductId>,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Option<BomRecord<Self>>, Self::Error>> + Send;

    /// Delete a BOM, returning Ok(false) if it does not exist.
    fn delete_bom(
        &self,
        bom_id: Self::BomId,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
