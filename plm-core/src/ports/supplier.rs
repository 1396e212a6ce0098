use super::Stored;
use crate::models::SupplierData;

type SupplierRecord<R> = Stored<R, <R as super::Repository>::SupplierId, SupplierData>;

/// Repository interface for suppliers.
pub trait SupplierRepository: super::Repository {
    /// List every supplier, oldest first.
    fn list_suppliers(
        &self,
    ) -> impl Future<Output = Result<Vec<SupplierRecord<Self>>, Self::Error>> + Send;

    /// Retrieve a single supplier, or Ok(None) if it does not exist.
    fn get_supplier(
        &self,
        supplier_id: Self::SupplierId,
    ) -> impl Future<Output = Result<Option<SupplierRecord<Self>>, Self::Error>> + Send;

    /// Store a new supplier.
    fn create_supplier(
        &self,
        supplier_id: Self::SupplierId,
        data: SupplierData,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<SupplierRecord<Self>, Self::Error>> + Send;

    /// Replace an existing supplier, returning Ok(None) if it does not exist.
    fn update_supplier(
        &self,
        supplier_id: Self::SupplierId,
        data: SupplierData,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Option<SupplierRecord<Self>>, Self::Error>> + Send;

    /// Delete a supplier, returning Ok(false) if it does not exist.
    fn delete_supplier(
        &self,
        supplier_id: Self::SupplierId,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
