use super::Stored;
use crate::models::ProductData;

type ProductRecord<R> = Stored<
    R,
    <R as super::Repository>::ProductId,
    ProductData<<R as super::Repository>::SupplierId, <R as super::Repository>::DateTime>,
>;

/// Repository interface for the product catalog.
///
/// Products are the parts, sub-assemblies and finished goods that bills of
/// materials reference. Listing returns products in the order they were
/// created, which is the snapshot order BOM costing relies on.
pub trait ProductRepository: super::Repository {
    /// List every product, oldest first.
    fn list_products(
        &self,
    ) -> impl Future<Output = Result<Vec<ProductRecord<Self>>, Self::Error>> + Send;

    /// Retrieve a single product.
    ///
    /// # Returns
    ///
    /// Ok(None) if the product does not exist.
    fn get_product(
        &self,
        product_id: Self::ProductId,
    ) -> impl Future<Output = Result<Option<ProductRecord<Self>>, Self::Error>> + Send;

    /// Store a new product.
    fn create_product(
        &self,
        product_id: Self::ProductId,
        data: ProductData<Self::SupplierId, Self::DateTime>,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<ProductRecord<Self>, Self::Error>> + Send;

    /// Replace the data of an existing product.
    ///
    /// # Returns
    ///
    /// - Ok(Some(record)) with the stored result if successful
    /// - Ok(None) if the product does not exist
    fn update_product(
        &self,
        product_id: Self::ProductId,
        data: ProductData<Self::SupplierId, Self::DateTime>,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Option<ProductRecord<Self>>, Self::Error>> + Send;

    /// Delete a product.
    ///
    /// # Returns
    ///
    /// Ok(false) if the product does not exist.
    fn delete_product(
        &self,
        product_id: Self::ProductId,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
