mod application;
mod audit;
mod bom;
mod eco;
mod product;
mod quality;
mod supplier;

pub use application::Application;
pub use audit::AuditRepository;
pub use bom::BomRepository;
pub use eco::EcoRepository;
pub use product::ProductRepository;
pub use quality::QualityRepository;
pub use supplier::SupplierRepository;

use crate::models::Record;

/// The base trait every storage implementation provides.
///
/// It fixes the error type, the timestamp type and the identifier type of
/// each collection. The resource-specific traits build on it.
pub trait Repository {
    /// The error returned by any storage operation
    type Error: StorageError;
    /// The timestamp type recorded on resources
    type DateTime;
    /// Identifies a product
    type ProductId;
    /// Identifies a bill of materials
    type BomId;
    /// Identifies a supplier
    type SupplierId;
    /// Identifies an engineering change order
    type EcoId;
    /// Identifies a non-conformance report
    type NcrId;
    /// Identifies a corrective and preventive action
    type CapaId;
}

/// Errors raised by a storage implementation.
pub trait StorageError: std::error::Error + Send + Sync + 'static {
    /// Whether the write was rejected because it collides with existing data,
    /// such as a second product with the same SKU.
    fn is_conflict(&self) -> bool;
}

/// A stored resource with the repository's timestamp type.
pub type Stored<R, Id, Data> = Record<Id, <R as Repository>::DateTime, Data>;

/// The marker trait for a repository implementing every collection
pub trait PlmRepository:
    ProductRepository + BomRepository + SupplierRepository + EcoRepository + QualityRepository + AuditRepository
{
}

impl<T> PlmRepository for T where
    T: ProductRepository
        + BomRepository
        + SupplierRepository
        + EcoRepository
        + QualityRepository
        + AuditRepository
{
}
