use super::{PlmRepository, Repository};

type Repo<T> = <T as Application>::Repository;
type DateTime<T> = <Repo<T> as Repository>::DateTime;

/// The top-level application trait, tying a storage implementation to the
/// policies the service layer needs.
///
/// Identifiers are always minted by the application, never accepted from a
/// client. Each generator returns the fresh id alongside the time it was
/// issued, which callers use as the record's creation time.
pub trait Application {
    /// The storage implementation
    type Repository: PlmRepository;

    /// Get a handle to the repository
    fn database(&self) -> &Self::Repository;

    /// The current time, as understood by the application
    fn now(&self) -> DateTime<Self>;

    /// Mint a new product id
    fn generate_product_id(&self) -> (<Repo<Self> as Repository>::ProductId, DateTime<Self>);

    /// Mint a new BOM id
    fn generate_bom_id(&self) -> (<Repo<Self> as Repository>::BomId, DateTime<Self>);

    /// Mint a new supplier id
    fn generate_supplier_id(&self) -> (<Repo<Self> as Repository>::SupplierId, DateTime<Self>);

    /// Mint a new change order id
    fn generate_eco_id(&self) -> (<Repo<Self> as Repository>::EcoId, DateTime<Self>);

    /// Mint a new NCR id
    fn generate_ncr_id(&self) -> (<Repo<Self> as Repository>::NcrId, DateTime<Self>);

    /// Mint a new CAPA id
    fn generate_capa_id(&self) -> (<Repo<Self> as Repository>::CapaId, DateTime<Self>);
}
