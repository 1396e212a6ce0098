mod audit;
mod bom;
mod datetime;
mod eco;
mod product;
mod quality;
mod record;
mod supplier;
mod validate;

pub use audit::AuditEntry;
pub use bom::{BomComponent, BomData, BomStatus};
pub use datetime::{DateTimeRangeQuery, DateTimeRangeResponse};
pub use eco::{Approval, ApprovalStatus, EcoData, EcoPriority, EcoStatus, EcoTransition, TransitionError};
pub use product::{Attachment, AttachmentKind, ProductData, ProductStatus};
pub use quality::{CapaData, CapaStatus, NcrData, NcrStatus, Severity};
pub use record::Record;
pub use supplier::{SupplierData, SupplierStatus};
pub use validate::{Validate, ValidationError};

/// The roles a user of the system may hold.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "UPPERCASE")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Full access to every resource
    Admin,
    /// Authors products, BOMs and change orders
    Engineer,
    /// Manages suppliers and reviews change orders
    Manager,
    /// Deputy general manager, reviews change orders
    Dgm,
    /// External supplier
    Supplier,
}

impl Role {
    /// Whether this role may approve or reject an engineering change order.
    pub fn can_review_changes(self) -> bool {
        matches!(self, Self::Admin | Self::Manager | Self::Dgm)
    }
}
