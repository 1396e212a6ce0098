use super::validate::{Validate, ValidationError, non_negative, required};

/// Lifecycle state of a bill of materials.
///
/// Only an `Approved` BOM is used to cost a sub-assembly during roll-up.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BomStatus {
    /// Being authored
    #[default]
    Draft,
    /// Submitted and awaiting approval
    #[cfg_attr(feature = "serde", serde(rename = "Pending Approval"))]
    PendingApproval,
    /// Under engineering review
    #[cfg_attr(feature = "serde", serde(rename = "In Review"))]
    InReview,
    /// Released; represents the assembly's cost
    Approved,
    /// Superseded
    Obsolete,
}

/// One line of a bill of materials.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct BomComponent<ProductId> {
    /// The product consumed by this line
    pub component_product_id: ProductId,
    /// How many units of the component one assembly consumes
    pub quantity: f64,
    /// Unit of measure, for display only
    #[cfg_attr(feature = "serde", serde(default))]
    pub unit: String,
}

/// A bill of materials: the components and quantities needed to build one
/// unit of `product_id`.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        rename_all = "camelCase",
        bound(deserialize = "ProductId: serde::Deserialize<'de>")
    )
)]
#[derive(Clone, Debug, PartialEq)]
pub struct BomData<ProductId> {
    /// The assembly this BOM describes
    pub product_id: ProductId,
    /// Display name
    pub name: String,
    /// Revision label
    #[cfg_attr(feature = "serde", serde(default = "default_version"))]
    pub version: String,
    /// Lifecycle state
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: BomStatus,
    /// Component lines, in display order
    #[cfg_attr(feature = "serde", serde(default))]
    pub components: Vec<BomComponent<ProductId>>,
}

#[cfg(feature = "serde")]
fn default_version() -> String {
    "1.0".to_owned()
}

impl<ProductId> BomData<ProductId> {
    /// Whether this BOM may stand in for its product's cost during roll-up.
    pub fn is_approved(&self) -> bool {
        self.status == BomStatus::Approved
    }
}

impl<ProductId> Validate for BomData<ProductId> {
    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)?;
        for component in self.components.iter() {
            non_negative("quantity", component.quantity)?;
        }
        Ok(())
    }
}
