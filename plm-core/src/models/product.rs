use super::validate::{Validate, ValidationError, non_negative, required};

/// Lifecycle state of a product.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ProductStatus {
    /// Being authored
    #[default]
    Draft,
    /// Submitted and awaiting approval
    #[cfg_attr(feature = "serde", serde(rename = "Pending Approval"))]
    PendingApproval,
    /// Under engineering review
    #[cfg_attr(feature = "serde", serde(rename = "In Review"))]
    InReview,
    /// Released for manufacture or sale
    Active,
    /// No longer recommended for new designs
    Obsolete,
    /// Retained for record keeping only
    Archived,
}

impl ProductStatus {
    /// Every variant, in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Draft,
        Self::PendingApproval,
        Self::InReview,
        Self::Active,
        Self::Obsolete,
        Self::Archived,
    ];
}

/// The kind of file attached to a product.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AttachmentKind {
    /// A CAD model or drawing
    #[cfg_attr(feature = "serde", serde(rename = "CAD"))]
    Cad,
    /// A PDF document
    #[cfg_attr(feature = "serde", serde(rename = "PDF"))]
    Pdf,
    /// A picture of the product
    Image,
    /// Anything else
    #[default]
    Other,
}

/// A file linked from a product record.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Attachment<DateTime> {
    /// Identifier of the attachment within its product
    pub id: String,
    /// Display name
    pub name: String,
    /// Where the file can be fetched from
    pub url: String,
    /// The kind of file
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub kind: AttachmentKind,
    /// The user that uploaded the file
    #[cfg_attr(feature = "serde", serde(default))]
    pub uploaded_by: String,
    /// When the file was uploaded
    pub uploaded_at: DateTime,
}

/// A product in the catalog: a purchased part, a sub-assembly or a finished good.
///
/// Only `cost` takes part in BOM costing; the remaining fields are catalog data.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        rename_all = "camelCase",
        bound(deserialize = "SupplierId: serde::Deserialize<'de>, DateTime: serde::Deserialize<'de>")
    )
)]
#[derive(Clone, Debug, PartialEq)]
pub struct ProductData<SupplierId, DateTime> {
    /// Display name
    pub name: String,
    /// Free-form description
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Stock keeping unit, unique across the catalog
    pub sku: String,
    /// Unit cost
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: f64,
    /// Unit list price
    #[cfg_attr(feature = "serde", serde(default))]
    pub price: f64,
    /// The supplier this product is sourced from, if purchased
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub supplier_id: Option<SupplierId>,
    /// Catalog category
    #[cfg_attr(feature = "serde", serde(default = "default_category"))]
    pub category: String,
    /// Lifecycle state
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: ProductStatus,
    /// An optional picture
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub image_url: Option<String>,
    /// Linked documents
    #[cfg_attr(feature = "serde", serde(default))]
    pub attachments: Vec<Attachment<DateTime>>,
}

#[cfg(feature = "serde")]
fn default_category() -> String {
    "Uncategorized".to_owned()
}

impl<SupplierId, DateTime> Validate for ProductData<SupplierId, DateTime> {
    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)?;
        required("sku", &self.sku)?;
        non_negative("cost", self.cost)?;
        non_negative("price", self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> ProductData<u32, u32> {
        serde_json::from_str(r#"{"name": "Widget", "sku": "W-1", "cost": 2.5}"#).unwrap()
    }

    #[test]
    fn test_defaults() {
        let product = widget();
        assert_eq!(product.category, "Uncategorized");
        assert_eq!(product.status, ProductStatus::Draft);
        assert_eq!(product.price, 0.0);
        assert!(product.attachments.is_empty());
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_status_wire_names() {
        let status: ProductStatus = serde_json::from_str(r#""Pending Approval""#).unwrap();
        assert_eq!(status, ProductStatus::PendingApproval);
        assert_eq!(
            serde_json::to_string(&ProductStatus::InReview).unwrap(),
            r#""In Review""#
        );
    }

    #[test]
    fn test_rejects_negative_cost() {
        let mut product = widget();
        product.cost = -1.0;
        assert_eq!(
            product.validate(),
            Err(ValidationError::NotNonNegative {
                field: "cost",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_rejects_blank_sku() {
        let mut product = widget();
        product.sku = "  ".into();
        assert_eq!(product.validate(), Err(ValidationError::Required("sku")));
    }
}
