/// A stored resource: its identifier, its timestamps and the resource data.
///
/// Every collection in the system (products, BOMs, suppliers, change orders
/// and quality records) is persisted as a `Record` around the matching data
/// type. The data is flattened on the wire, so a product serializes as
/// `{"id": .., "name": .., "sku": .., "createdAt": .., "updatedAt": ..}`.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Record<Id, DateTime, Data> {
    /// Unique identifier of the resource
    pub id: Id,
    /// The resource payload
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub data: Data,
    /// When the resource was first stored
    pub created_at: DateTime,
    /// When the resource was last replaced
    pub updated_at: DateTime,
}
