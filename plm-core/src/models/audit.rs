/// One entry of the audit trail, written whenever a resource is created,
/// replaced or deleted.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct AuditEntry<DateTime> {
    /// A tag such as `CREATE_PRODUCT` or `DELETE_BOM`
    pub action: String,
    /// The kind of resource touched (e.g. "product")
    pub entity: String,
    /// The identifier of the resource touched
    pub entity_id: String,
    /// Human-readable description
    pub details: String,
    /// When the change happened
    pub as_of: DateTime,
}
