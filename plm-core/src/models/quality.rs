use super::validate::{Validate, ValidationError, required};

/// How serious a non-conformance is.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Cosmetic
    Low,
    /// Degraded but usable
    #[default]
    Medium,
    /// Unusable
    High,
    /// Safety or line-stopping issue
    Critical,
}

impl Severity {
    /// Every variant, least severe first.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];
}

/// Investigation state of a non-conformance report.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NcrStatus {
    /// Reported
    #[default]
    Open,
    /// Root cause being determined
    Investigating,
    /// Fixed, awaiting closure
    Resolved,
    /// Done
    Closed,
}

impl NcrStatus {
    /// Every variant, in workflow order.
    pub const ALL: [Self; 4] = [Self::Open, Self::Investigating, Self::Resolved, Self::Closed];
}

/// A non-conformance report: a defect found in a product or a supplied part.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        rename_all = "camelCase",
        bound(deserialize = "ProductId: serde::Deserialize<'de>, SupplierId: serde::Deserialize<'de>")
    )
)]
#[derive(Clone, Debug, PartialEq)]
pub struct NcrData<ProductId, SupplierId> {
    /// Short summary
    pub title: String,
    /// What was observed
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// The affected product
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub product_id: Option<ProductId>,
    /// The supplier responsible, if any
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub supplier_id: Option<SupplierId>,
    /// How serious the defect is
    #[cfg_attr(feature = "serde", serde(default))]
    pub severity: Severity,
    /// Investigation state
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: NcrStatus,
    /// The reporting user
    #[cfg_attr(feature = "serde", serde(default))]
    pub reported_by: String,
    /// Evidence pictures
    #[cfg_attr(feature = "serde", serde(default))]
    pub images: Vec<String>,
}

impl<ProductId, SupplierId> Validate for NcrData<ProductId, SupplierId> {
    fn validate(&self) -> Result<(), ValidationError> {
        required("title", &self.title)
    }
}

/// Progress of a corrective and preventive action.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CapaStatus {
    /// Being authored
    #[default]
    Draft,
    /// Agreed and in progress
    Open,
    /// Actions carried out
    Implemented,
    /// Effectiveness confirmed
    Verified,
    /// Done
    Closed,
}

/// A corrective and preventive action, usually raised against an NCR.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        rename_all = "camelCase",
        bound(deserialize = "NcrId: serde::Deserialize<'de>, DateTime: serde::Deserialize<'de>")
    )
)]
#[derive(Clone, Debug, PartialEq)]
pub struct CapaData<NcrId, DateTime> {
    /// The report this action responds to
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub ncr_id: Option<NcrId>,
    /// Short summary
    pub title: String,
    /// Details
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Why the defect happened
    #[cfg_attr(feature = "serde", serde(default))]
    pub root_cause: String,
    /// What fixes the defect
    #[cfg_attr(feature = "serde", serde(default))]
    pub corrective_action: String,
    /// What stops it recurring
    #[cfg_attr(feature = "serde", serde(default))]
    pub preventive_action: String,
    /// Progress
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: CapaStatus,
    /// The responsible user
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub assigned_to: Option<String>,
    /// Deadline
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub due_date: Option<DateTime>,
}

impl<NcrId, DateTime> Validate for CapaData<NcrId, DateTime> {
    fn validate(&self) -> Result<(), ValidationError> {
        required("title", &self.title)
    }
}
