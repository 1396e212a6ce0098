use super::{
    Role,
    validate::{Validate, ValidationError, required},
};
use thiserror::Error;

/// Workflow state of an engineering change order.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EcoStatus {
    /// Being authored
    #[default]
    Draft,
    /// Submitted for review
    #[cfg_attr(feature = "serde", serde(rename = "Pending Review"))]
    PendingReview,
    /// Reviewed and forwarded for final approval
    #[cfg_attr(feature = "serde", serde(rename = "Pending Approval"))]
    PendingApproval,
    /// Accepted, awaiting implementation
    Approved,
    /// Rolled out
    Implemented,
    /// Declined
    Rejected,
}

impl EcoStatus {
    /// Whether the workflow permits moving from `self` to `next`.
    pub fn can_transition_to(self, next: Self) -> bool {
        use EcoStatus::*;
        matches!(
            (self, next),
            (Draft, PendingReview)
                | (PendingReview, PendingApproval | Approved | Rejected)
                | (PendingApproval, Approved | Rejected)
                | (Approved, Implemented)
                | (Rejected, Draft)
        )
    }

    /// Whether the order still needs work or a decision.
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Implemented | Self::Rejected)
    }

    fn is_review(self) -> bool {
        matches!(self, Self::PendingApproval | Self::Approved | Self::Rejected)
    }
}

/// Urgency of an engineering change order.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EcoPriority {
    /// Whenever convenient
    Low,
    /// Normal scheduling
    #[default]
    Medium,
    /// Ahead of normal work
    High,
    /// Immediately
    Critical,
}

/// The decision recorded by a reviewer.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApprovalStatus {
    /// Forwarded without a final decision
    Pending,
    /// Accepted
    Approved,
    /// Declined
    Rejected,
}

/// A reviewer's sign-off on a change order.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Approval<DateTime> {
    /// The reviewer
    pub user_id: String,
    /// The reviewer's role at the time of review
    pub role: Role,
    /// The decision
    pub status: ApprovalStatus,
    /// When the decision was made
    pub timestamp: DateTime,
    /// Optional remarks
    #[cfg_attr(feature = "serde", serde(default))]
    pub comments: String,
}

/// An engineering change order: a proposed change to one or more products.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        rename_all = "camelCase",
        bound(deserialize = "ProductId: serde::Deserialize<'de>, DateTime: serde::Deserialize<'de>")
    )
)]
#[derive(Clone, Debug, PartialEq)]
pub struct EcoData<ProductId, DateTime> {
    /// Short summary
    pub title: String,
    /// Details of the change
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Workflow state
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: EcoStatus,
    /// Urgency
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: EcoPriority,
    /// The products affected by the change
    #[cfg_attr(feature = "serde", serde(default))]
    pub product_ids: Vec<ProductId>,
    /// The user that raised the change
    #[cfg_attr(feature = "serde", serde(default))]
    pub initiator_id: String,
    /// Review history, oldest first
    #[cfg_attr(feature = "serde", serde(default))]
    pub approvals: Vec<Approval<DateTime>>,
}

impl<ProductId, DateTime> Validate for EcoData<ProductId, DateTime> {
    fn validate(&self) -> Result<(), ValidationError> {
        required("title", &self.title)
    }
}

/// A request to move a change order through its workflow.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct EcoTransition {
    /// The requested next state
    pub status: EcoStatus,
    /// The user requesting the transition
    pub user_id: String,
    /// The role the user acts in
    pub role: Role,
    /// Optional remarks, kept with the approval record
    #[cfg_attr(feature = "serde", serde(default))]
    pub comments: String,
}

/// Reasons a workflow transition is refused.
#[derive(Debug, Error, PartialEq)]
pub enum TransitionError {
    /// The workflow has no edge between the two states
    #[error("cannot move a change order from {from:?} to {to:?}")]
    Illegal {
        /// The current state
        from: EcoStatus,
        /// The requested state
        to: EcoStatus,
    },
    /// Review decisions need a reviewing role
    #[error("role {0:?} cannot review change orders")]
    NotReviewer(Role),
}

impl<ProductId, DateTime> EcoData<ProductId, DateTime> {
    /// Apply a workflow transition at time `at`.
    ///
    /// Review steps (forwarding, approving, rejecting) require a reviewing
    /// role and append an [`Approval`] to the history. On error the order is
    /// left untouched.
    pub fn transition(
        &mut self,
        request: EcoTransition,
        at: DateTime,
    ) -> Result<(), TransitionError> {
        let EcoTransition {
            status,
            user_id,
            role,
            comments,
        } = request;

        if !self.status.can_transition_to(status) {
            return Err(TransitionError::Illegal {
                from: self.status,
                to: status,
            });
        }

        if status.is_review() {
            if !role.can_review_changes() {
                return Err(TransitionError::NotReviewer(role));
            }
            let decision = match status {
                EcoStatus::Approved => ApprovalStatus::Approved,
                EcoStatus::Rejected => ApprovalStatus::Rejected,
                _ => ApprovalStatus::Pending,
            };
            self.approvals.push(Approval {
                user_id,
                role,
                status: decision,
                timestamp: at,
                comments,
            });
        }

        self.status = status;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[fixture]
    fn eco() -> EcoData<u32, u32> {
        EcoData {
            title: "Replace Screen Panel Vendor".into(),
            description: String::new(),
            status: EcoStatus::Draft,
            priority: EcoPriority::High,
            product_ids: vec![1],
            initiator_id: "u2".into(),
            approvals: Vec::new(),
        }
    }

    fn request(status: EcoStatus, role: Role) -> EcoTransition {
        EcoTransition {
            status,
            user_id: "u1".into(),
            role,
            comments: String::new(),
        }
    }

    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Part(String);

    #[test]
    fn test_parse_minimal_eco() {
        let eco: EcoData<Part, Part> =
            serde_json::from_str(r#"{"title": "Swap vendor"}"#).unwrap();
        assert_eq!(eco.status, EcoStatus::Draft);
        assert!(eco.product_ids.is_empty());
        assert!(eco.approvals.is_empty());
    }

    #[rstest]
    fn test_happy_path(mut eco: EcoData<u32, u32>) {
        eco.transition(request(EcoStatus::PendingReview, Role::Engineer), 1)
            .unwrap();
        assert!(eco.approvals.is_empty());

        eco.transition(request(EcoStatus::Approved, Role::Manager), 2)
            .unwrap();
        assert_eq!(eco.approvals.len(), 1);
        assert_eq!(eco.approvals[0].status, ApprovalStatus::Approved);
        assert_eq!(eco.approvals[0].timestamp, 2);

        eco.transition(request(EcoStatus::Implemented, Role::Engineer), 3)
            .unwrap();
        assert_eq!(eco.status, EcoStatus::Implemented);
        assert!(!eco.status.is_active());
    }

    #[rstest]
    fn test_cannot_skip_review(mut eco: EcoData<u32, u32>) {
        let result = eco.transition(request(EcoStatus::Approved, Role::Admin), 1);
        assert_eq!(
            result,
            Err(TransitionError::Illegal {
                from: EcoStatus::Draft,
                to: EcoStatus::Approved
            })
        );
        assert_eq!(eco.status, EcoStatus::Draft);
    }

    #[rstest]
    #[case(Role::Engineer)]
    #[case(Role::Supplier)]
    fn test_engineer_cannot_approve(mut eco: EcoData<u32, u32>, #[case] role: Role) {
        eco.status = EcoStatus::PendingReview;
        let result = eco.transition(request(EcoStatus::Approved, role), 1);
        assert_eq!(result, Err(TransitionError::NotReviewer(role)));
        assert!(eco.approvals.is_empty());
        assert_eq!(eco.status, EcoStatus::PendingReview);
    }

    #[rstest]
    fn test_rejected_returns_to_draft(mut eco: EcoData<u32, u32>) {
        eco.status = EcoStatus::PendingApproval;
        eco.transition(request(EcoStatus::Rejected, Role::Dgm), 1)
            .unwrap();
        assert_eq!(eco.approvals[0].status, ApprovalStatus::Rejected);
        eco.transition(request(EcoStatus::Draft, Role::Engineer), 2)
            .unwrap();
        assert_eq!(eco.status, EcoStatus::Draft);
    }

    #[test]
    fn test_status_wire_names() {
        let status: EcoStatus = serde_json::from_str(r#""Pending Review""#).unwrap();
        assert_eq!(status, EcoStatus::PendingReview);
        let role: Role = serde_json::from_str(r#""DGM""#).unwrap();
        assert_eq!(role, Role::Dgm);
    }
}
