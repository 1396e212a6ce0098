use super::validate::{Validate, ValidationError, required};

/// Qualification state of a supplier.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SupplierStatus {
    /// Awaiting qualification
    #[default]
    Pending,
    /// Qualified to supply parts
    Approved,
    /// Failed qualification
    Rejected,
    /// Barred from supplying parts
    Blacklisted,
}

/// A vendor of purchased parts.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct SupplierData {
    /// Company name
    pub name: String,
    /// Primary contact
    #[cfg_attr(feature = "serde", serde(default))]
    pub contact_name: String,
    /// Contact email
    #[cfg_attr(feature = "serde", serde(default))]
    pub email: String,
    /// Contact phone number
    #[cfg_attr(feature = "serde", serde(default))]
    pub phone: String,
    /// Postal address
    #[cfg_attr(feature = "serde", serde(default))]
    pub address: String,
    /// Qualification state
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: SupplierStatus,
    /// Performance rating, 1 (worst) to 5 (best)
    #[cfg_attr(feature = "serde", serde(default = "default_rating"))]
    pub rating: u8,
}

#[cfg(feature = "serde")]
fn default_rating() -> u8 {
    3
}

impl Validate for SupplierData {
    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)?;
        if (1..=5).contains(&self.rating) {
            Ok(())
        } else {
            Err(ValidationError::Rating(self.rating))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(5, true)]
    #[case(6, false)]
    fn test_rating_bounds(#[case] rating: u8, #[case] valid: bool) {
        let supplier: SupplierData = serde_json::from_value(serde_json::json!({
            "name": "TechComponents Inc.",
            "rating": rating,
        }))
        .unwrap();
        assert_eq!(supplier.validate().is_ok(), valid);
    }

    #[test]
    fn test_defaults() {
        let supplier: SupplierData = serde_json::from_str(r#"{"name": "Acme"}"#).unwrap();
        assert_eq!(supplier.rating, 3);
        assert_eq!(supplier.status, SupplierStatus::Pending);
    }
}
