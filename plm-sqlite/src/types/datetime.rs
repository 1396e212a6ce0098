//! Timestamps for PLM records.
//!
//! [`DateTime`] wraps `time::PrimitiveDateTime`, always in UTC, and
//! (de)serializes as RFC3339 so clients see e.g. `2024-01-15T10:30:00Z`.

use std::{borrow::Borrow, fmt::Display};
use time::format_description::well_known::Rfc3339;

/// A UTC timestamp with subsecond precision.
///
/// Used for record creation and update times, approval timestamps, CAPA due
/// dates and audit entries. SQLite stores it as text whose lexical order is
/// its chronological order, which the audit pagination relies on.
///
/// # Examples
///
/// ```
/// # use plm_sqlite::types::DateTime;
/// # use time::OffsetDateTime;
/// let now = OffsetDateTime::now_utc();
/// let datetime = DateTime::from(now);
/// println!("{}", datetime); // Prints in RFC3339 format
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    sqlx::Type,
)]
#[serde(from = "DateTimeDto", into = "DateTimeDto")]
#[sqlx(transparent)]
pub struct DateTime(time::PrimitiveDateTime);

impl DateTime {
    /// The current time
    pub fn now() -> Self {
        time::OffsetDateTime::now_utc().into()
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = self.0.assume_utc();
        let text = value.format(&Rfc3339).map_err(|_| std::fmt::Error)?;
        f.write_str(&text)
    }
}

impl<T: Borrow<time::OffsetDateTime>> From<T> for DateTime {
    fn from(value: T) -> Self {
        let utc = value.borrow().to_offset(time::UtcOffset::UTC);
        Self(time::PrimitiveDateTime::new(utc.date(), utc.time()))
    }
}

impl From<DateTime> for time::OffsetDateTime {
    fn from(value: DateTime) -> Self {
        value.0.assume_utc()
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
struct DateTimeDto(#[serde(with = "time::serde::rfc3339")] time::OffsetDateTime);

impl From<DateTimeDto> for DateTime {
    fn from(value: DateTimeDto) -> Self {
        value.0.into()
    }
}

impl From<DateTime> for DateTimeDto {
    fn from(value: DateTime) -> Self {
        DateTimeDto(value.into())
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for DateTime {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> std::borrow::Cow<'static, str> {
        "DateTime".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "format": "date-time",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_normalize_to_utc() {
        let local = time::OffsetDateTime::from_unix_timestamp(1_705_314_600)
            .unwrap()
            .to_offset(time::UtcOffset::from_hms(5, 30, 0).unwrap());
        let datetime = DateTime::from(local);
        assert_eq!(datetime.to_string(), "2024-01-15T10:30:00Z");
    }

    #[test]
    fn test_serde_is_rfc3339() {
        let datetime: DateTime = serde_json::from_str("\"2024-01-15T10:30:00+02:00\"").unwrap();
        assert_eq!(
            serde_json::to_string(&datetime).unwrap(),
            "\"2024-01-15T08:30:00Z\""
        );
    }
}
