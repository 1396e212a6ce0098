/// A query type for dealing with datetime ranges
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(bound(deserialize = "DateTime: serde::Deserialize<'de>"))
)]
#[derive(Clone, Debug, PartialEq)]
pub struct DateTimeRangeQuery<DateTime> {
    /// Only return results at or before this time
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub before: Option<DateTime>,
    /// Only return results at or after this time
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub after: Option<DateTime>,
}

impl<DateTime> Default for DateTimeRangeQuery<DateTime> {
    fn default() -> Self {
        Self {
            before: None,
            after: None,
        }
    }
}

/// The paginated response to a datetime query
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(bound(deserialize = "T: serde::Deserialize<'de>, DateTime: serde::Deserialize<'de>"))
)]
#[derive(Clone, Debug, PartialEq)]
pub struct DateTimeRangeResponse<T, DateTime> {
    /// The results of the query, newest first
    pub results: Vec<T>,
    /// If there are more results, the query to pass to fetch the next page
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub more: Option<DateTimeRangeQuery<DateTime>>,
}
