use crate::models::{AuditEntry, DateTimeRangeQuery, DateTimeRangeResponse};

/// Repository interface for the audit trail.
///
/// Entries are written by the other repositories as part of each create,
/// update or delete; this trait only reads them back.
pub trait AuditRepository: super::Repository {
    /// Retrieve audit entries within a time range.
    ///
    /// # Returns
    ///
    /// A paginated response of up to `limit` entries, newest first. Entries
    /// sharing a timestamp are never split across pages, so a page may run
    /// over `limit` when more than `limit` of them share one. Following
    /// `more` visits every entry in the range exactly once.
    fn list_audit(
        &self,
        query: DateTimeRangeQuery<Self::DateTime>,
        limit: usize,
    ) -> impl Future<
        Output = Result<
            DateTimeRangeResponse<AuditEntry<Self::DateTime>, Self::DateTime>,
            Self::Error,
        >,
    > + Send;
}
