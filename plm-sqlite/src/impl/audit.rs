use crate::{
    Db,
    types::{AuditRow, DateTime},
};
use plm_core::{
    models::{AuditEntry, DateTimeRangeQuery, DateTimeRangeResponse},
    ports::AuditRepository,
};

/// Append an entry to the audit log on the given connection, which is
/// normally the transaction performing the change being described.
pub(crate) async fn append(
    conn: &mut sqlx::SqliteConnection,
    action: String,
    entity: &str,
    entity_id: String,
    details: String,
    as_of: DateTime,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        insert into
            audit_log (action, entity, entity_id, details, as_of)
        values
            ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(action.as_str())
    .bind(entity)
    .bind(entity_id.as_str())
    .bind(details)
    .bind(as_of)
    .execute(conn)
    .await?;

    tracing::debug!(action = %action, entity_id = %entity_id, "audit entry recorded");
    Ok(())
}

impl AuditRepository for Db {
    /// Pages never split a run of entries sharing one timestamp, so the
    /// inclusive `before` of the next page picks up exactly where this one
    /// stopped. A page only exceeds `limit` when more than `limit` entries
    /// share a timestamp.
    async fn list_audit(
        &self,
        query: DateTimeRangeQuery<Self::DateTime>,
        limit: usize,
    ) -> Result<DateTimeRangeResponse<AuditEntry<DateTime>, DateTime>, Self::Error> {
        let limit = limit.max(1);
        let limit_p1 = (limit + 1) as i64;
        let mut rows = sqlx::query_as::<_, AuditRow>(
            r#"
            select
                action,
                entity,
                entity_id,
                details,
                as_of
            from
                audit_log
            where
                ($1 is null or as_of >= $1)
            and
                ($2 is null or as_of <= $2)
            order by
                as_of desc, id desc
            limit $3
            "#,
        )
        .bind(query.after)
        .bind(query.before)
        .bind(limit_p1) // +1 to check if there are more results
        .fetch_all(&self.reader)
        .await?;

        if rows.len() <= limit {
            return Ok(DateTimeRangeResponse {
                results: rows.into_iter().map(Into::into).collect(),
                more: None,
            });
        }

        // The extra row's timestamp is where the next page starts; every
        // entry at that timestamp is left for it.
        let boundary = rows[limit].as_of;
        rows.retain(|row| row.as_of > boundary);

        let more = if rows.is_empty() {
            // The whole window shares one timestamp: return that run in
            // full and continue from the next older entry.
            rows = sqlx::query_as::<_, AuditRow>(
                r#"
                select
                    action,
                    entity,
                    entity_id,
                    details,
                    as_of
                from
                    audit_log
                where
                    as_of = $1
                order by
                    id desc
                "#,
            )
            .bind(boundary)
            .fetch_all(&self.reader)
            .await?;

            sqlx::query_scalar::<_, DateTime>(
                r#"
                select
                    as_of
                from
                    audit_log
                where
                    as_of < $1
                and
                    ($2 is null or as_of >= $2)
                order by
                    as_of desc
                limit 1
                "#,
            )
            .bind(boundary)
            .bind(query.after)
            .fetch_optional(&self.reader)
            .await?
        } else {
            Some(boundary)
        };

        Ok(DateTimeRangeResponse {
            results: rows.into_iter().map(Into::into).collect(),
            more: more.map(|before| DateTimeRangeQuery {
                before: Some(before),
                after: query.after,
            }),
        })
    }
}
