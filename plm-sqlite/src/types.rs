//! Type definitions for the SQLite implementation.
//!
//! The public types are the strongly-typed identifiers and the timestamp type
//! the [`Db`](crate::Db) repository uses. The crate-private row types map
//! query results back into [`Record`]s.

use plm_core::models::{AuditEntry, Record};
use sqlx::{Row, sqlite::SqliteRow};

mod datetime;
pub use datetime::DateTime;

mod ids;
pub use ids::{BomId, CapaId, EcoId, NcrId, ProductId, SupplierId};

/// A row of any collection table, selected as `id, json(data) as data,
/// created_at, updated_at`.
pub(crate) struct ResourceRow<Id, Data> {
    pub id: Id,
    pub data: sqlx::types::Json<Data>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl<'r, Id, Data> sqlx::FromRow<'r, SqliteRow> for ResourceRow<Id, Data>
where
    Id: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
    Data: serde::de::DeserializeOwned + 'r,
{
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            data: row.try_get("data")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl<Id, Data> From<ResourceRow<Id, Data>> for Record<Id, DateTime, Data> {
    fn from(row: ResourceRow<Id, Data>) -> Self {
        Record {
            id: row.id,
            data: row.data.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct AuditRow {
    pub action: String,
    pub entity: String,
    pub entity_id: String,
    pub details: String,
    pub as_of: DateTime,
}

impl From<AuditRow> for AuditEntry<DateTime> {
    fn from(row: AuditRow) -> Self {
        AuditEntry {
            action: row.action,
            entity: row.entity,
            entity_id: row.entity_id,
            details: row.details,
            as_of: row.as_of,
        }
    }
}
