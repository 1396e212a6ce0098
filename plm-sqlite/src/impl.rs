//! Repository trait implementations for the SQLite database.
//!
//! Products carry a dedicated SKU column and get hand-written queries; the
//! remaining collections share the [`Collection`] helper, which differs only
//! in table name and audit labels.

use crate::{
    Db,
    types::{BomId, CapaId, DateTime, EcoId, NcrId, ProductId, ResourceRow, SupplierId},
};
use plm_core::{
    models::Record,
    ports::{Repository, StorageError},
};
use serde::{Serialize, de::DeserializeOwned};
use sqlx::{Sqlite, SqlitePool};
use std::fmt::Display;

mod audit;
mod bom;
mod eco;
mod product;
mod quality;
mod supplier;

impl Repository for Db {
    type Error = sqlx::Error;
    type DateTime = DateTime;
    type ProductId = ProductId;
    type BomId = BomId;
    type SupplierId = SupplierId;
    type EcoId = EcoId;
    type NcrId = NcrId;
    type CapaId = CapaId;
}

impl StorageError for sqlx::Error {
    fn is_conflict(&self) -> bool {
        self.as_database_error()
            .is_some_and(|err| err.is_unique_violation())
    }
}

/// A table of JSON records with the standard bookkeeping columns.
pub(crate) struct Collection {
    /// The table name, also used as the audit entity
    pub table: &'static str,
    /// The suffix of audit actions, as in `CREATE_{tag}`
    pub tag: &'static str,
}

impl Collection {
    pub async fn list<Id, Data>(
        &self,
        pool: &SqlitePool,
    ) -> Result<Vec<Record<Id, DateTime, Data>>, sqlx::Error>
    where
        Id: for<'r> sqlx::Decode<'r, Sqlite> + sqlx::Type<Sqlite> + Send + Unpin,
        Data: DeserializeOwned + Send + Unpin + 'static,
    {
        let sql = format!(
            "select id, json(data) as data, created_at, updated_at from {} order by rowid",
            self.table
        );
        let rows = sqlx::query_as::<_, ResourceRow<Id, Data>>(&sql)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get<Id, Data>(
        &self,
        pool: &SqlitePool,
        id: Id,
    ) -> Result<Option<Record<Id, DateTime, Data>>, sqlx::Error>
    where
        Id: for<'q> sqlx::Encode<'q, Sqlite>
            + for<'r> sqlx::Decode<'r, Sqlite>
            + sqlx::Type<Sqlite>
            + Send
            + Unpin
            + 'static,
        Data: DeserializeOwned + Send + Unpin + 'static,
    {
        let sql = format!(
            "select id, json(data) as data, created_at, updated_at from {} where id = $1",
            self.table
        );
        let row = sqlx::query_as::<_, ResourceRow<Id, Data>>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Into::into))
    }

    pub async fn create<Id, Data>(
        &self,
        pool: &SqlitePool,
        id: Id,
        data: Data,
        details: String,
        as_of: DateTime,
    ) -> Result<Record<Id, DateTime, Data>, sqlx::Error>
    where
        Id: for<'q> sqlx::Encode<'q, Sqlite>
            + for<'r> sqlx::Decode<'r, Sqlite>
            + sqlx::Type<Sqlite>
            + Display
            + Send
            + Unpin
            + 'static,
        Data: Serialize + DeserializeOwned + Send + Unpin + 'static,
    {
        let sql = format!(
            "insert into {} (id, data, created_at, updated_at) values ($1, jsonb($2), $3, $3) \
             returning id, json(data) as data, created_at, updated_at",
            self.table
        );
        let entity_id = id.to_string();
        let data = sqlx::types::Json(data);

        let mut tx = pool.begin().await?;
        let row = sqlx::query_as::<_, ResourceRow<Id, Data>>(&sql)
            .bind(id)
            .bind(data)
            .bind(as_of)
            .fetch_one(&mut *tx)
            .await?;
        audit::append(
            &mut tx,
            format!("CREATE_{}", self.tag),
            self.table,
            entity_id,
            details,
            as_of,
        )
        .await?;
        tx.commit().await?;

        Ok(row.into())
    }

    pub async fn update<Id, Data>(
        &self,
        pool: &SqlitePool,
        id: Id,
        data: Data,
        details: String,
        as_of: DateTime,
    ) -> Result<Option<Record<Id, DateTime, Data>>, sqlx::Error>
    where
        Id: for<'q> sqlx::Encode<'q, Sqlite>
            + for<'r> sqlx::Decode<'r, Sqlite>
            + sqlx::Type<Sqlite>
            + Display
            + Send
            + Unpin
            + 'static,
        Data: Serialize + DeserializeOwned + Send + Unpin + 'static,
    {
        let sql = format!(
            "update {} set data = jsonb($2), updated_at = $3 where id = $1 \
             returning id, json(data) as data, created_at, updated_at",
            self.table
        );
        let entity_id = id.to_string();
        let data = sqlx::types::Json(data);

        let mut tx = pool.begin().await?;
        let Some(row) = sqlx::query_as::<_, ResourceRow<Id, Data>>(&sql)
            .bind(id)
            .bind(data)
            .bind(as_of)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };
        audit::append(
            &mut tx,
            format!("UPDATE_{}", self.tag),
            self.table,
            entity_id,
            details,
            as_of,
        )
        .await?;
        tx.commit().await?;

        Ok(Some(row.into()))
    }

    pub async fn delete<Id>(
        &self,
        pool: &SqlitePool,
        id: Id,
        as_of: DateTime,
    ) -> Result<bool, sqlx::Error>
    where
        Id: for<'q> sqlx::Encode<'q, Sqlite> + sqlx::Type<Sqlite> + Display + Send + 'static,
    {
        let sql = format!("delete from {} where id = $1", self.table);
        let entity_id = id.to_string();

        let mut tx = pool.begin().await?;
        let deleted = sqlx::query(&sql)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;
        if !deleted {
            return Ok(false);
        }
        audit::append(
            &mut tx,
            format!("DELETE_{}", self.tag),
            self.table,
            entity_id.clone(),
            format!("Deleted {} {entity_id}", self.table),
            as_of,
        )
        .await?;
        tx.commit().await?;

        Ok(true)
    }
}
